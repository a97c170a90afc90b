pub mod accounts;
pub mod comments;
pub mod feed;
pub mod health;
pub mod notifications;
pub mod posts;
pub mod users;
