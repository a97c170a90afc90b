use sea_orm::{DatabaseConnection, QueryTrait, Select};
use thiserror::Error;

use crate::{entity::prelude::*, ids::UserId, service::PageRequest};

#[derive(Debug, Error)]
pub enum FeedServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),
}

/// Assembles a user's feed: posts by everyone they follow, newest first.
///
/// Nothing is cached, so every call reflects the current following-set and
/// the current posts. Posts created in the same instant are ordered by id,
/// which increases with insertion order.
#[derive(Clone)]
pub struct FeedService {
    db: DatabaseConnection,
}

impl FeedService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_feed(&self, user_id: UserId) -> Result<Vec<PostModel>, FeedServiceError> {
        let posts = feed_query(user_id).all(&self.db).await?;
        Ok(posts)
    }

    pub async fn get_feed_page(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<PostModel>, FeedServiceError> {
        let posts = page.apply(feed_query(user_id)).all(&self.db).await?;

        tracing::debug!(user_id = %user_id, returned = posts.len(), "assembled feed page");
        Ok(posts)
    }
}

fn feed_query(user_id: UserId) -> Select<Post> {
    let followees = Follow::find()
        .select_only()
        .column(FollowColumn::FolloweeId)
        .filter(FollowColumn::FollowerId.eq(user_id))
        .into_query();

    Post::find()
        .filter(PostColumn::AuthorId.in_subquery(followees))
        .order_by_desc(PostColumn::CreatedAt)
        .order_by_desc(PostColumn::Id)
}
