use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;

use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::{entity::prelude::*, ids::UserId};

const MIN_PASSWORD_LEN: usize = 8;
const TOKEN_BYTES: usize = 20;

#[derive(Debug, Error)]
pub enum AccountsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("user not found")]
    UserNotFound,

    #[error("username already taken")]
    UsernameTaken,

    #[error("invalid registration: {0}")]
    InvalidInput(&'static str),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

#[derive(Clone)]
pub struct AccountsService {
    db: DatabaseConnection,
}

impl AccountsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new account. The password is stored as an argon2 hash.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<UserModel, AccountsServiceError> {
        let username = username.trim().to_string();
        let email = email.trim().to_string();

        if username.is_empty() {
            return Err(AccountsServiceError::InvalidInput("username is required"));
        }
        if !email.contains('@') {
            return Err(AccountsServiceError::InvalidInput("email is malformed"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AccountsServiceError::InvalidInput(
                "password must be at least 8 characters",
            ));
        }

        if self.find_by_username(&username).await?.is_some() {
            return Err(AccountsServiceError::UsernameTaken);
        }

        let password_hash = hash_password(&password)?;

        let user = UserActiveModel {
            id: Set(UserId::new()),
            username: Set(username),
            email: Set(email),
            password_hash: Set(password_hash),
            bio: Set(String::new()),
            created_at: Set(timestamp_now()),
        };

        // A concurrent registration can still win the race on the unique index
        let user = match User::insert(user).exec_with_returning(&self.db).await {
            Ok(user) => user,
            Err(err) if is_unique_violation(&err) => {
                return Err(AccountsServiceError::UsernameTaken)
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id = %user.id, username = %user.username, "registered user");
        Ok(user)
    }

    /// Check credentials and hand back the user's token, creating it on first login.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthTokenModel, AccountsServiceError> {
        let Some(user) = self.find_by_username(username.trim()).await? else {
            // Same argon2 cost as a real check, so unknown usernames don't answer faster
            verify_password(password, dummy_hash());
            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "rejected login");
            return Err(AccountsServiceError::InvalidCredentials);
        }

        if let Some(token) = self.token_for(user.id).await? {
            return Ok(token);
        }

        let token = AuthTokenActiveModel {
            key: Set(generate_token_key()),
            user_id: Set(user.id),
            created_at: Set(timestamp_now()),
        };

        match AuthToken::insert(token).exec_with_returning(&self.db).await {
            Ok(token) => {
                tracing::info!(user_id = %user.id, "issued auth token");
                Ok(token)
            }
            // Two logins raced; the other one created the token
            Err(err) if is_unique_violation(&err) => self
                .token_for(user.id)
                .await?
                .ok_or(AccountsServiceError::InvalidToken),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve a token key to its user.
    pub async fn authenticate(&self, key: &str) -> Result<UserModel, AccountsServiceError> {
        let found = AuthToken::find_by_id(key.to_string())
            .find_also_related(User)
            .one(&self.db)
            .await?;

        match found {
            Some((_, Some(user))) => Ok(user),
            _ => Err(AccountsServiceError::InvalidToken),
        }
    }

    pub async fn get_user(&self, user_id: UserId) -> Result<UserModel, AccountsServiceError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(AccountsServiceError::UserNotFound)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<UserModel>, DbErr> {
        User::find()
            .filter(UserColumn::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Update the caller's own profile. Fields left as `None` are unchanged.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        email: Option<String>,
        bio: Option<String>,
    ) -> Result<UserModel, AccountsServiceError> {
        let user = self.get_user(user_id).await?;
        let mut active: UserActiveModel = user.into();

        if let Some(email) = email {
            let email = email.trim().to_string();
            if !email.contains('@') {
                return Err(AccountsServiceError::InvalidInput("email is malformed"));
            }
            active.email = Set(email);
        }

        if let Some(bio) = bio {
            active.bio = Set(bio);
        }

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    async fn token_for(&self, user_id: UserId) -> Result<Option<AuthTokenModel>, DbErr> {
        AuthToken::find()
            .filter(AuthTokenColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(AccountsServiceError::PasswordHash)
}

fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        // Placeholder hashes (seeded accounts) never match
        Err(_) => false,
    }
}

/// A real hash of a throwaway password, computed once.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("flock-unknown-user").unwrap_or_default())
}

/// 40 lowercase hex characters.
fn generate_token_key() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
