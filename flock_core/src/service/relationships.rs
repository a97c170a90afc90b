use sea_orm::{sea_query::OnConflict, DatabaseConnection, QueryTrait};
use thiserror::Error;

use crate::{entity::prelude::*, ids::UserId};

#[derive(Debug, Error)]
pub enum RelationshipsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("user not found")]
    UserNotFound,

    #[error("you cannot follow yourself")]
    SelfFollow,
}

/// Manages the directed "following" graph between users.
#[derive(Clone)]
pub struct RelationshipsService {
    db: DatabaseConnection,
}

impl RelationshipsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add `target_id` to the actor's following-set. Following someone twice
    /// is a no-op. Returns the followed user.
    pub async fn follow(
        &self,
        actor: UserId,
        target_id: UserId,
    ) -> Result<UserModel, RelationshipsServiceError> {
        let target = self.get_user(target_id).await?;

        if target.id == actor {
            return Err(RelationshipsServiceError::SelfFollow);
        }

        let edge = FollowActiveModel {
            follower_id: Set(actor),
            followee_id: Set(target.id),
            created_at: Set(timestamp_now()),
        };

        let inserted = Follow::insert(edge)
            .on_conflict(
                OnConflict::columns([FollowColumn::FollowerId, FollowColumn::FolloweeId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted > 0 {
            tracing::info!(follower = %actor, followee = %target.id, "followed user");
        }

        Ok(target)
    }

    /// Remove `target_id` from the actor's following-set. Unfollowing someone
    /// who isn't followed is a no-op. Returns the unfollowed user.
    pub async fn unfollow(
        &self,
        actor: UserId,
        target_id: UserId,
    ) -> Result<UserModel, RelationshipsServiceError> {
        let target = self.get_user(target_id).await?;

        let result = Follow::delete_many()
            .filter(FollowColumn::FollowerId.eq(actor))
            .filter(FollowColumn::FolloweeId.eq(target.id))
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(follower = %actor, followee = %target.id, "unfollowed user");
        }

        Ok(target)
    }

    #[cfg(test)]
    pub(crate) async fn is_following(
        &self,
        follower: UserId,
        followee: UserId,
    ) -> Result<bool, RelationshipsServiceError> {
        let edge = Follow::find_by_id((follower, followee))
            .one(&self.db)
            .await?;
        Ok(edge.is_some())
    }

    /// Users that `user_id` follows, by username.
    pub async fn following(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserModel>, RelationshipsServiceError> {
        self.get_user(user_id).await?;

        let followees = Follow::find()
            .select_only()
            .column(FollowColumn::FolloweeId)
            .filter(FollowColumn::FollowerId.eq(user_id))
            .into_query();

        let users = User::find()
            .filter(UserColumn::Id.in_subquery(followees))
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await?;

        Ok(users)
    }

    /// Users following `user_id`, by username.
    pub async fn followers(
        &self,
        user_id: UserId,
    ) -> Result<Vec<UserModel>, RelationshipsServiceError> {
        self.get_user(user_id).await?;

        let followers = Follow::find()
            .select_only()
            .column(FollowColumn::FollowerId)
            .filter(FollowColumn::FolloweeId.eq(user_id))
            .into_query();

        let users = User::find()
            .filter(UserColumn::Id.in_subquery(followers))
            .order_by_asc(UserColumn::Username)
            .all(&self.db)
            .await?;

        Ok(users)
    }

    async fn get_user(&self, user_id: UserId) -> Result<UserModel, RelationshipsServiceError> {
        User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(RelationshipsServiceError::UserNotFound)
    }
}
