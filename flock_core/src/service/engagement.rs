use sea_orm::{ConnectionTrait, DatabaseConnection};
use thiserror::Error;

use crate::{
    entity::{
        notification::{VERB_COMMENTED, VERB_LIKED},
        prelude::*,
    },
    ids::{CommentId, LikeId, PostId, UserId},
    service::{accounts::is_unique_violation, notifications},
};

#[derive(Debug, Error)]
pub enum EngagementServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,

    #[error("you have already liked this post")]
    AlreadyLiked,

    #[error("you have not liked this post")]
    NotLiked,

    #[error("comment must not be blank")]
    BlankComment,
}

/// Likes and comments, plus the notifications they raise for the post author.
#[derive(Clone)]
pub struct EngagementService {
    db: DatabaseConnection,
}

impl EngagementService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Like a post. A second like from the same user is rejected rather than
    /// duplicated; liking someone else's post notifies its author.
    pub async fn like(
        &self,
        actor: UserId,
        post_id: PostId,
    ) -> Result<LikeModel, EngagementServiceError> {
        let txn = self.db.begin().await?;

        let post = find_post(&txn, post_id).await?;

        let existing = Like::find()
            .filter(LikeColumn::UserId.eq(actor))
            .filter(LikeColumn::PostId.eq(post_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(EngagementServiceError::AlreadyLiked);
        }

        let like = LikeActiveModel {
            id: Set(LikeId::new()),
            user_id: Set(actor),
            post_id: Set(post_id),
            created_at: Set(timestamp_now()),
        };

        // The unique (user_id, post_id) index settles concurrent likes
        let like = match Like::insert(like).exec_with_returning(&txn).await {
            Ok(like) => like,
            Err(err) if is_unique_violation(&err) => {
                return Err(EngagementServiceError::AlreadyLiked)
            }
            Err(err) => return Err(err.into()),
        };

        if post.author_id != actor {
            Notification::insert(notifications::new_notification(
                post.author_id,
                actor,
                VERB_LIKED,
                TargetKind::Post,
                post.id.into_uuid(),
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        tracing::info!(post_id = %post_id, user_id = %actor, "liked post");
        Ok(like)
    }

    /// Remove the actor's like. Notifications raised by the like are kept.
    pub async fn unlike(
        &self,
        actor: UserId,
        post_id: PostId,
    ) -> Result<(), EngagementServiceError> {
        find_post(&self.db, post_id).await?;

        let result = Like::delete_many()
            .filter(LikeColumn::UserId.eq(actor))
            .filter(LikeColumn::PostId.eq(post_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(EngagementServiceError::NotLiked);
        }

        tracing::info!(post_id = %post_id, user_id = %actor, "unliked post");
        Ok(())
    }

    /// Comment on a post; commenting on someone else's post notifies its author.
    pub async fn comment(
        &self,
        actor: UserId,
        post_id: PostId,
        content: String,
    ) -> Result<CommentModel, EngagementServiceError> {
        if content.trim().is_empty() {
            return Err(EngagementServiceError::BlankComment);
        }

        let txn = self.db.begin().await?;

        let post = find_post(&txn, post_id).await?;

        let now = timestamp_now();
        let comment = CommentActiveModel {
            id: Set(CommentId::new()),
            post_id: Set(post_id),
            author_id: Set(actor),
            content: Set(content),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };
        let comment = Comment::insert(comment).exec_with_returning(&txn).await?;

        if post.author_id != actor {
            Notification::insert(notifications::new_notification(
                post.author_id,
                actor,
                VERB_COMMENTED,
                TargetKind::Post,
                post.id.into_uuid(),
            ))
            .exec(&txn)
            .await?;
        }

        txn.commit().await?;

        tracing::info!(post_id = %post_id, comment_id = %comment.id, user_id = %actor, "commented on post");
        Ok(comment)
    }

    pub async fn like_count(&self, post_id: PostId) -> Result<u64, EngagementServiceError> {
        find_post(&self.db, post_id).await?;

        let count = Like::find()
            .filter(LikeColumn::PostId.eq(post_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    #[cfg(test)]
    pub(crate) async fn has_liked(
        &self,
        actor: UserId,
        post_id: PostId,
    ) -> Result<bool, EngagementServiceError> {
        let like = Like::find()
            .filter(LikeColumn::UserId.eq(actor))
            .filter(LikeColumn::PostId.eq(post_id))
            .one(&self.db)
            .await?;
        Ok(like.is_some())
    }
}

async fn find_post<C>(conn: &C, post_id: PostId) -> Result<PostModel, EngagementServiceError>
where
    C: ConnectionTrait,
{
    Post::find_by_id(post_id)
        .one(conn)
        .await?
        .ok_or(EngagementServiceError::PostNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    async fn setup_test_service() -> EngagementService {
        EngagementService::new(test_utils::setup_test_db().await)
    }

    async fn notifications_for(service: &EngagementService, user: UserId) -> Vec<NotificationModel> {
        Notification::find()
            .filter(NotificationColumn::RecipientId.eq(user))
            .all(&service.db)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_like_other_users_post_notifies_author() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let bob = test_utils::create_test_user(&service.db, "bob").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Hello").await;

        let like = service.like(bob.id, post.id).await.unwrap();
        assert_eq!(like.user_id, bob.id);
        assert_eq!(like.post_id, post.id);

        let notifications = notifications_for(&service, alice.id).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].actor_id, bob.id);
        assert_eq!(notifications[0].verb, VERB_LIKED);
        assert_eq!(notifications[0].target_kind, TargetKind::Post);
        assert_eq!(notifications[0].target_id, post.id.into_uuid());
        assert!(!notifications[0].read);
    }

    #[tokio::test]
    async fn test_like_own_post_does_not_notify() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Mine").await;

        service.like(alice.id, post.id).await.unwrap();

        assert!(notifications_for(&service, alice.id).await.is_empty());
        assert_eq!(service.like_count(post.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_double_like_rejected() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let bob = test_utils::create_test_user(&service.db, "bob").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Hello").await;

        service.like(bob.id, post.id).await.unwrap();
        let second = service.like(bob.id, post.id).await;

        assert!(matches!(second, Err(EngagementServiceError::AlreadyLiked)));
        assert_eq!(service.like_count(post.id).await.unwrap(), 1);
        // No second notification either
        assert_eq!(notifications_for(&service, alice.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_like_unlike_like_again() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let bob = test_utils::create_test_user(&service.db, "bob").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Hello").await;

        service.like(bob.id, post.id).await.unwrap();
        service.unlike(bob.id, post.id).await.unwrap();
        assert!(!service.has_liked(bob.id, post.id).await.unwrap());

        service.like(bob.id, post.id).await.unwrap();
        assert_eq!(service.like_count(post.id).await.unwrap(), 1);
        assert!(service.has_liked(bob.id, post.id).await.unwrap());

        // Unlike leaves earlier notifications in place
        assert_eq!(notifications_for(&service, alice.id).await.len(), 2);
    }

    #[tokio::test]
    async fn test_unlike_without_like() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Hello").await;

        let result = service.unlike(alice.id, post.id).await;
        assert!(matches!(result, Err(EngagementServiceError::NotLiked)));
    }

    #[tokio::test]
    async fn test_engagement_on_missing_post() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let missing = PostId::new();

        assert!(matches!(
            service.like(alice.id, missing).await,
            Err(EngagementServiceError::PostNotFound)
        ));
        assert!(matches!(
            service.unlike(alice.id, missing).await,
            Err(EngagementServiceError::PostNotFound)
        ));
        assert!(matches!(
            service.comment(alice.id, missing, "hi".to_string()).await,
            Err(EngagementServiceError::PostNotFound)
        ));
    }

    #[tokio::test]
    async fn test_comment_notifies_author_only_for_others() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let bob = test_utils::create_test_user(&service.db, "bob").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Hello").await;

        let own = service
            .comment(alice.id, post.id, "thanks for reading".to_string())
            .await
            .unwrap();
        assert_eq!(own.author_id, alice.id);
        assert!(notifications_for(&service, alice.id).await.is_empty());

        let comment = service
            .comment(bob.id, post.id, "great post".to_string())
            .await
            .unwrap();
        assert_eq!(comment.post_id, post.id);

        let notifications = notifications_for(&service, alice.id).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].actor_id, bob.id);
        assert_eq!(notifications[0].verb, VERB_COMMENTED);
    }

    #[tokio::test]
    async fn test_blank_comment_rejected() {
        let service = setup_test_service().await;
        let alice = test_utils::create_test_user(&service.db, "alice").await;
        let post = test_utils::create_test_post(&service.db, alice.id, "Hello").await;

        let result = service.comment(alice.id, post.id, "  \n".to_string()).await;
        assert!(matches!(result, Err(EngagementServiceError::BlankComment)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_duplicate_likes_create_one_row() {
        let dir = std::env::temp_dir().join(format!("flock-like-race-{}", UserId::new()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let config = crate::config::FlockConfig::new(dir.clone());
        let db = crate::models::open_or_create_db(&config).await.unwrap();
        crate::models::migrate_up(&db).await.unwrap();
        let service = EngagementService::new(db.clone());

        let alice = test_utils::create_test_user(&db, "alice").await;
        let bob = test_utils::create_test_user(&db, "bob").await;
        let post = test_utils::create_test_post(&db, alice.id, "Contested").await;

        let (first, second) = tokio::join!(
            service.like(bob.id, post.id),
            service.like(bob.id, post.id)
        );

        let results = [first, second];
        let liked = results.iter().filter(|r| r.is_ok()).count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Err(EngagementServiceError::AlreadyLiked)))
            .count();
        assert_eq!((liked, rejected), (1, 1), "{results:?}");

        assert_eq!(service.like_count(post.id).await.unwrap(), 1);
        assert_eq!(notifications_for(&service, alice.id).await.len(), 1);

        db.close().await.unwrap();
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
