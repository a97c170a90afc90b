#[cfg(test)]
mod entity_tests {
    use crate::entity::prelude::*;
    use crate::ids::*;
    use crate::test_utils::{create_test_post, create_test_user, setup_test_db};

    #[tokio::test]
    async fn test_create_and_find_user() {
        let db = setup_test_db().await;

        let user = create_test_user(&db, "test_user").await;

        let found = User::find_by_id(user.id)
            .one(&db)
            .await
            .expect("Failed to query user");

        assert!(found.is_some());
        let found_user = found.unwrap();
        assert_eq!(found_user.username, "test_user");
        assert_eq!(found_user.email, "test_user@example.com");
    }

    #[tokio::test]
    async fn test_username_is_unique() {
        let db = setup_test_db().await;
        create_test_user(&db, "taken").await;

        let duplicate = UserActiveModel {
            id: Set(UserId::new()),
            username: Set("taken".to_string()),
            email: Set("other@example.com".to_string()),
            password_hash: Set("!".to_string()),
            bio: Set(String::new()),
            created_at: Set(timestamp_now()),
        };

        let result = User::insert(duplicate).exec(&db).await;
        let err = result.expect_err("Duplicate username should be rejected");
        assert!(matches!(
            err.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_password_hash_not_serialized() {
        let db = setup_test_db().await;
        let user = create_test_user(&db, "private").await;

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "private");
    }

    #[tokio::test]
    async fn test_post_author_relationship() {
        let db = setup_test_db().await;
        let author = create_test_user(&db, "author").await;
        let post = create_test_post(&db, author.id, "Related").await;

        let (found_post, found_author) = Post::find_by_id(post.id)
            .find_also_related(User)
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found_post.id, post.id);
        assert_eq!(found_author.unwrap().id, author.id);

        let authored = author.find_related(Post).all(&db).await.unwrap();
        assert_eq!(authored.len(), 1);
    }

    #[tokio::test]
    async fn test_like_unique_per_user_and_post() {
        let db = setup_test_db().await;
        let author = create_test_user(&db, "author").await;
        let fan = create_test_user(&db, "fan").await;
        let post = create_test_post(&db, author.id, "Popular").await;

        let like = || LikeActiveModel {
            id: Set(LikeId::new()),
            user_id: Set(fan.id),
            post_id: Set(post.id),
            created_at: Set(timestamp_now()),
        };

        Like::insert(like()).exec(&db).await.unwrap();
        let err = Like::insert(like())
            .exec(&db)
            .await
            .expect_err("Second like should violate the unique index");
        assert!(matches!(
            err.sql_err(),
            Some(SqlErr::UniqueConstraintViolation(_))
        ));

        let likes = post.find_related(Like).all(&db).await.unwrap();
        assert_eq!(likes.len(), 1);
    }

    #[tokio::test]
    async fn test_follow_composite_key() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;
        let bob = create_test_user(&db, "bob").await;

        let edge = || FollowActiveModel {
            follower_id: Set(alice.id),
            followee_id: Set(bob.id),
            created_at: Set(timestamp_now()),
        };

        Follow::insert(edge()).exec(&db).await.unwrap();
        assert!(Follow::insert(edge()).exec(&db).await.is_err());

        let found = Follow::find_by_id((alice.id, bob.id)).one(&db).await.unwrap();
        assert!(found.is_some());
        let reverse = Follow::find_by_id((bob.id, alice.id)).one(&db).await.unwrap();
        assert!(reverse.is_none());
    }

    #[tokio::test]
    async fn test_notification_target_kind_round_trip() {
        let db = setup_test_db().await;
        let alice = create_test_user(&db, "alice").await;
        let bob = create_test_user(&db, "bob").await;
        let comment_id = CommentId::new();

        let notification = NotificationActiveModel {
            id: Set(NotificationId::new()),
            recipient_id: Set(alice.id),
            actor_id: Set(bob.id),
            verb: Set("commented on your post".to_string()),
            target_kind: Set(TargetKind::Comment),
            target_id: Set(comment_id.into_uuid()),
            created_at: Set(timestamp_now()),
            read: Set(false),
        };
        let inserted = Notification::insert(notification)
            .exec_with_returning(&db)
            .await
            .unwrap();

        let found = Notification::find()
            .filter(NotificationColumn::TargetKind.eq(TargetKind::Comment))
            .one(&db)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id, inserted.id);
        assert_eq!(found.target_kind, TargetKind::Comment);
        assert_eq!(found.target_id, comment_id.into_uuid());
    }

    #[test]
    fn test_timestamps_sort_chronologically() {
        let earlier = timestamp_now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let later = timestamp_now();

        assert_eq!(earlier.len(), later.len());
        assert!(earlier < later);
    }
}
