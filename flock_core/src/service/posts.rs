use sea_orm::{Condition, DatabaseConnection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    entity::prelude::*,
    ids::{CommentId, PostId, UserId},
    service::PageRequest,
};

#[derive(Debug, Error)]
pub enum PostsServiceError {
    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("post not found")]
    PostNotFound,

    #[error("comment not found")]
    CommentNotFound,

    #[error("{0} must not be blank")]
    Blank(&'static str),

    #[error("forbidden: not the author")]
    NotAuthor,
}

/// Filters for [`PostsService::list_posts`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    /// Substring matched against title or content.
    pub search: Option<String>,
    pub author: Option<UserId>,
    pub page: PageRequest,
}

#[derive(Clone)]
pub struct PostsService {
    db: DatabaseConnection,
}

impl PostsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a new post authored by `author_id`
    pub async fn create_post(
        &self,
        author_id: UserId,
        title: String,
        content: String,
    ) -> Result<PostModel, PostsServiceError> {
        require_text("title", &title)?;
        require_text("content", &content)?;

        let now = timestamp_now();
        let post = PostActiveModel {
            id: Set(PostId::new()),
            author_id: Set(author_id),
            title: Set(title),
            content: Set(content),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = Post::insert(post).exec_with_returning(&self.db).await?;

        tracing::info!(post_id = %result.id, author = %author_id, "created post");
        Ok(result)
    }

    /// Get a specific post by ID
    pub async fn get_post(&self, post_id: PostId) -> Result<PostModel, PostsServiceError> {
        Post::find_by_id(post_id)
            .one(&self.db)
            .await?
            .ok_or(PostsServiceError::PostNotFound)
    }

    /// List posts, newest first
    pub async fn list_posts(&self, query: PostQuery) -> Result<Vec<PostModel>, PostsServiceError> {
        let mut select = Post::find();

        if let Some(search) = query.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                select = select.filter(
                    Condition::any()
                        .add(PostColumn::Title.contains(search))
                        .add(PostColumn::Content.contains(search)),
                );
            }
        }

        if let Some(author) = query.author {
            select = select.filter(PostColumn::AuthorId.eq(author));
        }

        let select = select
            .order_by_desc(PostColumn::CreatedAt)
            .order_by_desc(PostColumn::Id);
        let posts = query.page.apply(select).all(&self.db).await?;

        Ok(posts)
    }

    /// Update a post (only by author)
    pub async fn update_post(
        &self,
        actor: UserId,
        post_id: PostId,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<PostModel, PostsServiceError> {
        let post = self.get_post(post_id).await?;

        if post.author_id != actor {
            return Err(PostsServiceError::NotAuthor);
        }

        // Only update fields that were provided
        let mut post_active: PostActiveModel = post.into();

        if let Some(new_title) = title {
            require_text("title", &new_title)?;
            post_active.title = Set(new_title);
        }

        if let Some(new_content) = content {
            require_text("content", &new_content)?;
            post_active.content = Set(new_content);
        }

        post_active.updated_at = Set(timestamp_now());

        let updated = post_active.update(&self.db).await?;
        Ok(updated)
    }

    /// Delete a post (only by author) together with everything hanging off it
    pub async fn delete_post(&self, actor: UserId, post_id: PostId) -> Result<(), PostsServiceError> {
        let post = self.get_post(post_id).await?;

        if post.author_id != actor {
            return Err(PostsServiceError::NotAuthor);
        }

        let txn = self.db.begin().await?;

        // Like and comment notifications both point at the post
        Notification::delete_many()
            .filter(NotificationColumn::TargetKind.eq(TargetKind::Post))
            .filter(NotificationColumn::TargetId.eq(post_id.into_uuid()))
            .exec(&txn)
            .await?;
        Like::delete_many()
            .filter(LikeColumn::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        Comment::delete_many()
            .filter(CommentColumn::PostId.eq(post_id))
            .exec(&txn)
            .await?;
        Post::delete_by_id(post_id).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(post_id = %post_id, author = %actor, "deleted post");
        Ok(())
    }

    /// Number of posts authored by `user_id`
    pub async fn count_posts_by_user(&self, user_id: UserId) -> Result<u64, PostsServiceError> {
        let count = Post::find()
            .filter(PostColumn::AuthorId.eq(user_id))
            .count(&self.db)
            .await?;

        Ok(count)
    }

    pub async fn get_comment(&self, comment_id: CommentId) -> Result<CommentModel, PostsServiceError> {
        Comment::find_by_id(comment_id)
            .one(&self.db)
            .await?
            .ok_or(PostsServiceError::CommentNotFound)
    }

    /// Comments on a post, oldest first (conversation order)
    pub async fn list_comments(
        &self,
        post_id: PostId,
        page: PageRequest,
    ) -> Result<Vec<CommentModel>, PostsServiceError> {
        self.get_post(post_id).await?;

        let select = Comment::find()
            .filter(CommentColumn::PostId.eq(post_id))
            .order_by_asc(CommentColumn::CreatedAt)
            .order_by_asc(CommentColumn::Id);
        let comments = page.apply(select).all(&self.db).await?;

        Ok(comments)
    }

    /// Update a comment (only by author)
    pub async fn update_comment(
        &self,
        actor: UserId,
        comment_id: CommentId,
        content: String,
    ) -> Result<CommentModel, PostsServiceError> {
        let comment = self.get_comment(comment_id).await?;

        if comment.author_id != actor {
            return Err(PostsServiceError::NotAuthor);
        }
        require_text("content", &content)?;

        let mut active: CommentActiveModel = comment.into();
        active.content = Set(content);
        active.updated_at = Set(timestamp_now());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Delete a comment (only by author)
    pub async fn delete_comment(
        &self,
        actor: UserId,
        comment_id: CommentId,
    ) -> Result<(), PostsServiceError> {
        let comment = self.get_comment(comment_id).await?;

        if comment.author_id != actor {
            return Err(PostsServiceError::NotAuthor);
        }

        Comment::delete_by_id(comment_id).exec(&self.db).await?;

        tracing::info!(comment_id = %comment_id, author = %actor, "deleted comment");
        Ok(())
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), PostsServiceError> {
    if value.trim().is_empty() {
        return Err(PostsServiceError::Blank(field));
    }
    Ok(())
}
