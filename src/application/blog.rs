use std::sync::Arc;

use crate::application::repos::{BlogRepo, RepoError};
use crate::application::safe_query::{SliceOutcome, fail_soft, query_slice};
use crate::domain::entities::BlogPostRecord;

const RELATED_LIMIT: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct BlogDetail {
    pub post: BlogPostRecord,
    pub related: SliceOutcome<BlogPostRecord>,
}

#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn BlogRepo>,
}

impl BlogService {
    pub fn new(posts: Arc<dyn BlogRepo>) -> Self {
        Self { posts }
    }

    /// Published posts, newest first.
    pub async fn list(&self) -> Result<Vec<BlogPostRecord>, RepoError> {
        self.posts.list_published().await
    }

    /// A published post by slug. Drafts resolve to `None`.
    ///
    /// Counting the view and loading related posts may fail without affecting
    /// the result; the previous count is kept in that case.
    pub async fn detail(&self, slug: &str) -> Result<Option<BlogDetail>, RepoError> {
        let Some(mut post) = self.posts.find_published_by_slug(slug).await? else {
            return Ok(None);
        };
        if !post.is_published {
            return Ok(None);
        }

        post.views = fail_soft("blog_view_count", self.posts.increment_views(post.id), post.views)
            .await;
        let related = query_slice(
            "blog_related",
            self.posts.list_related(post.id, RELATED_LIMIT),
        )
        .await;

        Ok(Some(BlogDetail { post, related }))
    }
}
