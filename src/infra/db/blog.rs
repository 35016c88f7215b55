use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{BlogRepo, RepoError},
    domain::entities::BlogPostRecord,
};

use super::{PostgresRepositories, limit_param, map_sqlx_error};

const POST_COLUMNS: &str = "id, slug, title, excerpt, body, cover_image, is_published, \
    is_featured, published_at, views";

#[derive(sqlx::FromRow)]
struct BlogPostRow {
    id: i64,
    slug: String,
    title: String,
    excerpt: String,
    body: String,
    cover_image: Option<String>,
    is_published: bool,
    is_featured: bool,
    published_at: Option<OffsetDateTime>,
    views: i64,
}

impl From<BlogPostRow> for BlogPostRecord {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            body: row.body,
            cover_image: row.cover_image,
            is_published: row.is_published,
            is_featured: row.is_featured,
            published_at: row.published_at,
            views: row.views,
        }
    }
}

#[async_trait]
impl BlogRepo for PostgresRepositories {
    async fn list_published(&self) -> Result<Vec<BlogPostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts \
             WHERE is_published \
             ORDER BY published_at DESC NULLS LAST, id DESC"
        );
        let rows = sqlx::query_as::<_, BlogPostRow>(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BlogPostRecord::from).collect())
    }

    async fn list_featured(&self, limit: Option<u32>) -> Result<Vec<BlogPostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts \
             WHERE is_published AND is_featured \
             ORDER BY published_at DESC NULLS LAST, id DESC \
             LIMIT $1"
        );
        let rows = sqlx::query_as::<_, BlogPostRow>(&sql)
            .bind(limit_param(limit))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BlogPostRecord::from).collect())
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogPostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts \
             WHERE slug = $1 AND is_published"
        );
        let row = sqlx::query_as::<_, BlogPostRow>(&sql)
            .bind(slug)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(BlogPostRecord::from))
    }

    async fn list_related(
        &self,
        exclude_id: i64,
        limit: u32,
    ) -> Result<Vec<BlogPostRecord>, RepoError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM blog_posts \
             WHERE is_published AND id <> $1 \
             ORDER BY published_at DESC NULLS LAST, id DESC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, BlogPostRow>(&sql)
            .bind(exclude_id)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(BlogPostRecord::from).collect())
    }

    async fn increment_views(&self, id: i64) -> Result<i64, RepoError> {
        let views: Option<i64> = sqlx::query_scalar(
            "UPDATE blog_posts SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        views.ok_or(RepoError::NotFound)
    }
}
