use async_trait::async_trait;

use crate::{
    application::repos::{RepoError, SiteContentRepo},
    domain::entities::{FeaturedImageRecord, Rating, TestimonialRecord},
};

use super::{PostgresRepositories, limit_param, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct TestimonialRow {
    id: i64,
    customer_name: String,
    quote: String,
    rating: i16,
    is_active: bool,
}

impl TryFrom<TestimonialRow> for TestimonialRecord {
    type Error = RepoError;

    fn try_from(row: TestimonialRow) -> Result<Self, Self::Error> {
        let rating = Rating::new(row.rating)
            .map_err(|err| RepoError::integrity(format!("testimonial {}: {err}", row.id)))?;
        Ok(Self {
            id: row.id,
            customer_name: row.customer_name,
            quote: row.quote,
            rating,
            is_active: row.is_active,
        })
    }
}

#[derive(sqlx::FromRow)]
struct FeaturedImageRow {
    id: i64,
    title: String,
    image: String,
    order: i32,
    is_active: bool,
}

impl From<FeaturedImageRow> for FeaturedImageRecord {
    fn from(row: FeaturedImageRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image: row.image,
            order: row.order,
            is_active: row.is_active,
        }
    }
}

#[async_trait]
impl SiteContentRepo for PostgresRepositories {
    async fn list_testimonials(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<TestimonialRecord>, RepoError> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            r#"
            SELECT id, customer_name, quote, rating, is_active
            FROM testimonials
            WHERE is_active
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(limit_param(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(TestimonialRecord::try_from).collect()
    }

    async fn list_featured_images(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeaturedImageRecord>, RepoError> {
        let rows = sqlx::query_as::<_, FeaturedImageRow>(
            r#"
            SELECT id, title, image, "order", is_active
            FROM featured_images
            WHERE is_active
            ORDER BY "order" ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit_param(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(FeaturedImageRecord::from).collect())
    }
}
