use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

use crate::{
    application::repos::{CategoryFilter, GalleryQueryFilter, GalleryRepo, RepoError},
    domain::{entities::GalleryImageRecord, types::GalleryCategory},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct GalleryImageRow {
    id: i64,
    title: String,
    image: String,
    category: GalleryCategory,
    is_active: bool,
    is_zorpido_glimpses: bool,
}

impl From<GalleryImageRow> for GalleryImageRecord {
    fn from(row: GalleryImageRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image: row.image,
            category: row.category,
            is_active: row.is_active,
            is_zorpido_glimpses: row.is_zorpido_glimpses,
        }
    }
}

#[async_trait]
impl GalleryRepo for PostgresRepositories {
    async fn list_images(
        &self,
        filter: &GalleryQueryFilter,
    ) -> Result<Vec<GalleryImageRecord>, RepoError> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT id, title, image, category, is_active, is_zorpido_glimpses \
             FROM gallery_images WHERE is_active",
        );

        match filter.category {
            CategoryFilter::All => {}
            CategoryFilter::Only(category) => {
                qb.push(" AND category = ");
                qb.push_bind(category);
            }
            CategoryFilter::Unknown => {
                qb.push(" AND FALSE");
            }
        }

        if filter.glimpses_only {
            qb.push(" AND is_zorpido_glimpses");
        }

        qb.push(" ORDER BY id DESC");

        if let Some(limit) = filter.limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(limit));
        }

        let rows = qb
            .build_query_as::<GalleryImageRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(GalleryImageRecord::from).collect())
    }
}
