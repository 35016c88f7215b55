use async_trait::async_trait;

use crate::{
    application::repos::{MenuRepo, RepoError},
    domain::entities::{FeaturedMenuEntry, MenuItemRecord},
};

use super::{PostgresRepositories, limit_param, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: i64,
    name: String,
    description: String,
    price_cents: i64,
    image: Option<String>,
    is_active: bool,
    is_featured: bool,
}

impl From<MenuItemRow> for MenuItemRecord {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            image: row.image,
            is_active: row.is_active,
            is_featured: row.is_featured,
        }
    }
}

#[derive(sqlx::FromRow)]
struct FeaturedMenuRow {
    entry_id: i64,
    display_order: i32,
    entry_active: bool,
    #[sqlx(flatten)]
    item: MenuItemRow,
}

impl From<FeaturedMenuRow> for FeaturedMenuEntry {
    fn from(row: FeaturedMenuRow) -> Self {
        Self {
            id: row.entry_id,
            display_order: row.display_order,
            is_active: row.entry_active,
            item: row.item.into(),
        }
    }
}

#[async_trait]
impl MenuRepo for PostgresRepositories {
    async fn list_featured_menu(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeaturedMenuEntry>, RepoError> {
        let rows = sqlx::query_as::<_, FeaturedMenuRow>(
            r#"
            SELECT
                f.id AS entry_id,
                f.display_order,
                f.is_active AS entry_active,
                m.id,
                m.name,
                m.description,
                m.price_cents,
                m.image,
                m.is_active,
                m.is_featured
            FROM featured_menu_entries f
            INNER JOIN menu_items m ON m.id = f.menu_item_id
            WHERE f.is_active AND m.is_active
            ORDER BY f.display_order ASC, f.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit_param(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(FeaturedMenuEntry::from).collect())
    }

    async fn list_featured_items(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<MenuItemRecord>, RepoError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(
            r#"
            SELECT id, name, description, price_cents, image, is_active, is_featured
            FROM menu_items
            WHERE is_active AND is_featured
            ORDER BY name ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit_param(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(MenuItemRecord::from).collect())
    }
}
