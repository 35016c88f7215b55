//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::contact::NewCustomerMessage;
use crate::domain::entities::{
    BlogPostRecord, CustomerMessageRecord, FeaturedImageRecord, FeaturedMenuEntry,
    GalleryImageRecord, MenuItemRecord, TestimonialRecord, UserRecord,
};
use crate::domain::leaderboard::LeaderboardQuery;
use crate::domain::types::GalleryCategory;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }

    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(GalleryCategory),
    /// A category name that does not exist; matches nothing.
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryQueryFilter {
    pub category: CategoryFilter,
    pub glimpses_only: bool,
    pub limit: Option<u32>,
}

#[async_trait]
pub trait MenuRepo: Send + Sync {
    /// Featured entries whose own flag and menu item are both active.
    async fn list_featured_menu(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeaturedMenuEntry>, RepoError>;

    /// Active menu items flagged as featured.
    async fn list_featured_items(&self, limit: Option<u32>)
    -> Result<Vec<MenuItemRecord>, RepoError>;
}

#[async_trait]
pub trait BlogRepo: Send + Sync {
    async fn list_published(&self) -> Result<Vec<BlogPostRecord>, RepoError>;

    async fn list_featured(&self, limit: Option<u32>) -> Result<Vec<BlogPostRecord>, RepoError>;

    async fn find_published_by_slug(&self, slug: &str)
    -> Result<Option<BlogPostRecord>, RepoError>;

    async fn list_related(
        &self,
        exclude_id: i64,
        limit: u32,
    ) -> Result<Vec<BlogPostRecord>, RepoError>;

    /// Bump the view counter and return the new value.
    async fn increment_views(&self, id: i64) -> Result<i64, RepoError>;
}

#[async_trait]
pub trait GalleryRepo: Send + Sync {
    async fn list_images(
        &self,
        filter: &GalleryQueryFilter,
    ) -> Result<Vec<GalleryImageRecord>, RepoError>;
}

#[async_trait]
pub trait SiteContentRepo: Send + Sync {
    async fn list_testimonials(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<TestimonialRecord>, RepoError>;

    async fn list_featured_images(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeaturedImageRecord>, RepoError>;
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    /// Candidate users for the leaderboard; callers still rank the result.
    async fn list_leaderboard(&self, query: &LeaderboardQuery)
    -> Result<Vec<UserRecord>, RepoError>;
}

#[async_trait]
pub trait MessagesRepo: Send + Sync {
    async fn create_message(
        &self,
        message: NewCustomerMessage,
    ) -> Result<CustomerMessageRecord, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
