//! Shared domain enumerations aligned with persisted database enums.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "user_type", rename_all = "snake_case")]
pub enum UserType {
    Customer,
    Staff,
    Admin,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Staff => "staff",
            UserType::Admin => "admin",
        }
    }
}

/// Gallery buckets offered as filters on the public gallery page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "gallery_category", rename_all = "snake_case")]
pub enum GalleryCategory {
    Food,
    Interior,
    Events,
    Drinks,
    Other,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 5] = [
        GalleryCategory::Food,
        GalleryCategory::Interior,
        GalleryCategory::Events,
        GalleryCategory::Drinks,
        GalleryCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GalleryCategory::Food => "food",
            GalleryCategory::Interior => "interior",
            GalleryCategory::Events => "events",
            GalleryCategory::Drinks => "drinks",
            GalleryCategory::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GalleryCategory::Food => "Food",
            GalleryCategory::Interior => "Interior",
            GalleryCategory::Events => "Events",
            GalleryCategory::Drinks => "Drinks",
            GalleryCategory::Other => "Other",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GalleryCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| DomainError::validation(format!("unknown gallery category `{value}`")))
    }
}
