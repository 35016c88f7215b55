//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::{
    error::DomainError,
    types::{GalleryCategory, UserType},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItemRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub image: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// A curated homepage entry pointing at a menu item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedMenuEntry {
    pub id: i64,
    pub display_order: i32,
    pub is_active: bool,
    pub item: MenuItemRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPostRecord {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub published_at: Option<OffsetDateTime>,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryImageRecord {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub category: GalleryCategory,
    pub is_active: bool,
    pub is_zorpido_glimpses: bool,
}

/// Star rating between one and five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: i16) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(stars) if (1..=Self::MAX).contains(&stars) => Ok(Self(stars)),
            _ => Err(DomainError::validation(format!(
                "rating must be between 1 and {}, got {value}",
                Self::MAX
            ))),
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestimonialRecord {
    pub id: i64,
    pub customer_name: String,
    pub quote: String,
    pub rating: Rating,
    pub is_active: bool,
}

/// Homepage banner image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturedImageRecord {
    pub id: i64,
    pub title: String,
    pub image: String,
    pub order: i32,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub profile_picture: Option<String>,
    pub loyalty_points: i32,
    pub user_type: UserType,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerMessageRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub replied: bool,
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_one_to_five() {
        assert_eq!(Rating::new(1).expect("lower bound").stars(), 1);
        assert_eq!(Rating::new(5).expect("upper bound").stars(), 5);
    }

    #[test]
    fn rating_rejects_out_of_range_values() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert!(Rating::new(-3).is_err());
    }
}
