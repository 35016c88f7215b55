use std::{str::FromStr, sync::Arc};

use crate::application::repos::{CategoryFilter, GalleryQueryFilter, GalleryRepo, RepoError};
use crate::domain::entities::GalleryImageRecord;
use crate::domain::types::GalleryCategory;

/// Interpret the `category` query parameter.
///
/// A missing value or `all` shows everything; names outside the known set
/// match nothing.
pub fn parse_category(raw: Option<&str>) -> CategoryFilter {
    let Some(value) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return CategoryFilter::All;
    };
    if value.eq_ignore_ascii_case("all") {
        return CategoryFilter::All;
    }
    GalleryCategory::from_str(value)
        .map(CategoryFilter::Only)
        .unwrap_or(CategoryFilter::Unknown)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryListing {
    pub images: Vec<GalleryImageRecord>,
    pub filter: CategoryFilter,
    /// The raw selection as requested, echoed back to the page.
    pub selected: Option<String>,
}

#[derive(Clone)]
pub struct GalleryService {
    images: Arc<dyn GalleryRepo>,
}

impl GalleryService {
    pub fn new(images: Arc<dyn GalleryRepo>) -> Self {
        Self { images }
    }

    pub fn categories(&self) -> &'static [GalleryCategory] {
        &GalleryCategory::ALL
    }

    pub async fn list(&self, category: Option<&str>) -> Result<GalleryListing, RepoError> {
        let filter = parse_category(category);
        let images = match filter {
            CategoryFilter::Unknown => Vec::new(),
            CategoryFilter::All | CategoryFilter::Only(_) => {
                let query = GalleryQueryFilter {
                    category: filter,
                    ..Default::default()
                };
                self.images.list_images(&query).await?
            }
        };

        let selected = match filter {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category.as_str().to_string()),
            CategoryFilter::Unknown => category.map(|value| value.trim().to_string()),
        };

        Ok(GalleryListing {
            images,
            filter,
            selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parsing() {
        assert_eq!(parse_category(None), CategoryFilter::All);
        assert_eq!(parse_category(Some("")), CategoryFilter::All);
        assert_eq!(parse_category(Some("ALL")), CategoryFilter::All);
        assert_eq!(
            parse_category(Some("Drinks")),
            CategoryFilter::Only(GalleryCategory::Drinks)
        );
        assert_eq!(parse_category(Some("desserts")), CategoryFilter::Unknown);
    }
}
