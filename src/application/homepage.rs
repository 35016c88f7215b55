//! Homepage content aggregation.
//!
//! Every slice is loaded through [`query_slice`], so a failing table leaves
//! its section empty while the rest of the page still renders.

use std::sync::Arc;

use crate::application::leaderboard::LeaderboardService;
use crate::application::repos::{
    BlogRepo, GalleryQueryFilter, GalleryRepo, MenuRepo, SiteContentRepo,
};
use crate::application::safe_query::{SliceOutcome, fail_soft, query_slice};
use crate::domain::entities::{
    BlogPostRecord, FeaturedImageRecord, FeaturedMenuEntry, GalleryImageRecord, MenuItemRecord,
    TestimonialRecord,
};
use crate::domain::leaderboard::LeaderboardEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomepageSlice {
    FeaturedMenu,
    FallbackMenu,
    FeaturedBlogs,
    GalleryGlimpses,
    Testimonials,
    FeaturedImages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceDescriptor {
    pub slice: HomepageSlice,
    pub label: &'static str,
    pub cap: Option<u32>,
}

/// Homepage slices in evaluation order.
pub const HOMEPAGE_SLICES: [SliceDescriptor; 6] = [
    SliceDescriptor {
        slice: HomepageSlice::FeaturedMenu,
        label: "featured_menu",
        cap: None,
    },
    SliceDescriptor {
        slice: HomepageSlice::FallbackMenu,
        label: "fallback_menu",
        cap: Some(6),
    },
    SliceDescriptor {
        slice: HomepageSlice::FeaturedBlogs,
        label: "featured_blogs",
        cap: Some(3),
    },
    SliceDescriptor {
        slice: HomepageSlice::GalleryGlimpses,
        label: "gallery_glimpses",
        cap: None,
    },
    SliceDescriptor {
        slice: HomepageSlice::Testimonials,
        label: "testimonials",
        cap: Some(6),
    },
    SliceDescriptor {
        slice: HomepageSlice::FeaturedImages,
        label: "featured_images",
        cap: Some(10),
    },
];

const LEADERBOARD_LABEL: &str = "leaderboard";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomepageContent {
    pub featured_items: SliceOutcome<FeaturedMenuEntry>,
    /// `None` when the featured menu had rows and the fallback was not consulted.
    pub fallback_items: Option<SliceOutcome<MenuItemRecord>>,
    pub featured_blogs: SliceOutcome<BlogPostRecord>,
    pub gallery_images: SliceOutcome<GalleryImageRecord>,
    pub testimonials: SliceOutcome<TestimonialRecord>,
    pub featured_images: SliceOutcome<FeaturedImageRecord>,
    pub leaderboard_users: Vec<LeaderboardEntry>,
}

impl HomepageContent {
    /// Menu items to display: featured entries when present, otherwise the fallback.
    pub fn menu_items(&self) -> Vec<&MenuItemRecord> {
        if self.featured_items.has_rows() {
            return self.featured_items.rows().iter().map(|entry| &entry.item).collect();
        }
        self.fallback_items
            .as_ref()
            .map(|fallback| fallback.rows().iter().collect())
            .unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct HomepageService {
    menu: Arc<dyn MenuRepo>,
    blog: Arc<dyn BlogRepo>,
    gallery: Arc<dyn GalleryRepo>,
    content: Arc<dyn SiteContentRepo>,
    leaderboard: LeaderboardService,
}

impl HomepageService {
    pub fn new(
        menu: Arc<dyn MenuRepo>,
        blog: Arc<dyn BlogRepo>,
        gallery: Arc<dyn GalleryRepo>,
        content: Arc<dyn SiteContentRepo>,
        leaderboard: LeaderboardService,
    ) -> Self {
        Self {
            menu,
            blog,
            gallery,
            content,
            leaderboard,
        }
    }

    pub async fn load(&self) -> HomepageContent {
        let mut content = HomepageContent::default();

        for descriptor in HOMEPAGE_SLICES {
            match descriptor.slice {
                HomepageSlice::FeaturedMenu => {
                    content.featured_items = query_slice(
                        descriptor.label,
                        self.menu.list_featured_menu(descriptor.cap),
                    )
                    .await;
                }
                HomepageSlice::FallbackMenu => {
                    if !content.featured_items.has_rows() {
                        content.fallback_items = Some(
                            query_slice(
                                descriptor.label,
                                self.menu.list_featured_items(descriptor.cap),
                            )
                            .await,
                        );
                    }
                }
                HomepageSlice::FeaturedBlogs => {
                    content.featured_blogs = query_slice(
                        descriptor.label,
                        self.blog.list_featured(descriptor.cap),
                    )
                    .await;
                }
                HomepageSlice::GalleryGlimpses => {
                    let filter = GalleryQueryFilter {
                        glimpses_only: true,
                        limit: descriptor.cap,
                        ..Default::default()
                    };
                    content.gallery_images =
                        query_slice(descriptor.label, self.gallery.list_images(&filter)).await;
                }
                HomepageSlice::Testimonials => {
                    content.testimonials = query_slice(
                        descriptor.label,
                        self.content.list_testimonials(descriptor.cap),
                    )
                    .await;
                }
                HomepageSlice::FeaturedImages => {
                    content.featured_images = query_slice(
                        descriptor.label,
                        self.content.list_featured_images(descriptor.cap),
                    )
                    .await;
                }
            }
        }

        content.leaderboard_users =
            fail_soft(LEADERBOARD_LABEL, self.leaderboard.top_users(), Vec::new()).await;

        content
    }
}
