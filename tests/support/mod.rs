#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use time::OffsetDateTime;
use zorpido::{
    application::{
        blog::BlogService,
        contact::ContactService,
        gallery::GalleryService,
        homepage::HomepageService,
        leaderboard::LeaderboardService,
        media::MediaUrls,
        repos::{
            BlogRepo, CategoryFilter, GalleryQueryFilter, GalleryRepo, HealthRepo, MenuRepo,
            MessagesRepo, RepoError, SiteContentRepo, UsersRepo,
        },
    },
    cache::{CacheBackend, CacheConfig, MemoryCache},
    domain::{
        contact::NewCustomerMessage,
        entities::{
            BlogPostRecord, CustomerMessageRecord, FeaturedImageRecord, FeaturedMenuEntry,
            GalleryImageRecord, MenuItemRecord, Rating, TestimonialRecord, UserRecord,
        },
        leaderboard::LeaderboardQuery,
        types::{GalleryCategory, UserType},
    },
    infra::http::HttpState,
};

/// Scripted answer for one fake query.
#[derive(Debug, Clone)]
pub enum Script<T> {
    Rows(Vec<T>),
    Fail,
    Panic,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self::Rows(Vec::new())
    }
}

impl<T: Clone> Script<T> {
    fn run(&self, limit: Option<u32>) -> Result<Vec<T>, RepoError> {
        match self {
            Script::Rows(rows) => Ok(match limit {
                Some(limit) => rows.iter().take(limit as usize).cloned().collect(),
                None => rows.clone(),
            }),
            Script::Fail => Err(RepoError::from_persistence("relation does not exist")),
            Script::Panic => panic!("scripted query panic"),
        }
    }
}

/// In-memory stand-in for every repository trait.
#[derive(Default)]
pub struct FakeStore {
    pub featured_menu: Script<FeaturedMenuEntry>,
    pub featured_items: Script<MenuItemRecord>,
    pub featured_blogs: Script<BlogPostRecord>,
    pub posts: Script<BlogPostRecord>,
    pub gallery: Script<GalleryImageRecord>,
    pub testimonials: Script<TestimonialRecord>,
    pub featured_images: Script<FeaturedImageRecord>,
    pub users: Script<UserRecord>,
    pub unhealthy: bool,
    pub view_count_fails: bool,
    pub fallback_calls: AtomicUsize,
    pub gallery_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub messages: Mutex<Vec<NewCustomerMessage>>,
}

impl FakeStore {
    pub fn fallback_calls(&self) -> usize {
        self.fallback_calls.load(Ordering::SeqCst)
    }

    pub fn gallery_calls(&self) -> usize {
        self.gallery_calls.load(Ordering::SeqCst)
    }

    pub fn user_calls(&self) -> usize {
        self.user_calls.load(Ordering::SeqCst)
    }

    pub fn stored_messages(&self) -> Vec<NewCustomerMessage> {
        self.messages.lock().expect("messages lock").clone()
    }

    fn published_posts(&self) -> Result<Vec<BlogPostRecord>, RepoError> {
        Ok(self
            .posts
            .run(None)?
            .into_iter()
            .filter(|post| post.is_published)
            .collect())
    }
}

#[async_trait]
impl MenuRepo for FakeStore {
    async fn list_featured_menu(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeaturedMenuEntry>, RepoError> {
        self.featured_menu.run(limit)
    }

    async fn list_featured_items(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<MenuItemRecord>, RepoError> {
        self.fallback_calls.fetch_add(1, Ordering::SeqCst);
        self.featured_items.run(limit)
    }
}

#[async_trait]
impl BlogRepo for FakeStore {
    async fn list_published(&self) -> Result<Vec<BlogPostRecord>, RepoError> {
        self.published_posts()
    }

    async fn list_featured(&self, limit: Option<u32>) -> Result<Vec<BlogPostRecord>, RepoError> {
        self.featured_blogs.run(limit)
    }

    async fn find_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogPostRecord>, RepoError> {
        Ok(self
            .published_posts()?
            .into_iter()
            .find(|post| post.slug == slug))
    }

    async fn list_related(
        &self,
        exclude_id: i64,
        limit: u32,
    ) -> Result<Vec<BlogPostRecord>, RepoError> {
        Ok(self
            .published_posts()?
            .into_iter()
            .filter(|post| post.id != exclude_id)
            .take(limit as usize)
            .collect())
    }

    async fn increment_views(&self, id: i64) -> Result<i64, RepoError> {
        if self.view_count_fails {
            return Err(RepoError::from_persistence("could not serialize access"));
        }
        self.published_posts()?
            .into_iter()
            .find(|post| post.id == id)
            .map(|post| post.views + 1)
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl GalleryRepo for FakeStore {
    async fn list_images(
        &self,
        filter: &GalleryQueryFilter,
    ) -> Result<Vec<GalleryImageRecord>, RepoError> {
        self.gallery_calls.fetch_add(1, Ordering::SeqCst);
        let images = self
            .gallery
            .run(None)?
            .into_iter()
            .filter(|image| image.is_active)
            .filter(|image| !filter.glimpses_only || image.is_zorpido_glimpses)
            .filter(|image| match filter.category {
                CategoryFilter::All => true,
                CategoryFilter::Only(category) => image.category == category,
                CategoryFilter::Unknown => false,
            });
        Ok(match filter.limit {
            Some(limit) => images.take(limit as usize).collect(),
            None => images.collect(),
        })
    }
}

#[async_trait]
impl SiteContentRepo for FakeStore {
    async fn list_testimonials(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<TestimonialRecord>, RepoError> {
        self.testimonials.run(limit)
    }

    async fn list_featured_images(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeaturedImageRecord>, RepoError> {
        self.featured_images.run(limit)
    }
}

#[async_trait]
impl UsersRepo for FakeStore {
    async fn list_leaderboard(
        &self,
        _query: &LeaderboardQuery,
    ) -> Result<Vec<UserRecord>, RepoError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        self.users.run(None)
    }
}

#[async_trait]
impl MessagesRepo for FakeStore {
    async fn create_message(
        &self,
        message: NewCustomerMessage,
    ) -> Result<CustomerMessageRecord, RepoError> {
        let mut messages = self.messages.lock().expect("messages lock");
        messages.push(message.clone());
        Ok(CustomerMessageRecord {
            id: messages.len() as i64,
            name: message.name,
            email: message.email,
            phone: message.phone,
            subject: message.subject,
            message: message.message,
            is_read: false,
            replied: false,
            created_at: OffsetDateTime::now_utc(),
        })
    }
}

#[async_trait]
impl HealthRepo for FakeStore {
    async fn health_check(&self) -> Result<(), RepoError> {
        if self.unhealthy {
            Err(RepoError::Timeout)
        } else {
            Ok(())
        }
    }
}

pub fn leaderboard(store: &Arc<FakeStore>, config: &CacheConfig) -> LeaderboardService {
    let cache: Arc<dyn CacheBackend> = Arc::new(MemoryCache::new(config));
    LeaderboardService::new(cache, store.clone(), config)
}

pub fn homepage(store: &Arc<FakeStore>) -> HomepageService {
    HomepageService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        leaderboard(store, &CacheConfig::default()),
    )
}

pub fn http_state(store: &Arc<FakeStore>) -> HttpState {
    HttpState {
        homepage: Arc::new(homepage(store)),
        blog: Arc::new(BlogService::new(store.clone())),
        gallery: Arc::new(GalleryService::new(store.clone())),
        contact: Arc::new(ContactService::new(store.clone())),
        media: Arc::new(MediaUrls::new("/media/")),
        health: store.clone(),
    }
}

pub fn menu_item(id: i64, name: &str, price_cents: i64) -> MenuItemRecord {
    MenuItemRecord {
        id,
        name: name.to_string(),
        description: format!("{name} made fresh"),
        price_cents,
        image: Some(format!("menu/{id}.jpg")),
        is_active: true,
        is_featured: true,
    }
}

pub fn featured_entry(id: i64, item: MenuItemRecord) -> FeaturedMenuEntry {
    FeaturedMenuEntry {
        id,
        display_order: id as i32,
        is_active: true,
        item,
    }
}

pub fn post(id: i64, slug: &str, is_published: bool) -> BlogPostRecord {
    BlogPostRecord {
        id,
        slug: slug.to_string(),
        title: format!("Post {slug}"),
        excerpt: format!("About {slug}"),
        body: "First paragraph.\n\nSecond paragraph.".to_string(),
        cover_image: None,
        is_published,
        is_featured: true,
        published_at: is_published.then(OffsetDateTime::now_utc),
        views: 0,
    }
}

pub fn gallery_image(id: i64, category: GalleryCategory, glimpse: bool) -> GalleryImageRecord {
    GalleryImageRecord {
        id,
        title: format!("{} shot {id}", category.label()),
        image: format!("gallery/{id}.jpg"),
        category,
        is_active: true,
        is_zorpido_glimpses: glimpse,
    }
}

pub fn testimonial(id: i64, stars: i16) -> TestimonialRecord {
    TestimonialRecord {
        id,
        customer_name: format!("Guest {id}"),
        quote: "Lovely coffee.".to_string(),
        rating: Rating::new(stars).expect("valid rating"),
        is_active: true,
    }
}

pub fn banner(id: i64) -> FeaturedImageRecord {
    FeaturedImageRecord {
        id,
        title: format!("Banner {id}"),
        image: format!("banners/{id}.jpg"),
        order: id as i32,
        is_active: true,
    }
}

pub fn user(id: i64, points: i32, user_type: UserType, is_active: bool) -> UserRecord {
    UserRecord {
        id,
        username: format!("user{id}"),
        full_name: format!("User {id}"),
        profile_picture: None,
        loyalty_points: points,
        user_type,
        is_active,
    }
}

pub fn customer(id: i64, points: i32) -> UserRecord {
    user(id, points, UserType::Customer, true)
}
