use crate::application::blog::BlogDetail;
use crate::application::error::{ErrorReport, HttpError};
use crate::application::gallery::GalleryListing;
use crate::application::homepage::HomepageContent;
use crate::application::media::MediaUrls;
use crate::application::repos::CategoryFilter;
use crate::domain::contact::{ContactSubmission, ContactValidationError};
use crate::domain::entities::{
    BlogPostRecord, FeaturedImageRecord, GalleryImageRecord, MenuItemRecord, TestimonialRecord,
};
use crate::domain::leaderboard::LeaderboardEntry;
use crate::domain::types::GalleryCategory;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

const SITE_NAME: &str = "Zorpido";
const SITE_TAGLINE: &str = "Coffee, kitchen and good company.";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let view = LayoutContext::new(
        LayoutChrome::for_path("", "Page not found"),
        ErrorPageView::not_found(),
    );
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct NavigationLinkView {
    pub label: &'static str,
    pub href: &'static str,
    pub current: bool,
}

const NAVIGATION: [(&str, &str); 6] = [
    ("Home", "/"),
    ("About", "/about/"),
    ("Blog", "/blog/"),
    ("Gallery", "/gallery/"),
    ("Workflow", "/workflow/"),
    ("Contact", "/contact/"),
];

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

/// Site-wide frame shared by every page.
#[derive(Clone)]
pub struct LayoutChrome {
    pub site_name: &'static str,
    pub tagline: &'static str,
    pub navigation: Vec<NavigationLinkView>,
    pub meta: PageMetaView,
    pub year: i32,
}

impl LayoutChrome {
    /// Chrome for the page at `path`, highlighting the matching navigation entry.
    pub fn for_path(path: &str, title: &str) -> Self {
        let navigation = NAVIGATION
            .iter()
            .map(|&(label, href)| NavigationLinkView {
                label,
                href,
                current: is_current(href, path),
            })
            .collect();

        let title = if title.is_empty() {
            SITE_NAME.to_string()
        } else {
            format!("{title} · {SITE_NAME}")
        };

        Self {
            site_name: SITE_NAME,
            tagline: SITE_TAGLINE,
            navigation,
            meta: PageMetaView {
                title,
                description: SITE_TAGLINE.to_string(),
            },
            year: OffsetDateTime::now_utc().year(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        if !description.trim().is_empty() {
            self.meta.description = description;
        }
        self
    }
}

fn is_current(href: &str, path: &str) -> bool {
    if href == "/" {
        path == "/"
    } else {
        !path.is_empty() && path.starts_with(href)
    }
}

pub struct LayoutContext<T> {
    pub site_name: &'static str,
    pub tagline: &'static str,
    pub navigation: Vec<NavigationLinkView>,
    pub meta: PageMetaView,
    pub year: i32,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(chrome: LayoutChrome, content: T) -> Self {
        Self {
            site_name: chrome.site_name,
            tagline: chrome.tagline,
            navigation: chrome.navigation,
            meta: chrome.meta,
            year: chrome.year,
            content,
        }
    }
}

// Cards shared across pages.

#[derive(Clone)]
pub struct MenuCardView {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
}

impl MenuCardView {
    fn build(item: &MenuItemRecord, media: &MediaUrls) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: format_price(item.price_cents),
            image_url: media.resolve_opt(item.image.as_deref()),
        }
    }
}

#[derive(Clone)]
pub struct PostCardView {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub cover_url: String,
    pub iso_date: String,
    pub published: String,
}

impl PostCardView {
    fn build(post: &BlogPostRecord, media: &MediaUrls) -> Self {
        let (iso_date, published) = format_published(post.published_at);
        Self {
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            cover_url: media.resolve_opt(post.cover_image.as_deref()),
            iso_date,
            published,
        }
    }
}

#[derive(Clone)]
pub struct GalleryTileView {
    pub title: String,
    pub image_url: String,
    pub category: &'static str,
}

impl GalleryTileView {
    fn build(image: &GalleryImageRecord, media: &MediaUrls) -> Self {
        Self {
            title: image.title.clone(),
            image_url: media.resolve(&image.image),
            category: image.category.label(),
        }
    }
}

#[derive(Clone)]
pub struct BannerView {
    pub title: String,
    pub image_url: String,
}

impl BannerView {
    fn build(image: &FeaturedImageRecord, media: &MediaUrls) -> Self {
        Self {
            title: image.title.clone(),
            image_url: media.resolve(&image.image),
        }
    }
}

#[derive(Clone)]
pub struct TestimonialView {
    pub customer_name: String,
    pub quote: String,
    pub stars: String,
    pub rating: u8,
}

impl From<&TestimonialRecord> for TestimonialView {
    fn from(testimonial: &TestimonialRecord) -> Self {
        let rating = testimonial.rating.stars();
        Self {
            customer_name: testimonial.customer_name.clone(),
            quote: testimonial.quote.clone(),
            stars: "★".repeat(usize::from(rating)),
            rating,
        }
    }
}

#[derive(Clone)]
pub struct LeaderView {
    pub rank: usize,
    pub display_name: String,
    pub username: String,
    pub avatar_url: String,
    pub initial: String,
    pub loyalty_points: i32,
}

impl LeaderView {
    fn build(rank: usize, entry: &LeaderboardEntry, media: &MediaUrls) -> Self {
        let display_name = entry.display_name().to_string();
        let initial: String = display_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();
        Self {
            rank,
            display_name,
            username: entry.username.clone(),
            avatar_url: media.resolve_opt(entry.profile_picture.as_deref()),
            initial,
            loyalty_points: entry.loyalty_points,
        }
    }
}

// Homepage.

pub struct HomeView {
    pub banners: Vec<BannerView>,
    pub menu_items: Vec<MenuCardView>,
    pub blogs: Vec<PostCardView>,
    pub glimpses: Vec<GalleryTileView>,
    pub testimonials: Vec<TestimonialView>,
    pub leaders: Vec<LeaderView>,
}

impl HomeView {
    pub fn build(content: &HomepageContent, media: &MediaUrls) -> Self {
        Self {
            banners: content
                .featured_images
                .rows()
                .iter()
                .map(|image| BannerView::build(image, media))
                .collect(),
            menu_items: content
                .menu_items()
                .into_iter()
                .map(|item| MenuCardView::build(item, media))
                .collect(),
            blogs: content
                .featured_blogs
                .rows()
                .iter()
                .map(|post| PostCardView::build(post, media))
                .collect(),
            glimpses: content
                .gallery_images
                .rows()
                .iter()
                .map(|image| GalleryTileView::build(image, media))
                .collect(),
            testimonials: content
                .testimonials
                .rows()
                .iter()
                .map(TestimonialView::from)
                .collect(),
            leaders: content
                .leaderboard_users
                .iter()
                .enumerate()
                .map(|(index, entry)| LeaderView::build(index + 1, entry, media))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub view: LayoutContext<HomeView>,
}

// Static pages.

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub view: LayoutContext<()>,
}

#[derive(Template)]
#[template(path = "terms.html")]
pub struct TermsTemplate {
    pub view: LayoutContext<()>,
}

#[derive(Template)]
#[template(path = "workflow.html")]
pub struct WorkflowTemplate {
    pub view: LayoutContext<()>,
}

// Blog.

pub struct BlogListView {
    pub posts: Vec<PostCardView>,
}

impl BlogListView {
    pub fn build(posts: &[BlogPostRecord], media: &MediaUrls) -> Self {
        Self {
            posts: posts
                .iter()
                .map(|post| PostCardView::build(post, media))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog_list.html")]
pub struct BlogListTemplate {
    pub view: LayoutContext<BlogListView>,
}

pub struct BlogDetailView {
    pub title: String,
    pub cover_url: String,
    pub iso_date: String,
    pub published: String,
    pub views: i64,
    pub paragraphs: Vec<String>,
    pub related: Vec<PostCardView>,
}

impl BlogDetailView {
    pub fn build(detail: &BlogDetail, media: &MediaUrls) -> Self {
        let post = &detail.post;
        let (iso_date, published) = format_published(post.published_at);
        Self {
            title: post.title.clone(),
            cover_url: media.resolve_opt(post.cover_image.as_deref()),
            iso_date,
            published,
            views: post.views,
            paragraphs: split_paragraphs(&post.body),
            related: detail
                .related
                .rows()
                .iter()
                .map(|related| PostCardView::build(related, media))
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "blog_detail.html")]
pub struct BlogDetailTemplate {
    pub view: LayoutContext<BlogDetailView>,
}

// Gallery.

pub struct CategoryTabView {
    pub href: String,
    pub label: &'static str,
    pub current: bool,
}

pub struct GalleryView {
    pub tabs: Vec<CategoryTabView>,
    pub images: Vec<GalleryTileView>,
    pub selected: Option<String>,
}

impl GalleryView {
    pub fn build(
        listing: &GalleryListing,
        categories: &[GalleryCategory],
        media: &MediaUrls,
    ) -> Self {
        let mut tabs = Vec::with_capacity(categories.len() + 1);
        tabs.push(CategoryTabView {
            href: "/gallery/?category=all".to_string(),
            label: "All",
            current: listing.filter == CategoryFilter::All,
        });
        tabs.extend(categories.iter().map(|category| CategoryTabView {
            href: format!("/gallery/?category={}", category.as_str()),
            label: category.label(),
            current: listing.filter == CategoryFilter::Only(*category),
        }));

        Self {
            tabs,
            images: listing
                .images
                .iter()
                .map(|image| GalleryTileView::build(image, media))
                .collect(),
            selected: listing.selected.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub view: LayoutContext<GalleryView>,
}

// Contact.

#[derive(Default)]
pub struct ContactFieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl From<&ContactValidationError> for ContactFieldErrors {
    fn from(err: &ContactValidationError) -> Self {
        let field = |name: &str| err.message_for(name).map(str::to_string);
        Self {
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            subject: field("subject"),
            message: field("message"),
        }
    }
}

pub struct ContactView {
    pub form: ContactSubmission,
    pub errors: ContactFieldErrors,
    pub sent: bool,
    pub has_errors: bool,
}

impl ContactView {
    pub fn blank(sent: bool) -> Self {
        Self {
            form: ContactSubmission::default(),
            errors: ContactFieldErrors::default(),
            sent,
            has_errors: false,
        }
    }

    pub fn invalid(form: ContactSubmission, err: &ContactValidationError) -> Self {
        Self {
            form,
            errors: ContactFieldErrors::from(err),
            sent: false,
            has_errors: true,
        }
    }
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub view: LayoutContext<ContactView>,
}

// Errors.

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to home".to_string(),
        }
    }
}

pub struct ErrorPageView {
    pub status_code: u16,
    pub title: String,
    pub message: String,
    pub action: ErrorAction,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND.as_u16(),
            title: "Page not found".to_string(),
            message: "The page you were looking for has moved or never existed.".to_string(),
            action: ErrorAction::home(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

/// Format an amount in minor units as `Rs. 1,250.00`.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("Rs. {sign}{grouped}.{:02}", cents % 100)
}

fn format_published(published_at: Option<OffsetDateTime>) -> (String, String) {
    let Some(at) = published_at else {
        return (String::new(), String::new());
    };
    let iso = at.format(&Rfc3339).unwrap_or_default();
    let human = at
        .format(format_description!("[month repr:long] [day padding:none], [year]"))
        .unwrap_or_default();
    (iso, human)
}

fn split_paragraphs(body: &str) -> Vec<String> {
    body.split("\n\n")
        .map(|paragraph| paragraph.trim())
        .filter(|paragraph| !paragraph.is_empty())
        .map(str::to_string)
        .collect()
}
