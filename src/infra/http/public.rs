use std::sync::Arc;

use axum::{
    Form, Router,
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use crate::{
    application::{
        blog::BlogService,
        contact::{ContactError, ContactService},
        error::repo_error_to_http,
        gallery::GalleryService,
        homepage::HomepageService,
        media::MediaUrls,
        repos::HealthRepo,
    },
    domain::contact::ContactSubmission,
    presentation::views::{
        AboutTemplate, BlogDetailTemplate, BlogDetailView, BlogListTemplate, BlogListView,
        ContactTemplate, ContactView, GalleryTemplate, GalleryView, HomeTemplate, HomeView,
        LayoutChrome, LayoutContext, TermsTemplate, WorkflowTemplate, render_not_found_response,
        render_template_response,
    },
};

use super::{
    db_health_response,
    middleware::{log_responses, set_request_context},
};

/// Top-level pages that are also reachable without their trailing slash.
const SLASHED_PAGES: [&str; 6] = ["about", "contact", "blog", "gallery", "terms", "workflow"];

#[derive(Clone)]
pub struct HttpState {
    pub homepage: Arc<HomepageService>,
    pub blog: Arc<BlogService>,
    pub gallery: Arc<GalleryService>,
    pub contact: Arc<ContactService>,
    pub media: Arc<MediaUrls>,
    pub health: Arc<dyn HealthRepo>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/about/", get(about))
        .route("/terms/", get(terms))
        .route("/workflow/", get(workflow))
        .route("/contact/", get(contact_form).post(contact_submit))
        .route("/blog/", get(blog_list))
        .route("/blog/{slug}/", get(blog_detail))
        .route("/gallery/", get(gallery))
        .route("/static/{*path}", get(crate::infra::assets::serve_static))
        .route("/_health/db", get(public_health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn index(State(state): State<HttpState>) -> Response {
    let content = state.homepage.load().await;
    let view = LayoutContext::new(
        LayoutChrome::for_path("/", ""),
        HomeView::build(&content, &state.media),
    );
    render_template_response(HomeTemplate { view }, StatusCode::OK)
}

async fn about() -> Response {
    let view = LayoutContext::new(LayoutChrome::for_path("/about/", "About us"), ());
    render_template_response(AboutTemplate { view }, StatusCode::OK)
}

async fn terms() -> Response {
    let view = LayoutContext::new(LayoutChrome::for_path("/terms/", "Terms of service"), ());
    render_template_response(TermsTemplate { view }, StatusCode::OK)
}

async fn workflow() -> Response {
    let view = LayoutContext::new(LayoutChrome::for_path("/workflow/", "How we work"), ());
    render_template_response(WorkflowTemplate { view }, StatusCode::OK)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactQuery {
    sent: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContactForm {
    name: String,
    email: String,
    phone: String,
    subject: String,
    message: String,
}

impl From<ContactForm> for ContactSubmission {
    fn from(form: ContactForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            phone: form.phone,
            subject: form.subject,
            message: form.message,
        }
    }
}

async fn contact_form(Query(query): Query<ContactQuery>) -> Response {
    let sent = query.sent.as_deref() == Some("1");
    render_contact(ContactView::blank(sent), StatusCode::OK)
}

async fn contact_submit(State(state): State<HttpState>, Form(form): Form<ContactForm>) -> Response {
    const SOURCE: &str = "infra::http::public::contact_submit";

    let submission = ContactSubmission::from(form);
    match state.contact.submit(&submission).await {
        Ok(_) => Redirect::to("/contact/?sent=1").into_response(),
        Err(ContactError::Invalid(err)) => {
            let mut response = render_contact(
                ContactView::invalid(submission, &err),
                StatusCode::UNPROCESSABLE_ENTITY,
            );
            crate::application::error::ErrorReport::from_error(
                SOURCE,
                StatusCode::UNPROCESSABLE_ENTITY,
                &err,
            )
            .attach(&mut response);
            response
        }
        Err(ContactError::Repo(err)) => repo_error_to_http(SOURCE, err).into_response(),
    }
}

fn render_contact(content: ContactView, status: StatusCode) -> Response {
    let view = LayoutContext::new(LayoutChrome::for_path("/contact/", "Contact"), content);
    render_template_response(ContactTemplate { view }, status)
}

async fn blog_list(State(state): State<HttpState>) -> Response {
    match state.blog.list().await {
        Ok(posts) => {
            let view = LayoutContext::new(
                LayoutChrome::for_path("/blog/", "Blog"),
                BlogListView::build(&posts, &state.media),
            );
            render_template_response(BlogListTemplate { view }, StatusCode::OK)
        }
        Err(err) => repo_error_to_http("infra::http::public::blog_list", err).into_response(),
    }
}

async fn blog_detail(State(state): State<HttpState>, Path(slug): Path<String>) -> Response {
    match state.blog.detail(&slug).await {
        Ok(Some(detail)) => {
            let chrome = LayoutChrome::for_path(&format!("/blog/{slug}/"), &detail.post.title)
                .with_description(detail.post.excerpt.clone());
            let view = LayoutContext::new(chrome, BlogDetailView::build(&detail, &state.media));
            render_template_response(BlogDetailTemplate { view }, StatusCode::OK)
        }
        Ok(None) => render_not_found_response(),
        Err(err) => repo_error_to_http("infra::http::public::blog_detail", err).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryQuery {
    category: Option<String>,
}

async fn gallery(State(state): State<HttpState>, Query(query): Query<GalleryQuery>) -> Response {
    match state.gallery.list(query.category.as_deref()).await {
        Ok(listing) => {
            let content = GalleryView::build(&listing, state.gallery.categories(), &state.media);
            let view = LayoutContext::new(LayoutChrome::for_path("/gallery/", "Gallery"), content);
            render_template_response(GalleryTemplate { view }, StatusCode::OK)
        }
        Err(err) => repo_error_to_http("infra::http::public::gallery", err).into_response(),
    }
}

async fn public_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.health.health_check().await)
}

async fn fallback(request: Request<Body>) -> Response {
    match slashed_location(request.uri().path(), request.uri().query()) {
        Some(location) => Redirect::permanent(&location).into_response(),
        None => render_not_found_response(),
    }
}

/// Location of the slashed variant of `path` when it names a known page.
fn slashed_location(path: &str, query: Option<&str>) -> Option<String> {
    if path.ends_with('/') {
        return None;
    }

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    let known = match segments.as_slice() {
        [page] => SLASHED_PAGES.contains(page),
        ["blog", slug] => !slug.is_empty(),
        _ => false,
    };
    if !known {
        return None;
    }

    Some(match query {
        Some(query) if !query.is_empty() => format!("{path}/?{query}"),
        _ => format!("{path}/"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pages_gain_a_trailing_slash() {
        assert_eq!(slashed_location("/about", None).as_deref(), Some("/about/"));
        assert_eq!(
            slashed_location("/gallery", Some("category=food")).as_deref(),
            Some("/gallery/?category=food")
        );
        assert_eq!(
            slashed_location("/blog/first-roast", None).as_deref(),
            Some("/blog/first-roast/")
        );
    }

    #[test]
    fn unknown_paths_are_left_alone() {
        assert_eq!(slashed_location("/menu", None), None);
        assert_eq!(slashed_location("/about/", None), None);
        assert_eq!(slashed_location("/blog/a/b", None), None);
        assert_eq!(slashed_location("/", None), None);
    }
}
