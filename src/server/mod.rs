//! Development server rendering pages on every request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::BlogService;
use crate::helpers::locale_url;
use crate::pages::Pages;
use crate::Site;

/// Server state
struct ServerState {
    site: Site,
    blog: BlogService,
    pages: Pages,
}

impl ServerState {
    fn is_site_locale(&self, locale: &str) -> bool {
        self.site.config.site_locales().iter().any(|l| l == locale)
    }
}

/// Build the application router
pub fn router(site: &Site) -> Result<Router> {
    let state = Arc::new(ServerState {
        site: site.clone(),
        blog: site.blog(),
        pages: Pages::new(site)?,
    });

    Ok(Router::new()
        .route("/", get(root_handler))
        .route("/api/blog", get(api_list_handler))
        .route("/api/blog/:slug", get(api_post_handler))
        .route("/:locale", get(home_handler))
        .route("/:locale/blog", get(blog_index_handler))
        .route("/:locale/blog/:slug", get(blog_post_handler))
        .fallback(asset_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the development server
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let app = router(site)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler(State(state): State<Arc<ServerState>>) -> Redirect {
    let config = &state.site.config;
    Redirect::temporary(&locale_url(config, &config.default_locale, ""))
}

async fn home_handler(
    State(state): State<Arc<ServerState>>,
    Path(locale): Path<String>,
    request: Request<Body>,
) -> Response {
    if !state.is_site_locale(&locale) {
        return serve_asset(&state, request).await;
    }
    match state.blog.get_all_blog_posts().await {
        Ok(posts) => render(state.pages.home(&locale, &posts)),
        Err(e) => internal_error(e),
    }
}

async fn blog_index_handler(
    State(state): State<Arc<ServerState>>,
    Path(locale): Path<String>,
    request: Request<Body>,
) -> Response {
    if !state.is_site_locale(&locale) {
        return serve_asset(&state, request).await;
    }
    match state.blog.get_all_blog_posts().await {
        Ok(posts) => render(state.pages.blog_index(&locale, &posts)),
        Err(e) => internal_error(e),
    }
}

async fn blog_post_handler(
    State(state): State<Arc<ServerState>>,
    Path((locale, slug)): Path<(String, String)>,
    request: Request<Body>,
) -> Response {
    if !state.is_site_locale(&locale) {
        return serve_asset(&state, request).await;
    }
    match state.blog.get_blog_post_by_slug(&slug, &locale).await {
        Some(post) => render(state.pages.blog_post(&locale, &post)),
        None => not_found(&state, &locale),
    }
}

async fn api_list_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.blog.get_all_blog_posts().await {
        Ok(posts) => Json(posts).into_response(),
        Err(e) => internal_error(e),
    }
}

#[derive(Debug, Deserialize)]
struct LocaleQuery {
    locale: Option<String>,
}

async fn api_post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Response {
    let locale = query
        .locale
        .unwrap_or_else(|| state.site.config.default_locale.clone());
    match state.blog.get_blog_post_by_slug(&slug, &locale).await {
        Some(post) => Json(post).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Anything that is not a page comes from the assets directory
async fn asset_handler(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    serve_asset(&state, request).await
}

async fn serve_asset(state: &ServerState, request: Request<Body>) -> Response {
    let mut service = ServeDir::new(&state.site.assets_dir);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(e) => internal_error(e),
    }
}

fn render(page: Result<String>) -> Response {
    match page {
        Ok(html) => Html(html).into_response(),
        Err(e) => internal_error(e),
    }
}

fn not_found(state: &ServerState, locale: &str) -> Response {
    match state.pages.not_found(locale) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => internal_error(e),
    }
}

fn internal_error(e: impl std::fmt::Display) -> Response {
    tracing::error!("Request failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}
