//! Localized read endpoints for the public site.

use std::time::Duration;

use actix_web::{HttpResponse, http::header::ContentType, web};
use serde::Deserialize;

use forge_core::domain::Exhibition;
use forge_shared::ApiResponse;
use forge_shared::dto::{CategoryDetail, ExhibitionsPage, HomePage};

use super::views::{Localize, localize_all, news_view, product_view};
use crate::middleware::error::{AppError, AppResult};
use crate::middleware::locale::RequestLocale;
use crate::state::{AppState, home_cache_key};

/// How long a rendered home payload is served from cache.
pub const HOME_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Number of news articles on the home page.
const HOME_NEWS_LIMIT: usize = 3;

fn not_found(kind: &str, slug: &str) -> AppError {
    AppError::NotFound(format!("No {kind} with slug '{slug}'"))
}

/// GET /api/{locale}/home
pub async fn home(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let key = home_cache_key(locale);
    if let Some(cached) = state.cache.get(&key).await {
        tracing::debug!(%locale, "Home served from cache");
        return Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(cached));
    }

    let repos = &state.repos;
    let categories = repos.categories.find_all().await?;
    let featured = repos.products.find_featured().await?;
    let news = repos.news.find_published().await?;
    let clients = repos.clients.find_all().await?;
    let exhibitions = repos.exhibitions.find_upcoming(state.today()).await?;

    let page = HomePage {
        locale: locale.code().to_string(),
        dir: if locale.is_rtl() { "rtl" } else { "ltr" }.to_string(),
        categories: localize_all(&categories, locale),
        featured_products: localize_all(&featured, locale),
        latest_news: news
            .iter()
            .take(HOME_NEWS_LIMIT)
            .map(|article| article.localize(locale))
            .collect(),
        clients: localize_all(&clients, locale),
        upcoming_exhibitions: localize_all(&exhibitions, locale),
    };

    let body = serde_json::to_string(&ApiResponse::ok(page))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    if let Err(e) = state.cache.set(&key, &body, Some(HOME_CACHE_TTL)).await {
        tracing::warn!(%locale, error = %e, "Failed to cache home payload");
    }

    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

/// GET /api/{locale}/categories
pub async fn list_categories(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let categories = state.repos.categories.find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(localize_all(&categories, locale))))
}

/// GET /api/{locale}/categories/{slug}
pub async fn category_detail(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (_, slug) = path.into_inner();
    let category = state
        .repos
        .categories
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| not_found("category", &slug))?;
    let products = state.repos.products.find_by_category(category.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryDetail {
        category: category.localize(locale),
        products: localize_all(&products, locale),
    })))
}

#[derive(Debug, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
}

/// GET /api/{locale}/products?category=<slug>
pub async fn list_products(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
    filter: web::Query<ProductFilter>,
) -> AppResult<HttpResponse> {
    let products = match filter.category.as_deref() {
        Some(slug) => {
            let category = state
                .repos
                .categories
                .find_by_slug(slug)
                .await?
                .ok_or_else(|| not_found("category", slug))?;
            state.repos.products.find_by_category(category.id).await?
        }
        None => state.repos.products.find_all().await?,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(localize_all(&products, locale))))
}

/// GET /api/{locale}/products/{slug}
pub async fn product_detail(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (_, slug) = path.into_inner();
    let product = state
        .repos
        .products
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| not_found("product", &slug))?;
    let category = state.repos.categories.find_by_id(product.category_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(product_view(
        &product,
        category.as_ref(),
        locale,
    ))))
}

/// GET /api/{locale}/solutions
pub async fn list_solutions(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let solutions = state.repos.solutions.find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(localize_all(&solutions, locale))))
}

/// GET /api/{locale}/solutions/{slug}
pub async fn solution_detail(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (_, slug) = path.into_inner();
    let solution = state
        .repos
        .solutions
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| not_found("solution", &slug))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(solution.localize(locale))))
}

/// GET /api/{locale}/news
pub async fn list_news(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let articles = state.repos.news.find_published().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(localize_all(&articles, locale))))
}

/// GET /api/{locale}/news/{slug}
///
/// Drafts are indistinguishable from missing articles.
pub async fn news_detail(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (_, slug) = path.into_inner();
    let article = state
        .repos
        .news
        .find_by_slug(&slug)
        .await?
        .filter(|a| a.published)
        .ok_or_else(|| not_found("news article", &slug))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(news_view(&article, locale))))
}

/// GET /api/{locale}/exhibitions
pub async fn list_exhibitions(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let today = state.today();
    let (mut upcoming, mut past): (Vec<Exhibition>, Vec<Exhibition>) = state
        .repos
        .exhibitions
        .find_all()
        .await?
        .into_iter()
        .partition(|e| e.is_upcoming(today));

    upcoming.sort_by_key(|e| e.start_date);
    past.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ExhibitionsPage {
        upcoming: localize_all(&upcoming, locale),
        past: localize_all(&past, locale),
    })))
}

/// GET /api/{locale}/certificates
pub async fn list_certificates(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let certificates = state.repos.certificates.find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(localize_all(&certificates, locale))))
}

/// GET /api/{locale}/clients
pub async fn list_clients(
    state: web::Data<AppState>,
    RequestLocale(locale): RequestLocale,
) -> AppResult<HttpResponse> {
    let clients = state.repos.clients.find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(localize_all(&clients, locale))))
}
