//! Dashboard CRUD shared by every catalog entity.
//!
//! Each entity plugs into the generic handlers through [`AdminResource`];
//! successful writes drop the cached home payloads.

use actix_web::{HttpResponse, web};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use forge_core::domain::{
    Category, Certificate, Client, Exhibition, LocalizedText, NewsArticle, Product, ProductSpec,
    Solution, validate_slug,
};
use forge_core::ports::{
    BaseRepository, CategoryRepository, CertificateRepository, ClientRepository,
    ExhibitionRepository, MediaError, NewsRepository, ProductRepository, SolutionRepository,
};
use forge_shared::ApiResponse;
use forge_shared::dto::{
    CategoryInput, CertificateInput, ClientInput, ExhibitionInput, LocalizedInput, NewsInput,
    ProductInput, SolutionInput,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// An entity editable from the dashboard.
#[async_trait(?Send)]
pub trait AdminResource: 'static {
    type Entity: Serialize + Send + Sync + 'static;
    type Input: DeserializeOwned + Validate + 'static;
    type Repo: BaseRepository<Self::Entity, Uuid> + ?Sized;

    /// Singular name used in messages.
    const NAME: &'static str;

    fn repo(state: &AppState) -> &Self::Repo;

    fn create(input: Self::Input) -> AppResult<Self::Entity>;

    /// Overwrite `entity` with the submitted fields.
    fn apply(entity: &mut Self::Entity, input: Self::Input) -> AppResult<()>;

    /// Checks that need other repositories.
    async fn check(_state: &AppState, _entity: &Self::Entity) -> AppResult<()> {
        Ok(())
    }

    /// Uploaded files referenced by `entity`, removed along with it.
    fn media(entity: &Self::Entity) -> Vec<String>;
}

fn text(input: LocalizedInput) -> LocalizedText {
    LocalizedText::new(input.ar.trim(), input.en.trim(), input.tr.trim())
}

fn required(value: LocalizedInput, field: &str) -> AppResult<LocalizedText> {
    let value = text(value);
    if value.en.is_empty() {
        return Err(AppError::Validation(vec![format!(
            "{field}: English text is required"
        )]));
    }
    Ok(value)
}

fn slug(value: &str) -> AppResult<String> {
    let value = value.trim().to_string();
    validate_slug(&value)?;
    Ok(value)
}

pub struct Categories;

impl AdminResource for Categories {
    type Entity = Category;
    type Input = CategoryInput;
    type Repo = dyn CategoryRepository;
    const NAME: &'static str = "category";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.categories.as_ref()
    }

    fn create(input: CategoryInput) -> AppResult<Category> {
        let mut category = Category::new(slug(&input.slug)?, LocalizedText::default());
        Self::apply(&mut category, input)?;
        Ok(category)
    }

    fn apply(category: &mut Category, input: CategoryInput) -> AppResult<()> {
        category.slug = slug(&input.slug)?;
        category.name = required(input.name, "name")?;
        category.description = text(input.description);
        category.image_url = input.image_url;
        category.sort_order = input.sort_order;
        category.updated_at = Utc::now();
        Ok(())
    }

    fn media(category: &Category) -> Vec<String> {
        category.image_url.iter().cloned().collect()
    }
}

pub struct Products;

#[async_trait(?Send)]
impl AdminResource for Products {
    type Entity = Product;
    type Input = ProductInput;
    type Repo = dyn ProductRepository;
    const NAME: &'static str = "product";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.products.as_ref()
    }

    fn create(input: ProductInput) -> AppResult<Product> {
        let mut product = Product::new(
            input.category_id,
            slug(&input.slug)?,
            LocalizedText::default(),
        );
        Self::apply(&mut product, input)?;
        Ok(product)
    }

    fn apply(product: &mut Product, input: ProductInput) -> AppResult<()> {
        product.category_id = input.category_id;
        product.slug = slug(&input.slug)?;
        product.name = required(input.name, "name")?;
        product.description = text(input.description);
        product.specifications = input
            .specifications
            .into_iter()
            .map(|spec| ProductSpec {
                label: text(spec.label),
                value: spec.value.trim().to_string(),
            })
            .collect();
        product.images = input.images;
        product.featured = input.featured;
        product.sort_order = input.sort_order;
        product.updated_at = Utc::now();
        Ok(())
    }

    async fn check(state: &AppState, product: &Product) -> AppResult<()> {
        if state
            .repos
            .categories
            .find_by_id(product.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(vec![format!(
                "category_id: no category with id {}",
                product.category_id
            )]));
        }
        Ok(())
    }

    fn media(product: &Product) -> Vec<String> {
        product.images.clone()
    }
}

pub struct Solutions;

impl AdminResource for Solutions {
    type Entity = Solution;
    type Input = SolutionInput;
    type Repo = dyn SolutionRepository;
    const NAME: &'static str = "solution";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.solutions.as_ref()
    }

    fn create(input: SolutionInput) -> AppResult<Solution> {
        let mut solution = Solution::new(slug(&input.slug)?, LocalizedText::default());
        Self::apply(&mut solution, input)?;
        Ok(solution)
    }

    fn apply(solution: &mut Solution, input: SolutionInput) -> AppResult<()> {
        solution.slug = slug(&input.slug)?;
        solution.title = required(input.title, "title")?;
        solution.description = text(input.description);
        solution.image_url = input.image_url;
        solution.diagram_url = input.diagram_url;
        solution.sort_order = input.sort_order;
        solution.updated_at = Utc::now();
        Ok(())
    }

    fn media(solution: &Solution) -> Vec<String> {
        [&solution.image_url, &solution.diagram_url]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

pub struct News;

impl AdminResource for News {
    type Entity = NewsArticle;
    type Input = NewsInput;
    type Repo = dyn NewsRepository;
    const NAME: &'static str = "news article";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.news.as_ref()
    }

    fn create(input: NewsInput) -> AppResult<NewsArticle> {
        let mut article = NewsArticle::new(slug(&input.slug)?, LocalizedText::default());
        Self::apply(&mut article, input)?;
        Ok(article)
    }

    fn apply(article: &mut NewsArticle, input: NewsInput) -> AppResult<()> {
        article.slug = slug(&input.slug)?;
        article.title = required(input.title, "title")?;
        article.summary = text(input.summary);
        article.content = text(input.content);
        article.cover_image = input.cover_image;
        article.set_published(input.published);
        article.updated_at = Utc::now();
        Ok(())
    }

    fn media(article: &NewsArticle) -> Vec<String> {
        article.cover_image.iter().cloned().collect()
    }
}

pub struct Exhibitions;

impl AdminResource for Exhibitions {
    type Entity = Exhibition;
    type Input = ExhibitionInput;
    type Repo = dyn ExhibitionRepository;
    const NAME: &'static str = "exhibition";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.exhibitions.as_ref()
    }

    fn create(input: ExhibitionInput) -> AppResult<Exhibition> {
        let mut exhibition = Exhibition::new(
            LocalizedText::default(),
            LocalizedText::default(),
            input.start_date,
            input.end_date,
        )?;
        Self::apply(&mut exhibition, input)?;
        Ok(exhibition)
    }

    fn apply(exhibition: &mut Exhibition, input: ExhibitionInput) -> AppResult<()> {
        Exhibition::check_dates(input.start_date, input.end_date)?;
        exhibition.name = required(input.name, "name")?;
        exhibition.location = text(input.location);
        exhibition.start_date = input.start_date;
        exhibition.end_date = input.end_date;
        exhibition.booth = input.booth;
        exhibition.image_url = input.image_url;
        exhibition.updated_at = Utc::now();
        Ok(())
    }

    fn media(exhibition: &Exhibition) -> Vec<String> {
        exhibition.image_url.iter().cloned().collect()
    }
}

pub struct Certificates;

impl AdminResource for Certificates {
    type Entity = Certificate;
    type Input = CertificateInput;
    type Repo = dyn CertificateRepository;
    const NAME: &'static str = "certificate";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.certificates.as_ref()
    }

    fn create(input: CertificateInput) -> AppResult<Certificate> {
        let mut certificate = Certificate::new(LocalizedText::default(), String::new());
        Self::apply(&mut certificate, input)?;
        Ok(certificate)
    }

    fn apply(certificate: &mut Certificate, input: CertificateInput) -> AppResult<()> {
        certificate.title = required(input.title, "title")?;
        certificate.issuer = input.issuer;
        certificate.image_url = input.image_url;
        certificate.issued_on = input.issued_on;
        certificate.updated_at = Utc::now();
        Ok(())
    }

    fn media(certificate: &Certificate) -> Vec<String> {
        vec![certificate.image_url.clone()]
    }
}

pub struct Clients;

impl AdminResource for Clients {
    type Entity = Client;
    type Input = ClientInput;
    type Repo = dyn ClientRepository;
    const NAME: &'static str = "client";

    fn repo(state: &AppState) -> &Self::Repo {
        state.repos.clients.as_ref()
    }

    fn create(input: ClientInput) -> AppResult<Client> {
        let mut client = Client::new(String::new(), String::new());
        Self::apply(&mut client, input)?;
        Ok(client)
    }

    fn apply(client: &mut Client, input: ClientInput) -> AppResult<()> {
        client.name = input.name.trim().to_string();
        client.logo_url = input.logo_url;
        client.website = input.website;
        client.sort_order = input.sort_order;
        client.updated_at = Utc::now();
        Ok(())
    }

    fn media(client: &Client) -> Vec<String> {
        vec![client.logo_url.clone()]
    }
}

fn missing<R: AdminResource>(id: Uuid) -> AppError {
    AppError::NotFound(format!("No {} with id {id}", R::NAME))
}

/// GET /api/admin/<resource>
pub async fn list<R: AdminResource>(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let items = R::repo(&state).find_all().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(items)))
}

/// GET /api/admin/<resource>/{id}
pub async fn get<R: AdminResource>(
    _identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let item = R::repo(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing::<R>(id))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(item)))
}

/// POST /api/admin/<resource>
pub async fn create<R: AdminResource>(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<R::Input>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    input.validate()?;

    let entity = R::create(input)?;
    R::check(&state, &entity).await?;
    let saved = R::repo(&state).save(entity).await?;
    state.invalidate_home().await;

    tracing::info!(admin_id = %identity.admin_id, resource = R::NAME, "Created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(saved)))
}

/// PUT /api/admin/<resource>/{id}
pub async fn update<R: AdminResource>(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    body: web::Json<R::Input>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let mut entity = R::repo(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing::<R>(id))?;
    R::apply(&mut entity, input)?;
    R::check(&state, &entity).await?;
    let saved = R::repo(&state).save(entity).await?;
    state.invalidate_home().await;

    tracing::info!(admin_id = %identity.admin_id, resource = R::NAME, %id, "Updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(saved)))
}

/// Delete the files behind `urls`. Failures are logged only.
async fn remove_media(state: &AppState, urls: &[String]) {
    for url in urls {
        match state.media.delete(url).await {
            Ok(()) => tracing::debug!(%url, "Upload removed"),
            Err(MediaError::InvalidPath(_)) => tracing::debug!(%url, "Not a local upload, left alone"),
            Err(e) => tracing::warn!(%url, error = %e, "Failed to remove upload"),
        }
    }
}

/// DELETE /api/admin/<resource>/{id}
pub async fn delete<R: AdminResource>(
    identity: Identity,
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = id.into_inner();
    let entity = R::repo(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| missing::<R>(id))?;
    R::repo(&state).delete(id).await.map_err(|e| match e {
        forge_core::RepoError::NotFound => missing::<R>(id),
        other => other.into(),
    })?;
    state.invalidate_home().await;
    remove_media(&state, &R::media(&entity)).await;

    tracing::info!(admin_id = %identity.admin_id, resource = R::NAME, %id, "Deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        id,
        format!("Deleted {}", R::NAME),
    )))
}

/// Routes for one resource under `path`.
pub fn scope<R: AdminResource>(path: &str) -> actix_web::Scope {
    web::scope(path)
        .route("", web::get().to(list::<R>))
        .route("", web::post().to(create::<R>))
        .route("/{id}", web::get().to(get::<R>))
        .route("/{id}", web::put().to(update::<R>))
        .route("/{id}", web::delete().to(delete::<R>))
}
