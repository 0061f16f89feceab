//! Application state - shared across all handlers.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use forge_core::domain::{
    AdminUser, Category, Certificate, Client, ContactMessage, Exhibition, Locale, NewsArticle,
    NewsletterSubscriber, Product, Solution,
};
use forge_core::ports::{
    AdminUserRepository, Cache, CategoryRepository, CertificateRepository, ClientRepository,
    Clock, ContactMessageRepository, ExhibitionRepository, Mailer, MediaStorage, NewsRepository,
    NewsletterRepository, PasswordService, ProductRepository, RateLimitStore, RateLimiter,
    SolutionRepository, SystemClock, TokenService,
};
use forge_core::rate_limit::FixedWindowRateLimiter;
use forge_infra::{
    Argon2PasswordService, HttpMailer, InMemoryCache, InMemoryRateLimitStore, InMemoryRepository,
    JwtTokenService, LocalMediaStorage, LogMailer, LoginThrottle,
};

#[cfg(feature = "postgres")]
use forge_infra::database::{
    PostgresAdminUserRepository, PostgresCategoryRepository, PostgresCertificateRepository,
    PostgresClientRepository, PostgresContactMessageRepository, PostgresExhibitionRepository,
    PostgresNewsRepository, PostgresNewsletterRepository, PostgresProductRepository,
    PostgresSolutionRepository,
};
#[cfg(feature = "postgres")]
use forge_infra::{DatabaseConfig, DatabaseConnections};
#[cfg(feature = "redis")]
use forge_infra::{RedisCache, RedisRateLimitConfig, RedisRateLimitStore};

use crate::config::{AdminSeed, AppConfig, RateLimitSettings};

/// One repository per stored entity.
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub solutions: Arc<dyn SolutionRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub exhibitions: Arc<dyn ExhibitionRepository>,
    pub certificates: Arc<dyn CertificateRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub messages: Arc<dyn ContactMessageRepository>,
    pub subscribers: Arc<dyn NewsletterRepository>,
    pub admins: Arc<dyn AdminUserRepository>,
}

impl Repositories {
    /// Process-local storage for when no database is configured.
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(InMemoryRepository::<Category>::new()),
            products: Arc::new(InMemoryRepository::<Product>::new()),
            solutions: Arc::new(InMemoryRepository::<Solution>::new()),
            news: Arc::new(InMemoryRepository::<NewsArticle>::new()),
            exhibitions: Arc::new(InMemoryRepository::<Exhibition>::new()),
            certificates: Arc::new(InMemoryRepository::<Certificate>::new()),
            clients: Arc::new(InMemoryRepository::<Client>::new()),
            messages: Arc::new(InMemoryRepository::<ContactMessage>::new()),
            subscribers: Arc::new(InMemoryRepository::<NewsletterSubscriber>::new()),
            admins: Arc::new(InMemoryRepository::<AdminUser>::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(db: &DatabaseConnections) -> Self {
        Self {
            categories: Arc::new(PostgresCategoryRepository::new(db.main.clone())),
            products: Arc::new(PostgresProductRepository::new(db.main.clone())),
            solutions: Arc::new(PostgresSolutionRepository::new(db.main.clone())),
            news: Arc::new(PostgresNewsRepository::new(db.main.clone())),
            exhibitions: Arc::new(PostgresExhibitionRepository::new(db.main.clone())),
            certificates: Arc::new(PostgresCertificateRepository::new(db.main.clone())),
            clients: Arc::new(PostgresClientRepository::new(db.main.clone())),
            messages: Arc::new(PostgresContactMessageRepository::new(db.main.clone())),
            subscribers: Arc::new(PostgresNewsletterRepository::new(db.main.clone())),
            admins: Arc::new(PostgresAdminUserRepository::new(db.main.clone())),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub cache: Arc<dyn Cache>,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub rate_limit_store: Arc<dyn RateLimitStore>,
    pub rate_limits: RateLimitSettings,
    pub clock: Arc<dyn Clock>,
    pub login_throttle: Arc<LoginThrottle>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub mailer: Arc<dyn Mailer>,
    pub media: Arc<dyn MediaStorage>,
    pub max_upload_bytes: usize,
    pub contact_notify_email: Option<String>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        let (repos, db) = connect_database(config.database.as_ref()).await;
        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            Repositories::in_memory()
        };

        #[cfg(feature = "redis")]
        let (cache, store) = connect_redis(config.redis.as_ref()).await?;
        #[cfg(not(feature = "redis"))]
        let (cache, store): (Arc<dyn Cache>, Arc<dyn RateLimitStore>) = (
            Arc::new(InMemoryCache::new()),
            Arc::new(InMemoryRateLimitStore::new()),
        );

        let state = Self::assemble(config, repos, cache, store, Arc::new(SystemClock));

        #[cfg(feature = "postgres")]
        let state = Self { db, ..state };

        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Wire services around already chosen storage backends.
    pub fn assemble(
        config: &AppConfig,
        repos: Repositories,
        cache: Arc<dyn Cache>,
        rate_limit_store: Arc<dyn RateLimitStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let rate_limiter = Arc::new(FixedWindowRateLimiter::new(
            rate_limit_store.clone(),
            clock.clone(),
        ));

        let mailer: Arc<dyn Mailer> = match HttpMailer::new(config.mail.clone()) {
            Some(mailer) => Arc::new(mailer),
            None => {
                tracing::warn!("MAIL_API_KEY not set. Emails will only be logged.");
                Arc::new(LogMailer)
            }
        };

        let tokens = Arc::new(JwtTokenService::new(config.jwt.clone(), clock.clone()));

        Self {
            repos,
            cache,
            rate_limiter,
            rate_limit_store,
            rate_limits: config.rate_limits.clone(),
            clock,
            login_throttle: Arc::new(LoginThrottle::new(&config.login_throttle)),
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            mailer,
            media: Arc::new(LocalMediaStorage::new(config.media.clone())),
            max_upload_bytes: config.media.max_bytes,
            contact_notify_email: config.contact_notify_email.clone(),
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// State backed entirely by process memory.
    #[cfg(test)]
    pub fn in_memory(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        Self::assemble(
            config,
            Repositories::in_memory(),
            Arc::new(InMemoryCache::with_clock(clock.clone())),
            Arc::new(InMemoryRateLimitStore::new()),
            clock,
        )
    }

    pub fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_ms()).unwrap_or_else(Utc::now)
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Drop the cached home payloads after content changes.
    pub async fn invalidate_home(&self) {
        match self.cache.delete_prefix(HOME_CACHE_PREFIX).await {
            Ok(removed) => tracing::debug!(removed, "Home cache invalidated"),
            Err(e) => tracing::warn!(error = %e, "Failed to invalidate home cache"),
        }
    }

    /// Create the configured admin account unless it already exists.
    pub async fn seed_admin(&self, seed: &AdminSeed) -> anyhow::Result<()> {
        let email = seed.email.trim().to_lowercase();
        if self.repos.admins.find_by_email(&email).await?.is_some() {
            tracing::debug!("Admin account already present");
            return Ok(());
        }

        let hash = self.passwords.digest(&seed.password)?;
        self.repos.admins.save(AdminUser::new(email, hash)).await?;
        tracing::info!("Seeded initial admin account");
        Ok(())
    }
}

const HOME_CACHE_PREFIX: &str = "home:";

pub fn home_cache_key(locale: Locale) -> String {
    format!("{HOME_CACHE_PREFIX}{locale}")
}

#[cfg(feature = "postgres")]
async fn connect_database(
    config: Option<&DatabaseConfig>,
) -> (Repositories, Option<Arc<DatabaseConnections>>) {
    let Some(config) = config else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return (Repositories::in_memory(), None);
    };

    match DatabaseConnections::init(config).await {
        Ok(connections) => {
            let repos = Repositories::postgres(&connections);
            (repos, Some(Arc::new(connections)))
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            (Repositories::in_memory(), None)
        }
    }
}

#[cfg(feature = "redis")]
async fn connect_redis(
    config: Option<&RedisRateLimitConfig>,
) -> anyhow::Result<(Arc<dyn Cache>, Arc<dyn RateLimitStore>)> {
    let memory = || -> (Arc<dyn Cache>, Arc<dyn RateLimitStore>) {
        (
            Arc::new(InMemoryCache::new()),
            Arc::new(InMemoryRateLimitStore::new()),
        )
    };

    let Some(config) = config else {
        tracing::info!("REDIS_URL not set. Using in-memory cache and rate limit store.");
        return Ok(memory());
    };

    let connected = async {
        let cache = RedisCache::new(config.redis.clone()).await?;
        let store = RedisRateLimitStore::new(config.clone()).await?;
        anyhow::Ok((cache, store))
    }
    .await;

    match connected {
        Ok((cache, store)) => Ok((Arc::new(cache), Arc::new(store))),
        Err(e) if config.redis.fallback_to_memory => {
            tracing::error!(error = %e, "Redis unavailable. Falling back to memory.");
            Ok(memory())
        }
        Err(e) => Err(e.context("Redis unavailable and REDIS_FALLBACK_TO_MEMORY is off")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::ports::ManualClock;

    fn state() -> AppState {
        AppState::in_memory(&AppConfig::default(), Arc::new(ManualClock::new(0)))
    }

    #[tokio::test]
    async fn test_seed_admin_is_idempotent() {
        let state = state();
        let seed = AdminSeed {
            email: "Admin@Example.com".to_string(),
            password: "correct horse".to_string(),
        };

        state.seed_admin(&seed).await.unwrap();
        state.seed_admin(&seed).await.unwrap();

        let admins = state.repos.admins.find_all().await.unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "admin@example.com");
        assert!(
            state
                .passwords
                .matches("correct horse", &admins[0].password_hash)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_today_follows_clock() {
        // 2026-03-01T12:00:00Z
        let clock = Arc::new(ManualClock::new(1_772_366_400_000));
        let state = AppState::in_memory(&AppConfig::default(), clock);
        assert_eq!(state.today(), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[tokio::test]
    async fn test_invalidate_home_clears_every_locale() {
        let state = state();
        for locale in Locale::ALL {
            state
                .cache
                .set(&home_cache_key(locale), "{}", None)
                .await
                .unwrap();
        }

        state.invalidate_home().await;

        for locale in Locale::ALL {
            assert!(state.cache.get(&home_cache_key(locale)).await.is_none());
        }
    }
}
