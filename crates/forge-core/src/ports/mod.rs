//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod clock;
mod mail;
mod media;
mod rate_limit;
mod repository;

pub use auth::{AdminSession, AuthError, PasswordService, TokenService};
pub use cache::{Cache, CacheError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use mail::{EmailMessage, MailError, Mailer};
pub use media::{MediaError, MediaFolder, MediaStorage, StoredMedia, UploadedFile};
pub use rate_limit::{
    RateLimitEntry, RateLimitError, RateLimitPolicy, RateLimitResult, RateLimitStore, RateLimiter,
};
pub use repository::{
    AdminUserRepository, BaseRepository, CategoryRepository, CertificateRepository,
    ClientRepository, ContactMessageRepository, ExhibitionRepository, NewsRepository,
    NewsletterRepository, ProductRepository, SolutionRepository,
};
