//! Catalog persistence: SeaORM repositories and in-memory fallbacks.

mod memory;

pub use memory::{InMemoryRepository, MemoryRecord};

#[cfg(feature = "postgres")]
mod connections;
#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub use connections::{DatabaseConfig, DatabaseConnections};
#[cfg(feature = "postgres")]
pub use postgres_base::{DisplayOrder, PostgresBaseRepository};
#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresAdminUserRepository, PostgresCategoryRepository, PostgresCertificateRepository,
    PostgresClientRepository, PostgresContactMessageRepository, PostgresExhibitionRepository,
    PostgresNewsRepository, PostgresNewsletterRepository, PostgresProductRepository,
    PostgresSolutionRepository,
};

#[cfg(feature = "postgres")]
#[cfg(test)]
mod tests;
