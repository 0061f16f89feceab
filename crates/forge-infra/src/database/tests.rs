use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use forge_core::domain::{Category, ContactMessage, Locale, Product};
use forge_core::error::RepoError;
use forge_core::ports::{
    BaseRepository, CategoryRepository, ContactMessageRepository, ProductRepository,
};

use super::entity::{category, contact_message, product};
use super::postgres_repo::{
    PostgresCategoryRepository, PostgresContactMessageRepository, PostgresProductRepository,
};

fn category_model(slug: &str) -> category::Model {
    let now = Utc::now();
    category::Model {
        id: Uuid::new_v4(),
        slug: slug.to_owned(),
        name_ar: "مكابس".to_owned(),
        name_en: "Presses".to_owned(),
        name_tr: "Presler".to_owned(),
        description_ar: String::new(),
        description_en: "Hydraulic presses".to_owned(),
        description_tr: String::new(),
        image_url: None,
        sort_order: 1,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn product_model(specifications: serde_json::Value) -> product::Model {
    let now = Utc::now();
    product::Model {
        id: Uuid::new_v4(),
        category_id: Uuid::new_v4(),
        slug: "hp-200".to_owned(),
        name_ar: String::new(),
        name_en: "HP-200".to_owned(),
        name_tr: String::new(),
        description_ar: String::new(),
        description_en: String::new(),
        description_tr: String::new(),
        specifications,
        images: serde_json::json!(["/uploads/products/a.jpg"]),
        featured: true,
        sort_order: 0,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn message_model(read: bool) -> contact_message::Model {
    let now = Utc::now();
    contact_message::Model {
        id: Uuid::new_v4(),
        name: "Omar".to_owned(),
        email: "omar@example.com".to_owned(),
        phone: None,
        company: Some("Omar Foods".to_owned()),
        subject: None,
        message: "Need a packaging line quote".to_owned(),
        locale: "ar".to_owned(),
        ip_address: "203.0.113.7".to_owned(),
        read,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_category_by_slug() {
    let model = category_model("presses");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model.clone()]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let found = repo.find_by_slug("presses").await.unwrap().unwrap();

    assert_eq!(found.id, model.id);
    assert_eq!(found.name.get(Locale::Ar), "مكابس");
    // Blank translation falls back to English.
    assert_eq!(found.description.get(Locale::Tr), "Hydraulic presses");
}

#[tokio::test]
async fn test_product_json_columns() {
    let specs = serde_json::json!([
        { "label": { "ar": "", "en": "Force", "tr": "Kuvvet" }, "value": "200 t" }
    ]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_model(specs)]])
        .into_connection();

    let repo = PostgresProductRepository::new(db);
    let products = repo.find_featured().await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].specifications[0].value, "200 t");
    assert_eq!(products[0].specifications[0].label.get(Locale::Tr), "Kuvvet");
    assert_eq!(products[0].cover_image(), Some("/uploads/products/a.jpg"));
}

#[tokio::test]
async fn test_malformed_specifications_are_dropped() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product_model(serde_json::json!({"oops": true}))]])
        .into_connection();

    let repo = PostgresProductRepository::new(db);
    let product = repo.find_by_slug("hp-200").await.unwrap().unwrap();

    assert!(product.specifications.is_empty());
    assert_eq!(product.images.len(), 1);
}

#[tokio::test]
async fn test_save_inserts_new_entity() {
    let model = category_model("lines");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // Existence check finds nothing...
        .append_query_results([Vec::<category::Model>::new()])
        // ...then INSERT .. RETURNING
        .append_query_results([vec![model.clone()]])
        .into_connection();

    let repo = PostgresCategoryRepository::new(db);
    let category: Category = model.clone().into();
    let saved: Category = repo.save(category).await.unwrap();

    assert_eq!(saved.id, model.id);
    assert_eq!(saved.slug, "lines");
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresProductRepository::new(db);
    let result = BaseRepository::<Product, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_mark_read_updates_message() {
    let unread = message_model(false);
    let read = contact_message::Model {
        read: true,
        ..unread.clone()
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![unread.clone()]])
        .append_query_results([vec![unread.clone()]])
        .append_query_results([vec![read]])
        .into_connection();

    let repo = PostgresContactMessageRepository::new(db);
    let message: ContactMessage = repo.mark_read(unread.id).await.unwrap();

    assert!(message.read);
    assert_eq!(message.locale, Locale::Ar);
}
