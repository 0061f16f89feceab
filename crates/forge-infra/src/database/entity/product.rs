//! Product entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::{LocalizedText, Product, ProductSpec};

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub name_ar: String,
    pub name_en: String,
    pub name_tr: String,
    #[sea_orm(column_type = "Text")]
    pub description_ar: String,
    #[sea_orm(column_type = "Text")]
    pub description_en: String,
    #[sea_orm(column_type = "Text")]
    pub description_tr: String,
    /// `[{label: {ar, en, tr}, value}]`
    #[sea_orm(column_type = "JsonBinary")]
    pub specifications: Json,
    /// `[url]`
    #[sea_orm(column_type = "JsonBinary")]
    pub images: Json,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::CreatedAt)
    }
}

fn decode_list<T: serde::de::DeserializeOwned>(value: Json, column: &str, id: Uuid) -> Vec<T> {
    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::warn!(product_id = %id, column, error = %e, "Malformed JSON column, ignoring");
        Vec::new()
    })
}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        let specifications: Vec<ProductSpec> =
            decode_list(model.specifications, "specifications", model.id);
        let images: Vec<String> = decode_list(model.images, "images", model.id);

        Self {
            id: model.id,
            category_id: model.category_id,
            slug: model.slug,
            name: LocalizedText::new(model.name_ar, model.name_en, model.name_tr),
            description: LocalizedText::new(
                model.description_ar,
                model.description_en,
                model.description_tr,
            ),
            specifications,
            images,
            featured: model.featured,
            sort_order: model.sort_order,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        Self {
            id: Set(product.id),
            category_id: Set(product.category_id),
            slug: Set(product.slug),
            name_ar: Set(product.name.ar),
            name_en: Set(product.name.en),
            name_tr: Set(product.name.tr),
            description_ar: Set(product.description.ar),
            description_en: Set(product.description.en),
            description_tr: Set(product.description.tr),
            specifications: Set(serde_json::to_value(&product.specifications).unwrap_or_default()),
            images: Set(serde_json::to_value(&product.images).unwrap_or_default()),
            featured: Set(product.featured),
            sort_order: Set(product.sort_order),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
        }
    }
}
