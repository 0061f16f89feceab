//! Category entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::{Category, LocalizedText};

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
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
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
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

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            name: LocalizedText::new(model.name_ar, model.name_en, model.name_tr),
            description: LocalizedText::new(
                model.description_ar,
                model.description_en,
                model.description_tr,
            ),
            image_url: model.image_url,
            sort_order: model.sort_order,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Category> for ActiveModel {
    fn from(category: Category) -> Self {
        Self {
            id: Set(category.id),
            slug: Set(category.slug),
            name_ar: Set(category.name.ar),
            name_en: Set(category.name.en),
            name_tr: Set(category.name.tr),
            description_ar: Set(category.description.ar),
            description_en: Set(category.description.en),
            description_tr: Set(category.description.tr),
            image_url: Set(category.image_url),
            sort_order: Set(category.sort_order),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
        }
    }
}
