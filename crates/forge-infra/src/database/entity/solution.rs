//! Solution entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::{LocalizedText, Solution};

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "solutions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title_ar: String,
    pub title_en: String,
    pub title_tr: String,
    #[sea_orm(column_type = "Text")]
    pub description_ar: String,
    #[sea_orm(column_type = "Text")]
    pub description_en: String,
    #[sea_orm(column_type = "Text")]
    pub description_tr: String,
    pub image_url: Option<String>,
    pub diagram_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select
            .order_by_asc(Column::SortOrder)
            .order_by_asc(Column::CreatedAt)
    }
}

impl From<Model> for Solution {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: LocalizedText::new(model.title_ar, model.title_en, model.title_tr),
            description: LocalizedText::new(
                model.description_ar,
                model.description_en,
                model.description_tr,
            ),
            image_url: model.image_url,
            diagram_url: model.diagram_url,
            sort_order: model.sort_order,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Solution> for ActiveModel {
    fn from(solution: Solution) -> Self {
        Self {
            id: Set(solution.id),
            slug: Set(solution.slug),
            title_ar: Set(solution.title.ar),
            title_en: Set(solution.title.en),
            title_tr: Set(solution.title.tr),
            description_ar: Set(solution.description.ar),
            description_en: Set(solution.description.en),
            description_tr: Set(solution.description.tr),
            image_url: Set(solution.image_url),
            diagram_url: Set(solution.diagram_url),
            sort_order: Set(solution.sort_order),
            created_at: Set(solution.created_at.into()),
            updated_at: Set(solution.updated_at.into()),
        }
    }
}
