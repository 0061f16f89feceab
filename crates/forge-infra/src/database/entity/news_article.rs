//! News article entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, Set};

use forge_core::domain::{LocalizedText, NewsArticle};

use crate::database::postgres_base::DisplayOrder;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "news_articles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub slug: String,
    pub title_ar: String,
    pub title_en: String,
    pub title_tr: String,
    #[sea_orm(column_type = "Text")]
    pub summary_ar: String,
    #[sea_orm(column_type = "Text")]
    pub summary_en: String,
    #[sea_orm(column_type = "Text")]
    pub summary_tr: String,
    #[sea_orm(column_type = "Text")]
    pub content_ar: String,
    #[sea_orm(column_type = "Text")]
    pub content_en: String,
    #[sea_orm(column_type = "Text")]
    pub content_tr: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl DisplayOrder for Entity {
    fn display_order(select: Select<Self>) -> Select<Self> {
        select.order_by_desc(Column::CreatedAt)
    }
}

impl From<Model> for NewsArticle {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            slug: model.slug,
            title: LocalizedText::new(model.title_ar, model.title_en, model.title_tr),
            summary: LocalizedText::new(model.summary_ar, model.summary_en, model.summary_tr),
            content: LocalizedText::new(model.content_ar, model.content_en, model.content_tr),
            cover_image: model.cover_image,
            published: model.published,
            published_at: model.published_at.map(Into::into),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewsArticle> for ActiveModel {
    fn from(article: NewsArticle) -> Self {
        Self {
            id: Set(article.id),
            slug: Set(article.slug),
            title_ar: Set(article.title.ar),
            title_en: Set(article.title.en),
            title_tr: Set(article.title.tr),
            summary_ar: Set(article.summary.ar),
            summary_en: Set(article.summary.en),
            summary_tr: Set(article.summary.tr),
            content_ar: Set(article.content.ar),
            content_en: Set(article.content.en),
            content_tr: Set(article.content.tr),
            cover_image: Set(article.cover_image),
            published: Set(article.published),
            published_at: Set(article.published_at.map(Into::into)),
            created_at: Set(article.created_at.into()),
            updated_at: Set(article.updated_at.into()),
        }
    }
}
