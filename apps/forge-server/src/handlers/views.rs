//! Domain entities resolved to one locale for the public API.

use forge_core::domain::{
    Category, Certificate, Client, Exhibition, Locale, NewsArticle, Product, Solution,
};
use forge_shared::dto::{
    CategoryRef, CategoryView, CertificateView, ClientView, ExhibitionView, NewsSummary, NewsView,
    ProductSummary, ProductView, SolutionView, SpecView,
};

pub trait Localize {
    type View;

    fn localize(&self, locale: Locale) -> Self::View;
}

/// Localize every item of a slice.
pub fn localize_all<T: Localize>(items: &[T], locale: Locale) -> Vec<T::View> {
    items.iter().map(|item| item.localize(locale)).collect()
}

impl Localize for Category {
    type View = CategoryView;

    fn localize(&self, locale: Locale) -> CategoryView {
        CategoryView {
            id: self.id,
            slug: self.slug.clone(),
            name: self.name.get(locale).to_string(),
            description: self.description.get(locale).to_string(),
            image_url: self.image_url.clone(),
            sort_order: self.sort_order,
        }
    }
}

impl Localize for Product {
    type View = ProductSummary;

    fn localize(&self, locale: Locale) -> ProductSummary {
        ProductSummary {
            id: self.id,
            slug: self.slug.clone(),
            category_id: self.category_id,
            name: self.name.get(locale).to_string(),
            cover_image: self.cover_image().map(str::to_string),
            featured: self.featured,
        }
    }
}

/// Full product page, with the owning category when it still exists.
pub fn product_view(product: &Product, category: Option<&Category>, locale: Locale) -> ProductView {
    ProductView {
        id: product.id,
        slug: product.slug.clone(),
        category: category.map(|c| CategoryRef {
            slug: c.slug.clone(),
            name: c.name.get(locale).to_string(),
        }),
        name: product.name.get(locale).to_string(),
        description: product.description.get(locale).to_string(),
        specifications: product
            .specifications
            .iter()
            .map(|spec| SpecView {
                label: spec.label.get(locale).to_string(),
                value: spec.value.clone(),
            })
            .collect(),
        images: product.images.clone(),
        featured: product.featured,
    }
}

impl Localize for Solution {
    type View = SolutionView;

    fn localize(&self, locale: Locale) -> SolutionView {
        SolutionView {
            id: self.id,
            slug: self.slug.clone(),
            title: self.title.get(locale).to_string(),
            description: self.description.get(locale).to_string(),
            image_url: self.image_url.clone(),
            diagram_url: self.diagram_url.clone(),
        }
    }
}

impl Localize for NewsArticle {
    type View = NewsSummary;

    fn localize(&self, locale: Locale) -> NewsSummary {
        NewsSummary {
            id: self.id,
            slug: self.slug.clone(),
            title: self.title.get(locale).to_string(),
            summary: self.summary.get(locale).to_string(),
            cover_image: self.cover_image.clone(),
            published_at: self.published_at,
        }
    }
}

pub fn news_view(article: &NewsArticle, locale: Locale) -> NewsView {
    NewsView {
        id: article.id,
        slug: article.slug.clone(),
        title: article.title.get(locale).to_string(),
        summary: article.summary.get(locale).to_string(),
        content: article.content.get(locale).to_string(),
        cover_image: article.cover_image.clone(),
        published_at: article.published_at,
    }
}

impl Localize for Exhibition {
    type View = ExhibitionView;

    fn localize(&self, locale: Locale) -> ExhibitionView {
        ExhibitionView {
            id: self.id,
            name: self.name.get(locale).to_string(),
            location: self.location.get(locale).to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            booth: self.booth.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

impl Localize for Certificate {
    type View = CertificateView;

    fn localize(&self, locale: Locale) -> CertificateView {
        CertificateView {
            id: self.id,
            title: self.title.get(locale).to_string(),
            issuer: self.issuer.clone(),
            image_url: self.image_url.clone(),
            issued_on: self.issued_on,
        }
    }
}

impl Localize for Client {
    type View = ClientView;

    fn localize(&self, _locale: Locale) -> ClientView {
        ClientView {
            id: self.id,
            name: self.name.clone(),
            logo_url: self.logo_url.clone(),
            website: self.website.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::domain::{LocalizedText, ProductSpec};
    use uuid::Uuid;

    #[test]
    fn test_product_view_resolves_every_text() {
        let category = Category::new(
            "presses".to_string(),
            LocalizedText::new("مكابس", "Presses", "Presler"),
        );
        let mut product = Product::new(
            category.id,
            "hp-200".to_string(),
            LocalizedText::new("", "HP-200 press", "HP-200 pres"),
        );
        product.specifications.push(ProductSpec {
            label: LocalizedText::new("القوة", "Force", ""),
            value: "200 t".to_string(),
        });

        let view = product_view(&product, Some(&category), Locale::Tr);
        assert_eq!(view.name, "HP-200 pres");
        assert_eq!(view.category.unwrap().name, "Presler");
        // Missing Turkish label falls back to English.
        assert_eq!(view.specifications[0].label, "Force");

        let arabic = product_view(&product, None, Locale::Ar);
        assert_eq!(arabic.name, "HP-200 press");
        assert_eq!(arabic.specifications[0].label, "القوة");
        assert!(arabic.category.is_none());
    }

    #[test]
    fn test_summary_uses_first_image_as_cover() {
        let mut product = Product::new(
            Uuid::new_v4(),
            "filler".to_string(),
            LocalizedText::new("", "Filler", ""),
        );
        product.images = vec!["/uploads/products/a.webp".to_string()];

        let summary = product.localize(Locale::En);
        assert_eq!(summary.cover_image.as_deref(), Some("/uploads/products/a.webp"));
    }
}
