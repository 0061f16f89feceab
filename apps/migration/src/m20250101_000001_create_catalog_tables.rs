use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const LOCALES: [&str; 3] = ["ar", "en", "tr"];

/// Adds `<base>_ar`, `<base>_en` and `<base>_tr`.
fn localized(table: &mut TableCreateStatement, base: &str, long_text: bool) {
    for locale in LOCALES {
        let mut column = ColumnDef::new(Alias::new(format!("{base}_{locale}")));
        if long_text {
            column.text();
        } else {
            column.string();
        }
        table.col(column.not_null().default(""));
    }
}

fn id() -> ColumnDef {
    ColumnDef::new(Alias::new("id"))
        .uuid()
        .not_null()
        .primary_key()
        .to_owned()
}

fn timestamps(table: &mut TableCreateStatement) {
    for name in ["created_at", "updated_at"] {
        table.col(
            ColumnDef::new(Alias::new(name))
                .timestamp_with_time_zone()
                .not_null()
                .default(Expr::current_timestamp()),
        );
    }
}

fn sort_order() -> ColumnDef {
    ColumnDef::new(Alias::new("sort_order"))
        .integer()
        .not_null()
        .default(0)
        .to_owned()
}

fn unique_slug() -> ColumnDef {
    ColumnDef::new(Alias::new("slug"))
        .string()
        .not_null()
        .unique_key()
        .to_owned()
}

fn optional_string(name: &str) -> ColumnDef {
    ColumnDef::new(Alias::new(name)).string().null().to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut categories = Table::create();
        categories
            .table(Categories::Table)
            .if_not_exists()
            .col(id())
            .col(unique_slug());
        localized(&mut categories, "name", false);
        localized(&mut categories, "description", true);
        categories
            .col(optional_string("image_url"))
            .col(sort_order());
        timestamps(&mut categories);
        manager.create_table(categories).await?;

        let mut products = Table::create();
        products
            .table(Products::Table)
            .if_not_exists()
            .col(id())
            .col(ColumnDef::new(Products::CategoryId).uuid().not_null())
            .col(unique_slug());
        localized(&mut products, "name", false);
        localized(&mut products, "description", true);
        products
            .col(
                ColumnDef::new(Products::Specifications)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'[]'::jsonb")),
            )
            .col(
                ColumnDef::new(Products::Images)
                    .json_binary()
                    .not_null()
                    .default(Expr::cust("'[]'::jsonb")),
            )
            .col(
                ColumnDef::new(Products::Featured)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(sort_order())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_products_category")
                    .from(Products::Table, Products::CategoryId)
                    .to(Categories::Table, Categories::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .on_update(ForeignKeyAction::Cascade),
            );
        timestamps(&mut products);
        manager.create_table(products).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let mut solutions = Table::create();
        solutions
            .table(Solutions::Table)
            .if_not_exists()
            .col(id())
            .col(unique_slug());
        localized(&mut solutions, "title", false);
        localized(&mut solutions, "description", true);
        solutions
            .col(optional_string("image_url"))
            .col(optional_string("diagram_url"))
            .col(sort_order());
        timestamps(&mut solutions);
        manager.create_table(solutions).await?;

        let mut news = Table::create();
        news.table(NewsArticles::Table)
            .if_not_exists()
            .col(id())
            .col(unique_slug());
        localized(&mut news, "title", false);
        localized(&mut news, "summary", true);
        localized(&mut news, "content", true);
        news.col(optional_string("cover_image"))
            .col(
                ColumnDef::new(NewsArticles::Published)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(NewsArticles::PublishedAt)
                    .timestamp_with_time_zone()
                    .null(),
            );
        timestamps(&mut news);
        manager.create_table(news).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_news_articles_published")
                    .table(NewsArticles::Table)
                    .col(NewsArticles::Published)
                    .col(NewsArticles::PublishedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        let mut exhibitions = Table::create();
        exhibitions.table(Exhibitions::Table).if_not_exists().col(id());
        localized(&mut exhibitions, "name", false);
        localized(&mut exhibitions, "location", false);
        exhibitions
            .col(ColumnDef::new(Exhibitions::StartDate).date().not_null())
            .col(ColumnDef::new(Exhibitions::EndDate).date().not_null())
            .col(optional_string("booth"))
            .col(optional_string("image_url"))
            .check(Expr::col(Exhibitions::EndDate).gte(Expr::col(Exhibitions::StartDate)));
        timestamps(&mut exhibitions);
        manager.create_table(exhibitions).await?;

        let mut certificates = Table::create();
        certificates
            .table(Certificates::Table)
            .if_not_exists()
            .col(id());
        localized(&mut certificates, "title", false);
        certificates
            .col(optional_string("issuer"))
            .col(ColumnDef::new(Certificates::ImageUrl).string().not_null())
            .col(ColumnDef::new(Certificates::IssuedOn).date().null());
        timestamps(&mut certificates);
        manager.create_table(certificates).await?;

        let mut clients = Table::create();
        clients
            .table(Clients::Table)
            .if_not_exists()
            .col(id())
            .col(ColumnDef::new(Clients::Name).string().not_null())
            .col(ColumnDef::new(Clients::LogoUrl).string().not_null())
            .col(optional_string("website"))
            .col(sort_order());
        timestamps(&mut clients);
        manager.create_table(clients).await?;

        let mut messages = Table::create();
        messages
            .table(ContactMessages::Table)
            .if_not_exists()
            .col(id())
            .col(ColumnDef::new(ContactMessages::Name).string().not_null())
            .col(ColumnDef::new(ContactMessages::Email).string().not_null())
            .col(optional_string("phone"))
            .col(optional_string("company"))
            .col(optional_string("subject"))
            .col(ColumnDef::new(ContactMessages::Message).text().not_null())
            .col(
                ColumnDef::new(ContactMessages::Locale)
                    .string_len(2)
                    .not_null()
                    .default("en"),
            )
            .col(ColumnDef::new(ContactMessages::IpAddress).string().not_null())
            .col(
                ColumnDef::new(ContactMessages::Read)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        timestamps(&mut messages);
        manager.create_table(messages).await?;

        let mut subscribers = Table::create();
        subscribers
            .table(NewsletterSubscribers::Table)
            .if_not_exists()
            .col(id())
            .col(
                ColumnDef::new(NewsletterSubscribers::Email)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(NewsletterSubscribers::Locale)
                    .string_len(2)
                    .not_null()
                    .default("en"),
            );
        timestamps(&mut subscribers);
        manager.create_table(subscribers).await?;

        let mut admins = Table::create();
        admins
            .table(AdminUsers::Table)
            .if_not_exists()
            .col(id())
            .col(
                ColumnDef::new(AdminUsers::Email)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(AdminUsers::PasswordHash).string().not_null());
        timestamps(&mut admins);
        manager.create_table(admins).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Products first: it references categories.
        let drops = [
            Table::drop().table(Products::Table).if_exists().to_owned(),
            Table::drop().table(Categories::Table).if_exists().to_owned(),
            Table::drop().table(Solutions::Table).if_exists().to_owned(),
            Table::drop().table(NewsArticles::Table).if_exists().to_owned(),
            Table::drop().table(Exhibitions::Table).if_exists().to_owned(),
            Table::drop().table(Certificates::Table).if_exists().to_owned(),
            Table::drop().table(Clients::Table).if_exists().to_owned(),
            Table::drop().table(ContactMessages::Table).if_exists().to_owned(),
            Table::drop()
                .table(NewsletterSubscribers::Table)
                .if_exists()
                .to_owned(),
            Table::drop().table(AdminUsers::Table).if_exists().to_owned(),
        ];

        for drop in drops {
            manager.drop_table(drop).await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    CategoryId,
    Specifications,
    Images,
    Featured,
}

#[derive(DeriveIden)]
enum Solutions {
    Table,
}

#[derive(DeriveIden)]
enum NewsArticles {
    Table,
    Published,
    PublishedAt,
}

#[derive(DeriveIden)]
enum Exhibitions {
    Table,
    StartDate,
    EndDate,
}

#[derive(DeriveIden)]
enum Certificates {
    Table,
    ImageUrl,
    IssuedOn,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Name,
    LogoUrl,
}

#[derive(DeriveIden)]
enum ContactMessages {
    Table,
    Name,
    Email,
    Message,
    Locale,
    IpAddress,
    Read,
}

#[derive(DeriveIden)]
enum NewsletterSubscribers {
    Table,
    Email,
    Locale,
}

#[derive(DeriveIden)]
enum AdminUsers {
    Table,
    Email,
    PasswordHash,
}
