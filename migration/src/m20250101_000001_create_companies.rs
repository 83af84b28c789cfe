// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::OwnerId).string().not_null())
                    .col(ColumnDef::new(Companies::SourceUrl).text().not_null())
                    .col(ColumnDef::new(Companies::Name).text())
                    .col(ColumnDef::new(Companies::Description).text())
                    .col(ColumnDef::new(Companies::LogoUrl).text())
                    .col(ColumnDef::new(Companies::FacebookUrl).text())
                    .col(ColumnDef::new(Companies::LinkedinUrl).text())
                    .col(ColumnDef::new(Companies::TwitterUrl).text())
                    .col(ColumnDef::new(Companies::InstagramUrl).text())
                    .col(ColumnDef::new(Companies::Address).text())
                    .col(ColumnDef::new(Companies::Phone).text())
                    .col(ColumnDef::new(Companies::Email).text())
                    .col(ColumnDef::new(Companies::ScreenshotPath).string())
                    .col(
                        ColumnDef::new(Companies::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Companies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_companies_owner_id")
                    .table(Companies::Table)
                    .col(Companies::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    OwnerId,
    SourceUrl,
    Name,
    Description,
    LogoUrl,
    FacebookUrl,
    LinkedinUrl,
    TwitterUrl,
    InstagramUrl,
    Address,
    Phone,
    Email,
    ScreenshotPath,
    Status,
    CreatedAt,
    UpdatedAt,
}
