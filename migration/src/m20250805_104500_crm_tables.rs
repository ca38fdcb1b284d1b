use sea_orm_migration::prelude::*;

use crate::{setup_audit_fk, util::default_audit_table_statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(default_audit_table_statement()
                .table(Certificate::Table)
                .col(ColumnDef::new(Certificate::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Certificate::Provider)
                    .text()
                    .not_null())
                .take()
            ).await?;
        setup_audit_fk!(manager, Certificate::Table);

        manager
            .create_table(default_audit_table_statement()
                .table(Activity::Table)
                .col(ColumnDef::new(Activity::ParentType)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Activity::ParentId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Activity::ActivityType)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Activity::Subject)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Activity::Description)
                    .text())
                .col(ColumnDef::new(Activity::DueDate)
                    .date())
                .col(ColumnDef::new(Activity::Status)
                    .text()
                    .not_null()
                    .default("pending"))
                .col(ColumnDef::new(Activity::AssignedTo)
                    .text())
                .take()
            ).await?;
        setup_audit_fk!(manager, Activity::Table);

        // Timelines are always read for one parent record
        manager.create_index(Index::create()
            .name("ix_activity_parent")
            .table(Activity::Table)
            .col(Activity::ParentType)
            .col(Activity::ParentId)
            .take()
        ).await?;

        manager
            .create_table(default_audit_table_statement()
                .table(Document::Table)
                .col(ColumnDef::new(Document::Name)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Document::EntityType)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Document::EntityId)
                    .uuid()
                    .not_null())
                .col(ColumnDef::new(Document::FileKey)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Document::FileUrl)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Document::FileType)
                    .text()
                    .not_null())
                .col(ColumnDef::new(Document::FileSize)
                    .big_integer()
                    .not_null())
                .take()
            ).await?;
        setup_audit_fk!(manager, Document::Table);

        manager.create_index(Index::create()
            .name("ix_document_entity")
            .table(Document::Table)
            .col(Document::EntityType)
            .col(Document::EntityId)
            .take()
        ).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(TableDropStatement::new().table(Document::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Activity::Table).take()).await?;
        manager.drop_table(TableDropStatement::new().table(Certificate::Table).take()).await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Certificate {
    Table,
    Name,
    Provider,
}

#[derive(Iden)]
enum Activity {
    Table,
    ParentType,
    ParentId,
    ActivityType,
    Subject,
    Description,
    DueDate,
    Status,
    AssignedTo,
}

#[derive(Iden)]
enum Document {
    Table,
    Name,
    EntityType,
    EntityId,
    FileKey,
    FileUrl,
    FileType,
    FileSize,
}
