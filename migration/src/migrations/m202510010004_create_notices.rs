use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010004_create_notices"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("notices"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("title")).string().not_null())
                    .col(ColumnDef::new(Alias::new("content")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("category"))
                            .string()
                            .not_null()
                            .default("general"),
                    )
                    .col(ColumnDef::new(Alias::new("author_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("author_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("author_role")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("department"))
                            .string()
                            .not_null()
                            .default("All"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("year"))
                            .string()
                            .not_null()
                            .default("All"),
                    )
                    .col(
                        ColumnDef::new(Alias::new("is_important"))
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Alias::new("whatsapp_message")).text().not_null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notice_author")
                            .from(Alias::new("notices"), Alias::new("author_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("notices")).to_owned())
            .await
    }
}
