use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010007_create_events"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("events"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("title")).string().not_null())
                    .col(ColumnDef::new(Alias::new("description")).text().null())
                    .col(
                        ColumnDef::new(Alias::new("department"))
                            .string()
                            .not_null()
                            .default("All"),
                    )
                    .col(ColumnDef::new(Alias::new("event_type")).string().not_null())
                    .col(ColumnDef::new(Alias::new("venue")).string().null())
                    .col(ColumnDef::new(Alias::new("event_date")).date().not_null())
                    .col(ColumnDef::new(Alias::new("event_time")).time().null())
                    .col(ColumnDef::new(Alias::new("reg_deadline")).date().null())
                    .col(ColumnDef::new(Alias::new("max_participants")).integer().null())
                    .col(ColumnDef::new(Alias::new("organizer_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("organizer_name")).string().not_null())
                    .col(ColumnDef::new(Alias::new("banner_image")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("status"))
                            .enumeration(
                                Alias::new("event_status_type"),
                                vec![
                                    Alias::new("upcoming"),
                                    Alias::new("ongoing"),
                                    Alias::new("completed"),
                                    Alias::new("cancelled"),
                                ],
                            )
                            .not_null()
                            .default("upcoming"),
                    )
                    .col(ColumnDef::new(Alias::new("tags")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_organizer")
                            .from(Alias::new("events"), Alias::new("organizer_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Alias::new("event_registrations"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("event_id")).big_integer().not_null())
                    .col(ColumnDef::new(Alias::new("user_id")).big_integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("registered_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    // one registration per (event, user); capacity checks rely on this
                    .index(
                        Index::create()
                            .name("uq_event_reg_event_user")
                            .col(Alias::new("event_id"))
                            .col(Alias::new("user_id"))
                            .unique(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_reg_event")
                            .from(Alias::new("event_registrations"), Alias::new("event_id"))
                            .to(Alias::new("events"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_reg_user")
                            .from(Alias::new("event_registrations"), Alias::new("user_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(Alias::new("event_registrations"))
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Alias::new("events")).to_owned())
            .await
    }
}
