use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010003_create_timetable"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("timetable_entries"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("department")).string().not_null())
                    .col(ColumnDef::new(Alias::new("year")).string().not_null())
                    .col(ColumnDef::new(Alias::new("semester")).string().not_null())
                    .col(
                        ColumnDef::new(Alias::new("day"))
                            .enumeration(
                                Alias::new("weekday_type"),
                                vec![
                                    Alias::new("Monday"),
                                    Alias::new("Tuesday"),
                                    Alias::new("Wednesday"),
                                    Alias::new("Thursday"),
                                    Alias::new("Friday"),
                                    Alias::new("Saturday"),
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(Alias::new("period")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("subject")).string().not_null())
                    .col(ColumnDef::new(Alias::new("teacher_id")).big_integer().null())
                    .col(ColumnDef::new(Alias::new("teacher_name")).string().null())
                    .col(ColumnDef::new(Alias::new("room")).string().null())
                    .col(ColumnDef::new(Alias::new("time_from")).time().null())
                    .col(ColumnDef::new(Alias::new("time_to")).time().null())
                    .col(ColumnDef::new(Alias::new("created_by")).big_integer().not_null())
                    .col(
                        ColumnDef::new(Alias::new("created_at"))
                            .timestamp()
                            .not_null()
                            .default(Expr::cust("CURRENT_TIMESTAMP")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_teacher")
                            .from(Alias::new("timetable_entries"), Alias::new("teacher_id"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_creator")
                            .from(Alias::new("timetable_entries"), Alias::new("created_by"))
                            .to(Alias::new("users"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("timetable_entries")).to_owned())
            .await
    }
}
