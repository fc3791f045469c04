use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202510010006_create_departments"
    }
}

/// (name, code, established, description)
const DEPARTMENTS: [(&str, &str, i32, &str); 6] = [
    ("Computer Engineering", "CE", 2001, "Software, systems and computing"),
    ("Information Technology", "IT", 2003, "Networks, databases and information systems"),
    ("Electronics & Telecommunication", "ENTC", 1998, "Circuits, signals and communication"),
    ("Mechanical Engineering", "ME", 1995, "Design, thermal and manufacturing"),
    ("Civil Engineering", "Civil", 1995, "Structures, surveying and construction"),
    ("Artificial Intelligence & Data Science", "AIDS", 2020, "Machine learning and data analytics"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("departments"))
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Alias::new("id"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Alias::new("name")).string().not_null().unique_key())
                    .col(ColumnDef::new(Alias::new("code")).string().not_null())
                    .col(ColumnDef::new(Alias::new("hod")).string().null())
                    .col(
                        ColumnDef::new(Alias::new("intake"))
                            .integer()
                            .not_null()
                            .default(60),
                    )
                    .col(ColumnDef::new(Alias::new("established")).integer().null())
                    .col(ColumnDef::new(Alias::new("description")).text().null())
                    .to_owned(),
            )
            .await?;

        let mut insert = Query::insert()
            .into_table(Alias::new("departments"))
            .columns([
                Alias::new("name"),
                Alias::new("code"),
                Alias::new("established"),
                Alias::new("description"),
            ])
            .to_owned();
        for (name, code, established, description) in DEPARTMENTS {
            insert.values_panic([
                name.into(),
                code.into(),
                established.into(),
                description.into(),
            ]);
        }
        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("departments")).to_owned())
            .await
    }
}
