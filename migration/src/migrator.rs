use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202510010001_create_users::Migration),
            Box::new(migrations::m202510010002_create_attendance::Migration),
            Box::new(migrations::m202510010003_create_timetable::Migration),
            Box::new(migrations::m202510010004_create_notices::Migration),
            Box::new(migrations::m202510010005_add_user_profile::Migration),
            Box::new(migrations::m202510010006_create_departments::Migration),
            Box::new(migrations::m202510010007_create_events::Migration),
            Box::new(migrations::m202510010008_create_memories::Migration),
            Box::new(migrations::m202510010009_create_achievements::Migration),
        ]
    }
}
