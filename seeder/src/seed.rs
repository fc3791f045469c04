use async_trait::async_trait;
use colored::*;
use db::models::user::Model as UserModel;
use sea_orm::{DatabaseConnection, DbErr};
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 60;

#[async_trait]
pub trait Seeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr>;
}

/// Runs one seeder with a dotted status line. Returns false on failure.
pub async fn run_seeder<S: Seeder + ?Sized>(seeder: &S, name: &str, db: &DatabaseConnection) -> bool {
    let base_msg = format!("Seeding {}", name.bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(base_msg.len()));
    print!("{}{} ", base_msg, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    match seeder.seed(db).await {
        Ok(()) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
            true
        }
        Err(e) => {
            println!("{}", "failed".red());
            eprintln!("  {}", e.to_string().red());
            false
        }
    }
}

/// Looks up one of the fixed accounts created by `UserSeeder`.
pub async fn fixed_user(db: &DatabaseConnection, email: &str) -> Result<UserModel, DbErr> {
    UserModel::find_by_email(db, email)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("{email}; run the user seeder first")))
}
