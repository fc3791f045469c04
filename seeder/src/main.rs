use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    achievement::AchievementSeeder, attendance::AttendanceSeeder, event::EventSeeder,
    memory::MemorySeeder, notice::NoticeSeeder, timetable::TimetableSeeder, user::UserSeeder,
};
use colored::*;
use migration::{Migrator, MigratorTrait};

mod seed;
mod seeds;

#[tokio::main]
async fn main() {
    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Failed to open database:".red());
            std::process::exit(1);
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {e}", "Failed to run migrations:".red());
        std::process::exit(1);
    }

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(TimetableSeeder), "Timetable"),
        (Box::new(NoticeSeeder), "Notice"),
        (Box::new(AttendanceSeeder), "Attendance"),
        (Box::new(EventSeeder), "Event"),
        (Box::new(MemorySeeder), "Memory"),
        (Box::new(AchievementSeeder), "Achievement"),
    ] {
        if !run_seeder(&*seeder, name, &db).await {
            std::process::exit(1);
        }
    }
}
