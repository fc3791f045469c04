use crate::seed::Seeder;
use db::models::user::{Model, NewUser, Role};
use fake::{Fake, faker::name::en::Name};
use sea_orm::{DatabaseConnection, DbErr};

pub const ADMIN_EMAIL: &str = "admin@campus.edu";
pub const TEACHER_EMAIL: &str = "teacher@campus.edu";
pub const ORGANIZER_EMAIL: &str = "organizer@campus.edu";

pub const DEPARTMENT: &str = "Computer Engineering";
const YEARS: [&str; 4] = ["FE", "SE", "TE", "BE"];
const STUDENTS_PER_YEAR: usize = 8;

pub struct UserSeeder;

fn account(username: &str, email: &str, full_name: &str, role: Role) -> NewUser {
    NewUser {
        username: username.into(),
        email: email.into(),
        password: "password123".into(),
        full_name: full_name.into(),
        role,
        department: Some(DEPARTMENT.into()),
        year: None,
        semester: None,
        roll_number: None,
        phone: None,
    }
}

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        for new in [
            account("admin", ADMIN_EMAIL, "Campus Admin", Role::Admin),
            account("teacher", TEACHER_EMAIL, "Prof. Meera Rao", Role::Teacher),
            account("organizer", ORGANIZER_EMAIL, "Events Desk", Role::Organizer),
        ] {
            if Model::find_by_email(db, &new.email).await?.is_none() {
                Model::create(db, new).await?;
            }
        }

        for year in YEARS {
            for n in 1..=STUDENTS_PER_YEAR {
                let username = format!("{}{:02}", year.to_lowercase(), n);
                let email = format!("{username}@campus.edu");
                if Model::find_by_email(db, &email).await?.is_some() {
                    continue;
                }
                let full_name: String = Name().fake();
                Model::create(
                    db,
                    NewUser {
                        roll_number: Some(format!("CE-{year}-{n:02}")),
                        year: Some(year.into()),
                        semester: Some("1".into()),
                        ..account(&username, &email, &full_name, Role::Student)
                    },
                )
                .await?;
            }
        }
        Ok(())
    }
}
