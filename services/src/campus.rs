use crate::error::ServiceResult;
use db::models::department;
use db::models::event;
use db::models::memory;
use db::models::user::{self, Role};
use sea_orm::DatabaseConnection;

pub use db::models::department::Model as Department;

#[derive(Debug, Clone)]
pub struct DepartmentOverview {
    pub department: Department,
    pub students: u64,
    /// Includes events open to every department.
    pub events: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CampusStats {
    pub students: u64,
    pub events: u64,
    pub memories: u64,
    pub departments: u64,
}

pub struct CampusService;

impl CampusService {
    pub async fn departments(db: &DatabaseConnection) -> ServiceResult<Vec<DepartmentOverview>> {
        let mut out = Vec::new();
        for department in department::Model::list_all(db).await? {
            let students = user::Model::count_students_in_department(db, &department.name).await?;
            let events = event::Model::count_for_department(db, &department.name).await?;
            out.push(DepartmentOverview {
                department,
                students,
                events,
            });
        }
        Ok(out)
    }

    pub async fn stats(db: &DatabaseConnection) -> ServiceResult<CampusStats> {
        Ok(CampusStats {
            students: user::Model::count_by_role(db, Role::Student).await?,
            events: event::Model::count(db).await?,
            memories: memory::Model::count(db).await?,
            departments: department::Model::count(db).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use db::models::event::NewEvent;
    use db::models::user::NewUser;
    use db::test_utils::setup_test_db;

    async fn add_user(db: &DatabaseConnection, username: &str, role: Role, department: &str) -> user::Model {
        user::Model::create(
            db,
            NewUser {
                username: username.into(),
                email: format!("{username}@campus.test"),
                password: "secret123".into(),
                full_name: username.into(),
                role,
                department: Some(department.into()),
                year: Some("FE".into()),
                semester: None,
                roll_number: None,
                phone: None,
            },
        )
        .await
        .unwrap()
    }

    fn event_for(organizer: &user::Model, department: &str) -> NewEvent {
        NewEvent {
            title: format!("{department} meetup"),
            description: None,
            department: department.into(),
            event_type: "cultural".into(),
            venue: None,
            event_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            event_time: None,
            reg_deadline: None,
            max_participants: None,
            organizer_id: organizer.id,
            organizer_name: organizer.full_name.clone(),
            banner_image: None,
            tags: None,
        }
    }

    #[tokio::test]
    async fn departments_and_stats_count_what_they_should() {
        let db = setup_test_db().await;
        add_user(&db, "s1", Role::Student, "Civil Engineering").await;
        add_user(&db, "s2", Role::Student, "Civil Engineering").await;
        add_user(&db, "t1", Role::Teacher, "Civil Engineering").await;
        let org = add_user(&db, "org", Role::Organizer, "Computer Engineering").await;
        event::Model::create(&db, event_for(&org, "Civil Engineering")).await.unwrap();
        event::Model::create(&db, event_for(&org, "All")).await.unwrap();

        let overview = CampusService::departments(&db).await.unwrap();
        assert_eq!(overview.len(), 6);
        let civil = overview
            .iter()
            .find(|d| d.department.name == "Civil Engineering")
            .unwrap();
        assert_eq!((civil.students, civil.events), (2, 2));
        let ce = overview
            .iter()
            .find(|d| d.department.name == "Computer Engineering")
            .unwrap();
        assert_eq!((ce.students, ce.events), (0, 1));

        assert_eq!(
            CampusService::stats(&db).await.unwrap(),
            CampusStats {
                students: 2,
                events: 2,
                memories: 0,
                departments: 6,
            }
        );
    }
}
