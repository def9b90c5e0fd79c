use chrono::{NaiveDate, TimeZone, Utc};
use futures::TryStreamExt;

use super::*;
use crate::error::StaffingError;
use crate::interfaces::{PersonDirectory, PositionCatalog, StaffStore, TeamStore};
use crate::model::{NewGrade, NewHistory, NewMember};
use crate::orchestration::RequestContext;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_person_directory_exists() {
    let ctx = RequestContext::new();
    let directory = MemoryPersonDirectory::new();
    directory.register(1).await;

    assert!(directory.exists(&ctx, 1).await.unwrap());
    assert!(!directory.exists(&ctx, 2).await.unwrap());

    directory.set_unavailable(true).await;
    assert!(matches!(
        directory.exists(&ctx, 1).await,
        Err(StaffingError::Unavailable(_))
    ));
}

#[tokio::test]
async fn test_position_catalog_rejects_duplicate_name() {
    let ctx = RequestContext::new();
    let catalog = MemoryPositionCatalog::new();
    let grade = NewGrade {
        grade: 1,
        initial_salary: 1000,
        created_on: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };

    catalog
        .insert_position(&ctx, "Engineer", vec![grade.clone()])
        .await
        .unwrap();
    let result = catalog.insert_position(&ctx, "Engineer", vec![grade]).await;
    assert!(matches!(result, Err(StaffingError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_position_catalog_appends_history() {
    let ctx = RequestContext::new();
    let catalog = MemoryPositionCatalog::new();
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    catalog
        .insert_position(
            &ctx,
            "Engineer",
            vec![NewGrade {
                grade: 1,
                initial_salary: 1000,
                created_on: created,
            }],
        )
        .await
        .unwrap();

    let positions: Vec<_> = catalog.get_all(&ctx).await.unwrap().try_collect().await.unwrap();
    let grade_id = positions[0].grades[0].id;
    let first_entry = positions[0].grades[0].history[0].clone();

    let appended = catalog
        .append_grade_history(&ctx, grade_id, 1200, created + chrono::Duration::days(30))
        .await
        .unwrap();
    assert_ne!(appended.id, first_entry.id);

    let positions = catalog.positions().await;
    let history = &positions[0].grades[0].history;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], first_entry);

    let missing = catalog.append_grade_history(&ctx, 999, 1, created).await;
    assert!(matches!(missing, Err(StaffingError::NotFound { entity: "Grade", id: 999 })));
}

#[tokio::test]
async fn test_staff_store_single_history_per_staff() {
    let ctx = RequestContext::new();
    let store = MemoryStaffStore::new();
    let staff_id = store.create(&ctx, 5, 2).await.unwrap();
    let history = NewHistory {
        staff_id,
        person_id: 1,
        mentor_id: None,
        created_on: date(2024, 1, 1),
        employment_percentage: 100,
    };

    store.create_history(&ctx, history.clone()).await.unwrap();
    let second = store.create_history(&ctx, history).await;
    assert!(matches!(second, Err(StaffingError::AlreadyExists(_))));

    let staff = store.get_by_id(&ctx, staff_id).await.unwrap();
    assert_eq!(staff.history.unwrap().person_id, 1);
}

#[tokio::test]
async fn test_staff_store_get_by_person_filters() {
    let ctx = RequestContext::new();
    let store = MemoryStaffStore::new();
    for person_id in [1, 1, 2] {
        let staff_id = store.create(&ctx, 5, 3).await.unwrap();
        store
            .create_history(
                &ctx,
                NewHistory {
                    staff_id,
                    person_id,
                    mentor_id: None,
                    created_on: date(2024, 1, 1),
                    employment_percentage: 50,
                },
            )
            .await
            .unwrap();
    }

    let rows: Vec<_> = store
        .get_by_person(&ctx, 1)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_staff_store_journal_and_fault_injection() {
    let ctx = RequestContext::new();
    let store = MemoryStaffStore::new();
    let staff_id = store.create(&ctx, 5, 2).await.unwrap();

    store.set_fail_on(StaffCall::SetManager, true).await;
    assert!(matches!(
        store.set_manager(&ctx, staff_id, 3).await,
        Err(StaffingError::Unavailable(_))
    ));
    assert_eq!(store.calls().await, vec![StaffCall::Create, StaffCall::SetManager]);
    assert_eq!(store.get_by_id(&ctx, staff_id).await.unwrap().manager_id, 2);
}

#[tokio::test]
async fn test_staff_store_setter_without_history() {
    let ctx = RequestContext::new();
    let store = MemoryStaffStore::new();
    let staff_id = store.create(&ctx, 5, 2).await.unwrap();

    let result = store.set_employment(&ctx, staff_id, 50).await;
    assert!(matches!(result, Err(StaffingError::NotFound { entity: "History", .. })));
}

#[tokio::test]
async fn test_team_store_membership_backstops() {
    let ctx = RequestContext::new();
    let store = MemoryTeamStore::new();
    let team_id = store.create_team(&ctx, "Core").await.unwrap();
    assert!(matches!(
        store.create_team(&ctx, "Core").await,
        Err(StaffingError::AlreadyExists(_))
    ));

    let member = NewMember {
        person_id: 9,
        team_id,
        employment_percentage: 60,
        start_work: date(2024, 1, 1),
    };
    let member_id = store.insert_member(&ctx, member.clone()).await.unwrap();
    assert!(matches!(
        store.insert_member(&ctx, member).await,
        Err(StaffingError::AlreadyExists(_))
    ));

    store.update_percentage(&ctx, member_id, 40).await.unwrap();
    store
        .set_end_work(&ctx, member_id, date(2024, 12, 31))
        .await
        .unwrap();
    let row = store.find_member(&ctx, 9, team_id).await.unwrap().unwrap();
    assert_eq!(row.employment_percentage, 40);
    assert_eq!(row.end_work, Some(date(2024, 12, 31)));

    assert!(matches!(
        store.update_percentage(&ctx, 404, 10).await,
        Err(StaffingError::NotFound { entity: "Member", .. })
    ));
}

#[tokio::test]
async fn test_team_store_insert_into_missing_team() {
    let ctx = RequestContext::new();
    let store = MemoryTeamStore::new();
    let result = store
        .insert_member(
            &ctx,
            NewMember {
                person_id: 9,
                team_id: 7,
                employment_percentage: 10,
                start_work: date(2024, 1, 1),
            },
        )
        .await;
    assert!(matches!(result, Err(StaffingError::NotFound { entity: "Team", id: 7 })));
}
