use axum::http::StatusCode;
use barbershop_core::slots::{BookedSpan, DaySchedule};
use chrono::{Duration, Local, Weekday};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, at, barber, morning_shift, service, upcoming};

fn availability_path(barber_id: Uuid) -> String {
    format!("/api/barbers/{}/availability", barber_id)
}

#[tokio::test]
async fn test_slots_skip_booked_blocks() {
    let barber_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let date = upcoming(Weekday::Mon);
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .with(eq(barber_id))
        .returning(|id| Ok(Some(barber(id))));
    ctx.store
        .expect_find_active_service()
        .with(eq(service_id))
        .returning(|id| Ok(Some(service(id, 30))));
    ctx.store
        .expect_day_schedule()
        .with(eq(barber_id), eq(1u8))
        .returning(|_, _| Ok(Some(morning_shift())));
    ctx.store
        .expect_booked_spans()
        .with(eq(barber_id), eq(date))
        .returning(|_, _| {
            Ok(vec![BookedSpan {
                start_time: at(10, 0),
                duration_minutes: 60,
            }])
        });

    let server = ctx.server();
    let response = server
        .get(&availability_path(barber_id))
        .add_query_param("date", date.to_string())
        .add_query_param("service_id", service_id.to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["slots"], json!(["09:00", "09:30", "11:00", "11:30"]));
    assert_eq!(body["duration_minutes"], json!(30));
    assert_eq!(body["date"], json!(date.to_string()));
}

#[tokio::test]
async fn test_longer_service_needs_consecutive_blocks() {
    let barber_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let date = upcoming(Weekday::Tue);
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|id| Ok(Some(barber(id))));
    ctx.store
        .expect_find_active_service()
        .returning(|id| Ok(Some(service(id, 60))));
    ctx.store
        .expect_day_schedule()
        .with(eq(barber_id), eq(2u8))
        .returning(|_, _| Ok(Some(morning_shift())));
    ctx.store.expect_booked_spans().returning(|_, _| {
        Ok(vec![BookedSpan {
            start_time: at(10, 0),
            duration_minutes: 60,
        }])
    });

    let server = ctx.server();
    let body = server
        .get(&availability_path(barber_id))
        .add_query_param("date", date.to_string())
        .add_query_param("service_id", service_id.to_string())
        .await
        .json::<Value>();

    assert_eq!(body["slots"], json!(["09:00", "11:00"]));
    assert_eq!(body["duration_minutes"], json!(60));
}

#[tokio::test]
async fn test_break_and_duration_parameter() {
    let barber_id = Uuid::new_v4();
    let date = upcoming(Weekday::Sat);
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|id| Ok(Some(barber(id))));
    ctx.store.expect_day_schedule().returning(|_, _| {
        Ok(Some(
            DaySchedule::open(at(9, 0), at(12, 0)).with_break(at(10, 0), at(11, 0)),
        ))
    });
    ctx.store.expect_booked_spans().returning(|_, _| Ok(vec![]));

    let server = ctx.server();
    let body = server
        .get(&availability_path(barber_id))
        .add_query_param("date", date.to_string())
        .add_query_param("duration", 60)
        .await
        .json::<Value>();

    // 09:30 would run into the break at 10:00.
    assert_eq!(body["slots"], json!(["09:00", "11:00"]));
}

#[tokio::test]
async fn test_default_duration_is_one_block() {
    let barber_id = Uuid::new_v4();
    let date = upcoming(Weekday::Wed);
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|id| Ok(Some(barber(id))));
    ctx.store
        .expect_day_schedule()
        .returning(|_, _| Ok(Some(DaySchedule::open(at(9, 0), at(10, 0)))));
    ctx.store.expect_booked_spans().returning(|_, _| Ok(vec![]));

    let server = ctx.server();
    let body = server
        .get(&availability_path(barber_id))
        .add_query_param("date", date.to_string())
        .await
        .json::<Value>();

    assert_eq!(body["duration_minutes"], json!(30));
    assert_eq!(body["slots"], json!(["09:00", "09:30"]));
}

#[tokio::test]
async fn test_day_without_schedule_has_no_slots() {
    let barber_id = Uuid::new_v4();
    let date = upcoming(Weekday::Sun);
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|id| Ok(Some(barber(id))));
    ctx.store
        .expect_day_schedule()
        .with(eq(barber_id), eq(0u8))
        .returning(|_, _| Ok(None));
    ctx.store.expect_booked_spans().returning(|_, _| Ok(vec![]));

    let server = ctx.server();
    let body = server
        .get(&availability_path(barber_id))
        .add_query_param("date", date.to_string())
        .await
        .json::<Value>();

    assert_eq!(body["slots"], json!([]));
}

#[tokio::test]
async fn test_dates_outside_the_window_are_empty() {
    let barber_id = Uuid::new_v4();
    let mut ctx = TestContext::new();

    // No schedule or booking lookups are expected for these dates.
    ctx.store
        .expect_find_active_barber()
        .times(2)
        .returning(|id| Ok(Some(barber(id))));

    let server = ctx.server();
    let today = Local::now().date_naive();

    for date in [today - Duration::days(1), today + Duration::days(31)] {
        let body = server
            .get(&availability_path(barber_id))
            .add_query_param("date", date.to_string())
            .await
            .json::<Value>();
        assert_eq!(body["slots"], json!([]));
    }
}

#[tokio::test]
async fn test_unknown_barber_is_not_found() {
    let barber_id = Uuid::new_v4();
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server
        .get(&availability_path(barber_id))
        .add_query_param("date", upcoming(Weekday::Mon).to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_service_is_not_found() {
    let barber_id = Uuid::new_v4();
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|id| Ok(Some(barber(id))));
    ctx.store
        .expect_find_active_service()
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server
        .get(&availability_path(barber_id))
        .add_query_param("date", upcoming(Weekday::Mon).to_string())
        .add_query_param("service_id", Uuid::new_v4().to_string())
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
