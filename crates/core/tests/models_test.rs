use std::str::FromStr;

use barbershop_core::models::{
    appointment::{Appointment, AppointmentStatus, AppointmentWithService, CreateAppointmentRequest},
    schedule::{day_name, default_week, WeekdaySchedule},
    service::{Service, ServiceRequest},
    settings::{merge_with_defaults, DEFAULT_SETTINGS},
};
use chrono::{NaiveDate, NaiveTime, Utc};
use fake::{faker::name::en::Name, Fake};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_string, to_value};
use uuid::Uuid;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[rstest]
#[case(AppointmentStatus::Pending, "pending")]
#[case(AppointmentStatus::Confirmed, "confirmed")]
#[case(AppointmentStatus::Completed, "completed")]
#[case(AppointmentStatus::Cancelled, "cancelled")]
fn test_status_round_trips_as_lowercase(#[case] status: AppointmentStatus, #[case] text: &str) {
    assert_eq!(to_value(status).unwrap(), json!(text));
    assert_eq!(AppointmentStatus::from_str(text).unwrap(), status);
    assert_eq!(status.to_string(), text);
}

#[test]
fn test_unknown_status_is_a_validation_error() {
    let err = AppointmentStatus::from_str("no-show").unwrap_err();
    assert!(err.to_string().contains("Unknown appointment status"));
}

#[test]
fn test_only_cancelled_releases_the_slot() {
    assert!(AppointmentStatus::Pending.holds_slot());
    assert!(AppointmentStatus::Confirmed.holds_slot());
    assert!(AppointmentStatus::Completed.holds_slot());
    assert!(!AppointmentStatus::Cancelled.holds_slot());
}

#[test]
fn test_appointment_with_service_flattens_appointment_fields() {
    let service_id = Uuid::new_v4();
    let client_name: String = Name().fake();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        client_name: client_name.clone(),
        client_phone: "(47) 99613-5570".to_string(),
        barber_id: Uuid::new_v4(),
        service_id: Some(service_id),
        appointment_date: NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
        appointment_time: at(10, 30),
        status: AppointmentStatus::Pending,
        user_id: None,
        created_at: Utc::now(),
    };
    let row = AppointmentWithService {
        appointment,
        service: Some(Service {
            id: service_id,
            name: "Corte".to_string(),
            description: None,
            duration_minutes: 30,
            price_cents: 4500,
            is_active: true,
        }),
    };

    let value = to_value(&row).unwrap();

    assert_eq!(value["client_name"], json!(client_name));
    assert_eq!(value["appointment_time"], json!("10:30:00"));
    assert_eq!(value["status"], json!("pending"));
    assert_eq!(value["service"]["price_cents"], json!(4500));
}

#[test]
fn test_create_appointment_request_parses_date_and_time() {
    let barber_id = Uuid::new_v4();
    let service_id = Uuid::new_v4();
    let body = format!(
        r#"{{"client_name":"João","client_phone":"47 99613-5570","barber_id":"{}","service_id":"{}","date":"2026-03-16","time":"14:00:00"}}"#,
        barber_id, service_id
    );

    let request: CreateAppointmentRequest = from_str(&body).unwrap();

    assert_eq!(request.barber_id, barber_id);
    assert_eq!(request.date, NaiveDate::from_ymd_opt(2026, 3, 16).unwrap());
    assert_eq!(request.time, at(14, 0));
}

#[test]
fn test_service_request_defaults_and_normalization() {
    let request: ServiceRequest =
        from_str(r#"{"name":"  Barba  ","description":"   ","duration_minutes":30,"price_cents":3000}"#)
            .unwrap();

    assert!(request.is_active);
    assert_eq!(request.trimmed_name(), "Barba");
    assert_eq!(request.normalized_description(), None);
}

#[test]
fn test_default_week_matches_shop_hours() {
    let week = default_week();

    assert_eq!(week.len(), 7);
    let sunday = &week[0];
    assert!(!sunday.is_active);
    for weekday in &week[1..6] {
        assert!(weekday.is_active);
        assert_eq!(weekday.start_time, at(9, 0));
        assert_eq!(weekday.end_time, at(19, 0));
    }
    let saturday = &week[6];
    assert!(saturday.is_active);
    assert_eq!(saturday.end_time, at(18, 0));
    assert!(week.iter().all(|day| day.break_start.is_none() && day.break_end.is_none()));
}

#[test]
fn test_weekday_schedule_converts_to_day_schedule() {
    let row = WeekdaySchedule {
        id: Uuid::new_v4(),
        barber_id: Uuid::new_v4(),
        day_of_week: 2,
        start_time: at(9, 0),
        end_time: at(19, 0),
        is_active: true,
        break_start: Some(at(12, 0)),
        break_end: Some(at(13, 0)),
    };

    let day = row.day_schedule();

    assert_eq!(day.start_time, row.start_time);
    assert_eq!(day.break_end, Some(at(13, 0)));
    assert_eq!(row.day_name(), "Tuesday");
}

#[rstest]
#[case(0, Some("Sunday"))]
#[case(6, Some("Saturday"))]
#[case(7, None)]
fn test_day_names(#[case] day: u8, #[case] expected: Option<&str>) {
    assert_eq!(day_name(day), expected);
}

#[test]
fn test_settings_merge_overrides_defaults() {
    let merged = merge_with_defaults([("phone", "47 3333-4444"), ("extra", "value")]);

    assert_eq!(merged.len(), DEFAULT_SETTINGS.len() + 1);
    assert_eq!(merged["phone"], "47 3333-4444");
    assert_eq!(merged["hours_sunday"], "Fechado");
    assert_eq!(merged["extra"], "value");
}

#[test]
fn test_service_serialization() {
    let service = Service {
        id: Uuid::new_v4(),
        name: "Corte + Barba".to_string(),
        description: Some("Combo".to_string()),
        duration_minutes: 60,
        price_cents: 7000,
        is_active: true,
    };

    let json = to_string(&service).expect("Failed to serialize service");
    let deserialized: Service = from_str(&json).expect("Failed to deserialize service");

    assert_eq!(deserialized, service);
}
