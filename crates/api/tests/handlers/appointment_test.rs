use axum::http::{HeaderValue, StatusCode, header::AUTHORIZATION};
use barbershop_core::{
    errors::BookingError,
    models::appointment::{Appointment, AppointmentStatus, NewAppointment},
    slots::BookedSpan,
};
use chrono::{Duration, Local, NaiveDate, Utc, Weekday};
use fake::{Fake, faker::name::en::Name};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, at, barber, morning_shift, service, upcoming};

struct Booking {
    client_name: String,
    barber_id: Uuid,
    service_id: Uuid,
    date: NaiveDate,
}

impl Booking {
    fn new() -> Self {
        Self {
            client_name: Name().fake(),
            barber_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            date: upcoming(Weekday::Thu),
        }
    }

    fn body(&self, time: &str) -> Value {
        json!({
            "client_name": self.client_name,
            "client_phone": "(47) 99961-3557",
            "barber_id": self.barber_id,
            "service_id": self.service_id,
            "date": self.date,
            "time": time,
        })
    }

    /// Barber, a 60 minute service, a 09:00-12:00 shift and one booking at 10:00.
    fn expect_lookups(&self, ctx: &mut TestContext) {
        ctx.store
            .expect_find_active_barber()
            .with(eq(self.barber_id))
            .returning(|id| Ok(Some(barber(id))));
        ctx.store
            .expect_find_active_service()
            .with(eq(self.service_id))
            .returning(|id| Ok(Some(service(id, 60))));
        ctx.store
            .expect_day_schedule()
            .returning(|_, _| Ok(Some(morning_shift())));
        ctx.store.expect_booked_spans().returning(|_, _| {
            Ok(vec![BookedSpan {
                start_time: at(10, 0),
                duration_minutes: 60,
            }])
        });
    }
}

fn stored(new: &NewAppointment) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        client_name: new.client_name.clone(),
        client_phone: new.client_phone.clone(),
        barber_id: new.barber_id,
        service_id: Some(new.service_id),
        appointment_date: new.appointment_date,
        appointment_time: new.appointment_time,
        status: AppointmentStatus::Pending,
        user_id: new.user_id,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_free_slot_is_booked_as_pending() {
    let booking = Booking::new();
    let mut ctx = TestContext::new();
    booking.expect_lookups(&mut ctx);

    let date = booking.date;
    let client_name = booking.client_name.clone();
    ctx.store
        .expect_create_appointment()
        .withf(move |new| {
            new.appointment_date == date
                && new.appointment_time == at(11, 0)
                && new.client_name == client_name
                && new.user_id.is_none()
        })
        .times(1)
        .returning(|new| Ok(stored(new)));

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&booking.body("11:00:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["status"], json!("pending"));
    assert_eq!(body["appointment_time"], json!("11:00:00"));
}

#[tokio::test]
async fn test_unresolvable_session_books_anonymously() {
    let booking = Booking::new();
    let mut ctx = TestContext::new();
    booking.expect_lookups(&mut ctx);

    ctx.store
        .expect_create_appointment()
        .withf(|new| new.user_id.is_none())
        .times(1)
        .returning(|new| Ok(stored(new)));

    // The session table is unreachable, so the token cannot be resolved.
    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer stale-token"))
        .json(&booking.body("11:00:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["user_id"], Value::Null);
}

#[tokio::test]
async fn test_slot_overlapping_a_booking_is_taken() {
    let booking = Booking::new();
    let mut ctx = TestContext::new();
    booking.expect_lookups(&mut ctx);

    // 09:30 for 60 minutes runs into the 10:00 booking.
    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&booking.body("09:30:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["retryable"], json!(true));
}

#[tokio::test]
async fn test_concurrent_booking_surfaces_as_retryable_conflict() {
    let booking = Booking::new();
    let mut ctx = TestContext::new();
    booking.expect_lookups(&mut ctx);

    ctx.store
        .expect_create_appointment()
        .times(1)
        .returning(|_| Err(BookingError::SlotTaken("already booked".to_string())));

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&booking.body("09:00:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["retryable"], json!(true));
    assert_eq!(body["error"], json!("Slot already taken: already booked"));
}

#[tokio::test]
async fn test_invalid_client_details_are_rejected() {
    let booking = Booking::new();
    let server = TestContext::new().server();

    let mut bad_phone = booking.body("09:00:00");
    bad_phone["client_phone"] = json!("12ab");
    let response = server.post("/api/appointments").json(&bad_phone).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let mut bad_name = booking.body("09:00:00");
    bad_name["client_name"] = json!("C");
    let response = server.post("/api/appointments").json(&bad_name).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_dates_outside_the_window_are_rejected() {
    let mut booking = Booking::new();
    let server = TestContext::new().server();

    booking.date = Local::now().date_naive() - Duration::days(1);
    let response = server
        .post("/api/appointments")
        .json(&booking.body("09:00:00"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    booking.date = Local::now().date_naive() + Duration::days(31);
    let response = server
        .post("/api/appointments")
        .json(&booking.body("09:00:00"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inactive_service_cannot_be_booked() {
    let booking = Booking::new();
    let mut ctx = TestContext::new();

    ctx.store
        .expect_find_active_barber()
        .returning(|id| Ok(Some(barber(id))));
    ctx.store
        .expect_find_active_service()
        .returning(|_| Ok(None));

    let server = ctx.server();
    let response = server
        .post("/api/appointments")
        .json(&booking.body("09:00:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
