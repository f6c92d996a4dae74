//! Postgres-backed [`BookingStore`].

use async_trait::async_trait;
use barbershop_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, NewAppointment},
        barber::Barber,
        schedule::WeekdaySchedule,
        service::Service,
    },
    ports::BookingStore,
    slots::{BookedSpan, DaySchedule},
};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    DbPool, is_unique_violation,
    repositories::{appointment, barber, schedule, service},
};

#[derive(Clone)]
pub struct PgBookingStore {
    pool: DbPool,
}

impl PgBookingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn day_schedule(
        &self,
        barber_id: Uuid,
        day_of_week: u8,
    ) -> BookingResult<Option<DaySchedule>> {
        let row = schedule::get_day_schedule(&self.pool, barber_id, day_of_week).await?;
        Ok(row.map(|row| WeekdaySchedule::from(row).day_schedule()))
    }

    async fn booked_spans(&self, barber_id: Uuid, date: NaiveDate) -> BookingResult<Vec<BookedSpan>> {
        let rows = appointment::get_booked_spans(&self.pool, barber_id, date).await?;
        Ok(rows.into_iter().map(BookedSpan::from).collect())
    }

    async fn find_active_barber(&self, barber_id: Uuid) -> BookingResult<Option<Barber>> {
        let row = barber::get_barber_by_id(&self.pool, barber_id).await?;
        Ok(row.filter(|row| row.is_active).map(Barber::from))
    }

    async fn find_active_service(&self, service_id: Uuid) -> BookingResult<Option<Service>> {
        let row = service::get_service_by_id(&self.pool, service_id).await?;
        Ok(row.filter(|row| row.is_active).map(Service::from))
    }

    async fn create_appointment(&self, new: &NewAppointment) -> BookingResult<Appointment> {
        match appointment::create_appointment(&self.pool, new).await {
            Ok(row) => Appointment::try_from(row),
            Err(report) if is_unique_violation(&report) => {
                tracing::info!(
                    "Slot {} {} for barber {} was taken concurrently",
                    new.appointment_date,
                    new.appointment_time,
                    new.barber_id
                );
                Err(BookingError::SlotTaken(format!(
                    "{} at {}",
                    new.appointment_date,
                    new.appointment_time.format("%H:%M")
                )))
            }
            Err(report) => Err(BookingError::Database(report)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::create_test_pool;
    use crate::repositories::{barber, schedule, service};
    use barbershop_core::models::{schedule::default_week, service::ServiceRequest};
    use chrono::NaiveTime;
    use pretty_assertions::assert_eq;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    async fn seeded_store() -> (PgBookingStore, Uuid, Uuid) {
        let pool = create_test_pool().await;
        let barber = barber::create_barber(&pool, "Marcos", None, None).await.unwrap();
        schedule::upsert_week(&pool, barber.id, &default_week()).await.unwrap();

        let service = service::create_service(
            &pool,
            &ServiceRequest {
                name: "Corte".to_string(),
                description: None,
                duration_minutes: 60,
                price_cents: 4000,
                is_active: true,
            },
        )
        .await
        .unwrap();

        (PgBookingStore::new(pool), barber.id, service.id)
    }

    fn booking(barber_id: Uuid, service_id: Uuid, time: NaiveTime) -> NewAppointment {
        NewAppointment {
            client_name: "Carlos Silva".to_string(),
            client_phone: "(47) 99961-3557".to_string(),
            barber_id,
            service_id,
            appointment_date: NaiveDate::from_ymd_opt(2030, 3, 18).unwrap(),
            appointment_time: time,
            user_id: None,
        }
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database at TEST_DATABASE_URL"]
    async fn test_second_booking_of_a_slot_is_rejected() {
        let (store, barber_id, service_id) = seeded_store().await;

        let first = store
            .create_appointment(&booking(barber_id, service_id, at(10, 0)))
            .await
            .unwrap();
        assert_eq!(first.appointment_time, at(10, 0));

        let second = store
            .create_appointment(&booking(barber_id, service_id, at(10, 0)))
            .await;
        assert!(matches!(second, Err(BookingError::SlotTaken(_))));
    }

    #[tokio::test]
    #[ignore = "requires a Postgres database at TEST_DATABASE_URL"]
    async fn test_booked_spans_carry_service_duration() {
        let (store, barber_id, service_id) = seeded_store().await;
        let appointment = booking(barber_id, service_id, at(14, 0));
        store.create_appointment(&appointment).await.unwrap();

        let spans = store
            .booked_spans(barber_id, appointment.appointment_date)
            .await
            .unwrap();
        assert_eq!(
            spans,
            vec![BookedSpan {
                start_time: at(14, 0),
                duration_minutes: 60,
            }]
        );

        let monday = store.day_schedule(barber_id, 1).await.unwrap().unwrap();
        assert_eq!(monday.start_time, at(9, 0));

        let sunday = store.day_schedule(barber_id, 0).await.unwrap();
        assert_eq!(sunday.map(|day| day.is_active), Some(false));
    }
}
