//! Storage contract used by the availability and booking flow.
//!
//! The calculator itself never touches storage. Callers read the weekday
//! schedule and the day's bookings through a [`BookingStore`], run
//! [`crate::slots::compute_available_slots`], and hand the chosen slot back to
//! the store, which enforces uniqueness of `(barber, date, start time)`.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, NewAppointment},
        barber::Barber,
        service::Service,
    },
    slots::{BookedSpan, DaySchedule},
};

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// The barber's schedule for a weekday (0 = Sunday), if one exists.
    async fn day_schedule(
        &self,
        barber_id: Uuid,
        day_of_week: u8,
    ) -> BookingResult<Option<DaySchedule>>;

    /// Non-cancelled bookings for the barber on `date`, with the duration of
    /// each booked service resolved.
    async fn booked_spans(&self, barber_id: Uuid, date: NaiveDate) -> BookingResult<Vec<BookedSpan>>;

    async fn find_active_barber(&self, barber_id: Uuid) -> BookingResult<Option<Barber>>;

    async fn find_active_service(&self, service_id: Uuid) -> BookingResult<Option<Service>>;

    /// Persists the appointment. Fails with
    /// [`crate::errors::BookingError::SlotTaken`] when another non-cancelled
    /// appointment already holds the same barber, date and start time.
    async fn create_appointment(&self, appointment: &NewAppointment) -> BookingResult<Appointment>;
}
