use async_trait::async_trait;
use barbershop_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, NewAppointment},
        barber::Barber,
        service::Service,
    },
    ports::BookingStore,
    slots::{BookedSpan, DaySchedule},
};
use chrono::NaiveDate;
use mockall::mock;
use uuid::Uuid;

// In-memory stand-in for the Postgres store, used by handler tests.
mock! {
    pub BookingStore {}

    #[async_trait]
    impl BookingStore for BookingStore {
        async fn day_schedule(
            &self,
            barber_id: Uuid,
            day_of_week: u8,
        ) -> BookingResult<Option<DaySchedule>>;

        async fn booked_spans(
            &self,
            barber_id: Uuid,
            date: NaiveDate,
        ) -> BookingResult<Vec<BookedSpan>>;

        async fn find_active_barber(&self, barber_id: Uuid) -> BookingResult<Option<Barber>>;

        async fn find_active_service(&self, service_id: Uuid) -> BookingResult<Option<Service>>;

        async fn create_appointment(
            &self,
            appointment: &NewAppointment,
        ) -> BookingResult<Appointment>;
    }
}
