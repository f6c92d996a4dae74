//! # Barbershop Core
//!
//! Domain types shared by the database and API crates, together with the
//! slot availability calculator that decides which start times can still be
//! offered to clients.
//!
//! - [`slots`]: pure slot computation over a day's schedule and bookings
//! - [`models`]: barbers, schedules, services, appointments, settings, accounts
//! - [`ports`]: the storage contract the booking flow depends on
//! - [`validation`]: input checks applied before anything is persisted
//! - [`errors`]: the crate-wide error type

pub mod errors;
pub mod models;
pub mod ports;
pub mod slots;
pub mod validation;

pub use errors::{BookingError, BookingResult};
pub use slots::{BLOCK_MINUTES, BookedSpan, DaySchedule, compute_available_slots};
