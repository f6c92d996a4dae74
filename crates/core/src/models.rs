pub mod account;
pub mod appointment;
pub mod availability;
pub mod barber;
pub mod schedule;
pub mod service;
pub mod settings;
