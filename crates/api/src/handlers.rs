pub mod admin;
pub mod appointment;
pub mod auth;
pub mod availability;
pub mod barber;
pub mod schedule;
pub mod service;
pub mod settings;
