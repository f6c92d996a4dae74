pub mod admin;
pub mod appointment;
pub mod auth;
pub mod barber;
pub mod health;
pub mod service;
pub mod settings;
