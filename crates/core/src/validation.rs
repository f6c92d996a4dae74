//! Input checks applied by the API before anything reaches storage.

use chrono::{Duration, NaiveDate};

use crate::{
    errors::{BookingError, BookingResult},
    models::{schedule::ScheduleDayRequest, service::ServiceRequest},
};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const PHOTO_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

pub fn validate_client_name(name: &str) -> BookingResult<()> {
    let length = name.trim().chars().count();
    if length < 2 {
        return Err(BookingError::Validation(
            "Name must have at least 2 characters".to_string(),
        ));
    }
    if length > 100 {
        return Err(BookingError::Validation(
            "Name must have at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

/// Phones are 10 to 15 characters of digits, spaces, dashes and parentheses.
pub fn validate_client_phone(phone: &str) -> BookingResult<()> {
    let length = phone.chars().count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));

    if !(10..=15).contains(&length) || !allowed {
        return Err(BookingError::Validation("Invalid phone number".to_string()));
    }
    Ok(())
}

/// Barber names and account full names only need to be non-blank.
pub fn validate_required(field: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> BookingResult<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(BookingError::Validation("Invalid email".to_string()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> BookingResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BookingError::Validation(format!(
            "Password must have at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_service(request: &ServiceRequest) -> BookingResult<()> {
    if request.trimmed_name().is_empty() {
        return Err(BookingError::Validation("Service name is required".to_string()));
    }
    if request.price_cents <= 0 {
        return Err(BookingError::Validation(
            "Price must be greater than zero".to_string(),
        ));
    }
    if request.duration_minutes == 0 {
        return Err(BookingError::Validation(
            "Duration must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Checks one weekday row before it is written.
///
/// Inactive days are stored as given; their hours are never used.
pub fn validate_schedule_day(day: &ScheduleDayRequest) -> BookingResult<()> {
    if day.day_of_week > 6 {
        return Err(BookingError::Validation(format!(
            "Invalid day of week: {}",
            day.day_of_week
        )));
    }

    if !day.is_active {
        return Ok(());
    }

    if day.end_time <= day.start_time {
        return Err(BookingError::Validation(
            "Closing time must be after opening time".to_string(),
        ));
    }

    match (day.break_start, day.break_end) {
        (None, None) => Ok(()),
        (Some(break_start), Some(break_end)) => {
            if break_end <= break_start {
                return Err(BookingError::Validation(
                    "Break must end after it starts".to_string(),
                ));
            }
            if break_start < day.start_time || break_end > day.end_time {
                return Err(BookingError::Validation(
                    "Break must fall within working hours".to_string(),
                ));
            }
            Ok(())
        }
        _ => Err(BookingError::Validation(
            "Break needs both a start and an end".to_string(),
        )),
    }
}

/// Clients may book from today up to `window_days` ahead, inclusive.
pub fn within_booking_window(date: NaiveDate, today: NaiveDate, window_days: u32) -> bool {
    date >= today && date <= today + Duration::days(i64::from(window_days))
}

pub fn validate_booking_date(date: NaiveDate, today: NaiveDate, window_days: u32) -> BookingResult<()> {
    if !within_booking_window(date, today, window_days) {
        return Err(BookingError::Validation(format!(
            "Appointments can only be booked between today and {} days ahead",
            window_days
        )));
    }
    Ok(())
}

/// Returns the lowercased extension of an uploaded photo name.
pub fn photo_extension(file_name: &str) -> BookingResult<String> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, extension)| extension.to_ascii_lowercase())
        .filter(|extension| PHOTO_EXTENSIONS.contains(&extension.as_str()));

    extension.ok_or_else(|| {
        BookingError::Validation(format!(
            "Unsupported photo type; expected one of {}",
            PHOTO_EXTENSIONS.join(", ")
        ))
    })
}
