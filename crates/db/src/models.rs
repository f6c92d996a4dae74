use barbershop_core::models::{
    account::{AdminSummary, User},
    appointment::{Appointment, AppointmentStatus, AppointmentWithService},
    barber::Barber,
    schedule::WeekdaySchedule,
    service::Service,
    settings::Setting,
};
use barbershop_core::slots::BookedSpan;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSession {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAdmin {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub granted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBarber {
    pub id: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBarberSchedule {
    pub id: Uuid,
    pub barber_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub duration_minutes: i32,
    pub price_cents: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub client_name: String,
    pub client_phone: String,
    pub barber_id: Uuid,
    pub service_id: Option<Uuid>,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Appointment joined with its (possibly deleted) service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointmentWithService {
    #[sqlx(flatten)]
    pub appointment: DbAppointment,
    pub service_name: Option<String>,
    pub service_description: Option<String>,
    pub service_duration_minutes: Option<i32>,
    pub service_price_cents: Option<i64>,
    pub service_is_active: Option<bool>,
}

/// Start time and booked duration of a non-cancelled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookedSpan {
    pub appointment_time: NaiveTime,
    pub duration_minutes: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSetting {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub label: String,
    pub category: String,
}

/// Negative durations can only come from bad data; they hold a single block.
fn non_negative(minutes: i32) -> u32 {
    u32::try_from(minutes).unwrap_or(0)
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        User {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone: user.phone,
            created_at: user.created_at,
        }
    }
}

impl From<DbAdmin> for AdminSummary {
    fn from(admin: DbAdmin) -> Self {
        AdminSummary {
            user_id: admin.user_id,
            email: admin.email,
            full_name: admin.full_name,
            granted_at: admin.granted_at,
        }
    }
}

impl From<DbBarber> for Barber {
    fn from(barber: DbBarber) -> Self {
        Barber {
            id: barber.id,
            name: barber.name,
            photo_url: barber.photo_url,
            bio: barber.bio,
            is_active: barber.is_active,
            created_at: barber.created_at,
        }
    }
}

impl From<DbBarberSchedule> for WeekdaySchedule {
    fn from(row: DbBarberSchedule) -> Self {
        WeekdaySchedule {
            id: row.id,
            barber_id: row.barber_id,
            day_of_week: u8::try_from(row.day_of_week).unwrap_or(u8::MAX),
            start_time: row.start_time,
            end_time: row.end_time,
            is_active: row.is_active,
            break_start: row.break_start,
            break_end: row.break_end,
        }
    }
}

impl From<DbService> for Service {
    fn from(service: DbService) -> Self {
        Service {
            id: service.id,
            name: service.name,
            description: service.description,
            duration_minutes: non_negative(service.duration_minutes),
            price_cents: service.price_cents,
            is_active: service.is_active,
        }
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = barbershop_core::BookingError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            client_name: row.client_name,
            client_phone: row.client_phone,
            barber_id: row.barber_id,
            service_id: row.service_id,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            status: row.status.parse::<AppointmentStatus>()?,
            user_id: row.user_id,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<DbAppointmentWithService> for AppointmentWithService {
    type Error = barbershop_core::BookingError;

    fn try_from(row: DbAppointmentWithService) -> Result<Self, Self::Error> {
        let service = match (row.appointment.service_id, row.service_name) {
            (Some(id), Some(name)) => Some(Service {
                id,
                name,
                description: row.service_description,
                duration_minutes: non_negative(row.service_duration_minutes.unwrap_or(0)),
                price_cents: row.service_price_cents.unwrap_or(0),
                is_active: row.service_is_active.unwrap_or(false),
            }),
            _ => None,
        };

        Ok(AppointmentWithService {
            appointment: Appointment::try_from(row.appointment)?,
            service,
        })
    }
}

impl From<DbBookedSpan> for BookedSpan {
    fn from(span: DbBookedSpan) -> Self {
        BookedSpan {
            start_time: span.appointment_time,
            duration_minutes: non_negative(span.duration_minutes),
        }
    }
}

impl From<DbSetting> for Setting {
    fn from(setting: DbSetting) -> Self {
        Setting {
            id: setting.id,
            key: setting.key,
            value: setting.value,
            label: setting.label,
            category: setting.category,
        }
    }
}
