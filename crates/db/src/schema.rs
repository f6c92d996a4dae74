use barbershop_core::models::settings::DEFAULT_SETTINGS;
use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        full_name VARCHAR(255) NOT NULL,
        phone VARCHAR(32) NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_roles (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        role VARCHAR(32) NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
        CONSTRAINT user_roles_user_role_key UNIQUE (user_id, role)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        token VARCHAR(128) PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        expires_at TIMESTAMP WITH TIME ZONE NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS barbers (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        photo_url TEXT NULL,
        bio TEXT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS barber_schedules (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        barber_id UUID NOT NULL REFERENCES barbers(id) ON DELETE CASCADE,
        day_of_week SMALLINT NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
        start_time TIME NOT NULL,
        end_time TIME NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        break_start TIME NULL,
        break_end TIME NULL,
        CONSTRAINT barber_schedules_barber_day_key UNIQUE (barber_id, day_of_week)
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name VARCHAR(255) NOT NULL,
        description TEXT NULL,
        duration_minutes INTEGER NOT NULL CHECK (duration_minutes > 0),
        price_cents BIGINT NOT NULL CHECK (price_cents > 0),
        is_active BOOLEAN NOT NULL DEFAULT TRUE
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        client_name VARCHAR(100) NOT NULL,
        client_phone VARCHAR(15) NOT NULL,
        barber_id UUID NOT NULL REFERENCES barbers(id) ON DELETE CASCADE,
        service_id UUID NULL REFERENCES services(id) ON DELETE SET NULL,
        appointment_date DATE NOT NULL,
        appointment_time TIME NOT NULL,
        status VARCHAR(16) NOT NULL DEFAULT 'pending',
        user_id UUID NULL REFERENCES users(id) ON DELETE SET NULL,
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
    );
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS settings (
        id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        key VARCHAR(64) NOT NULL UNIQUE,
        value TEXT NOT NULL,
        label VARCHAR(255) NOT NULL,
        category VARCHAR(64) NOT NULL
    );
    "#,
];

// One statement each: prepared statements cannot hold several commands.
const INDEXES: &[&str] = &[
    // A slot can be held by a single live appointment; cancelling frees it.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_appointments_unique_slot
        ON appointments(barber_id, appointment_date, appointment_time)
        WHERE status <> 'cancelled';
    "#,
    "CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);",
    "CREATE INDEX IF NOT EXISTS idx_barber_schedules_barber_id ON barber_schedules(barber_id);",
    "CREATE INDEX IF NOT EXISTS idx_sessions_user_id ON sessions(user_id);",
    "CREATE INDEX IF NOT EXISTS idx_user_roles_role ON user_roles(role);",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }

    seed_settings(pool).await?;

    info!("Database schema initialized successfully.");
    Ok(())
}

/// Inserts any default setting that is not stored yet; existing values win.
async fn seed_settings(pool: &Pool<Postgres>) -> Result<()> {
    for &(key, value, label, category) in DEFAULT_SETTINGS {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value, label, category)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (key) DO NOTHING
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(label)
        .bind(category)
        .execute(pool)
        .await?;
    }

    Ok(())
}
