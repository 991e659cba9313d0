use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create schedules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            batch VARCHAR(255) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            date DATE NULL,
            day_of_week SMALLINT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            reminder_time TIME NULL,
            meeting_link TEXT NULL,
            reminder_sent_date DATE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week IS NULL OR day_of_week BETWEEN 0 AND 6),
            CONSTRAINT has_occurrence CHECK (date IS NOT NULL OR day_of_week IS NOT NULL),
            CONSTRAINT valid_class_time CHECK (end_time > start_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create enrollments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS enrollments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            batch VARCHAR(255) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create teachers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teachers (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL UNIQUE,
            full_name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            batches TEXT[] NOT NULL DEFAULT '{}',
            subjects TEXT[] NOT NULL DEFAULT '{}'
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance table; one row per participant, schedule and day
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            display_name VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL CHECK (role IN ('teacher', 'student')),
            schedule_id UUID NULL REFERENCES schedules(id),
            batch VARCHAR(255) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            class_date DATE NOT NULL,
            joined_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT attendance_participant_day UNIQUE NULLS NOT DISTINCT (user_id, schedule_id, class_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create recordings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recordings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            batch VARCHAR(255) NOT NULL,
            subject VARCHAR(255) NOT NULL,
            title VARCHAR(255) NOT NULL,
            recording_date DATE NOT NULL,
            url TEXT NULL,
            email_sent BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_schedules_class ON schedules(batch, subject);
        CREATE INDEX IF NOT EXISTS idx_schedules_reminder_time ON schedules(reminder_time) WHERE reminder_time IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_enrollments_user_id ON enrollments(user_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_presence ON attendance(batch, subject, class_date, role);
        CREATE INDEX IF NOT EXISTS idx_recordings_pending ON recordings(recording_date) WHERE NOT email_sent;
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
