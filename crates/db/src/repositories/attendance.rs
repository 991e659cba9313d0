use crate::models::DbAttendance;
use chrono::Utc;
use classgate_core::models::attendance::{AttendanceQuery, NewAttendance};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn find_attendance(
    pool: &Pool<Postgres>,
    query: &AttendanceQuery,
) -> Result<Vec<DbAttendance>> {
    let records = sqlx::query_as::<_, DbAttendance>(
        r#"
        SELECT id, user_id, display_name, role, schedule_id, batch, subject, class_date, joined_at
        FROM attendance
        WHERE batch = $1
          AND ($2::text IS NULL OR subject = $2)
          AND class_date = $3
          AND role = $4
          AND ($5::uuid IS NULL OR schedule_id = $5)
        ORDER BY joined_at ASC
        "#,
    )
    .bind(&query.batch)
    .bind(&query.subject)
    .bind(query.class_date)
    .bind(query.role.as_str())
    .bind(query.schedule_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn upsert_attendance(pool: &Pool<Postgres>, record: &NewAttendance) -> Result<DbAttendance> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let attendance = sqlx::query_as::<_, DbAttendance>(
        r#"
        INSERT INTO attendance (id, user_id, display_name, role, schedule_id, batch, subject, class_date, joined_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT ON CONSTRAINT attendance_participant_day
        DO UPDATE SET display_name = EXCLUDED.display_name, joined_at = EXCLUDED.joined_at
        RETURNING id, user_id, display_name, role, schedule_id, batch, subject, class_date, joined_at
        "#,
    )
    .bind(id)
    .bind(record.user_id)
    .bind(&record.display_name)
    .bind(record.role.as_str())
    .bind(record.schedule_id)
    .bind(&record.batch)
    .bind(&record.subject)
    .bind(record.class_date)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(attendance)
}
