use crate::models::DbSchedule;
use chrono::{NaiveDate, Utc};
use classgate_core::models::schedule::{CreateScheduleRequest, RescheduleRequest};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SCHEDULE_COLUMNS: &str = "id, batch, subject, date, day_of_week, start_time, end_time, \
     reminder_time, meeting_link, reminder_sent_date, created_at";

pub async fn create_schedule(
    pool: &Pool<Postgres>,
    request: &CreateScheduleRequest,
) -> Result<DbSchedule> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating schedule: id={}, batch={}, subject={}",
        id, request.batch, request.subject
    );

    let schedule = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        INSERT INTO schedules (id, batch, subject, date, day_of_week, start_time, end_time,
                               reminder_time, meeting_link, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING {SCHEDULE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.batch.trim())
    .bind(request.subject.trim())
    .bind(request.date)
    .bind(request.day_of_week)
    .bind(request.start_time)
    .bind(request.end_time)
    .bind(request.reminder_time)
    .bind(request.meeting_link.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(schedule)
}

pub async fn get_schedule_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSchedule>> {
    tracing::debug!("Getting schedule by id: {}", id);

    let schedule = sqlx::query_as::<_, DbSchedule>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if schedule.is_none() {
        tracing::debug!("Schedule not found: id={}", id);
    }

    Ok(schedule)
}

pub async fn get_schedules_with_reminder(pool: &Pool<Postgres>) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(&format!(
        "SELECT {SCHEDULE_COLUMNS} FROM schedules WHERE reminder_time IS NOT NULL"
    ))
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn get_schedules_for_class(
    pool: &Pool<Postgres>,
    batch: &str,
    subject: &str,
) -> Result<Vec<DbSchedule>> {
    let schedules = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        SELECT {SCHEDULE_COLUMNS}
        FROM schedules
        WHERE batch = $1 AND subject = $2
        ORDER BY end_time ASC
        "#
    ))
    .bind(batch)
    .bind(subject)
    .fetch_all(pool)
    .await?;

    Ok(schedules)
}

pub async fn reschedule(
    pool: &Pool<Postgres>,
    id: Uuid,
    request: &RescheduleRequest,
) -> Result<Option<DbSchedule>> {
    let schedule = sqlx::query_as::<_, DbSchedule>(&format!(
        r#"
        UPDATE schedules
        SET date = $2, day_of_week = $3, start_time = $4, end_time = $5, reminder_sent_date = NULL
        WHERE id = $1
        RETURNING {SCHEDULE_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(request.date)
    .bind(request.day_of_week)
    .bind(request.start_time)
    .bind(request.end_time)
    .fetch_optional(pool)
    .await?;

    Ok(schedule)
}

pub async fn mark_reminder_sent(pool: &Pool<Postgres>, id: Uuid, date: NaiveDate) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE schedules
        SET reminder_sent_date = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(date)
    .execute(pool)
    .await?;

    Ok(())
}
