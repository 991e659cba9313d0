use crate::models::DbRecording;
use chrono::{NaiveDate, Utc};
use classgate_core::models::recording::CreateRecordingRequest;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_recording(
    pool: &Pool<Postgres>,
    request: &CreateRecordingRequest,
) -> Result<DbRecording> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let recording = sqlx::query_as::<_, DbRecording>(
        r#"
        INSERT INTO recordings (id, batch, subject, title, recording_date, url, email_sent, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)
        RETURNING id, batch, subject, title, recording_date, url, email_sent, created_at
        "#,
    )
    .bind(id)
    .bind(request.batch.trim())
    .bind(request.subject.trim())
    .bind(&request.title)
    .bind(request.recording_date)
    .bind(request.url.as_deref())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(recording)
}

pub async fn get_unannounced_recordings(
    pool: &Pool<Postgres>,
    date: NaiveDate,
) -> Result<Vec<DbRecording>> {
    let recordings = sqlx::query_as::<_, DbRecording>(
        r#"
        SELECT id, batch, subject, title, recording_date, url, email_sent, created_at
        FROM recordings
        WHERE recording_date = $1 AND NOT email_sent
        ORDER BY created_at ASC
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(recordings)
}

pub async fn mark_email_sent(pool: &Pool<Postgres>, id: Uuid) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE recordings
        SET email_sent = TRUE
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}
