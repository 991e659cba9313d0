use crate::models::DbEnrollment;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_enrollment_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEnrollment>> {
    let enrollment = sqlx::query_as::<_, DbEnrollment>(
        r#"
        SELECT id, user_id, batch, subject
        FROM enrollments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(enrollment)
}
