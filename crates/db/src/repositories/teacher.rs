use crate::models::DbTeacher;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_teacher_by_user_id(pool: &Pool<Postgres>, user_id: Uuid) -> Result<Option<DbTeacher>> {
    let teacher = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, user_id, full_name, email, batches, subjects
        FROM teachers
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}

pub async fn get_teachers(pool: &Pool<Postgres>) -> Result<Vec<DbTeacher>> {
    let teachers = sqlx::query_as::<_, DbTeacher>(
        r#"
        SELECT id, user_id, full_name, email, batches, subjects
        FROM teachers
        ORDER BY full_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(teachers)
}
