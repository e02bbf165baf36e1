use sqlx::PgPool;
use uuid::Uuid;

use crate::models::communication::{CommunicationRow, NewCommunication};

/// Messages sent to a candidate, newest first.
pub async fn list_communications(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<CommunicationRow>, sqlx::Error> {
    sqlx::query_as::<_, CommunicationRow>(
        "SELECT * FROM communications WHERE candidate_id = $1 ORDER BY sent_at DESC",
    )
    .bind(candidate_id)
    .fetch_all(pool)
    .await
}

pub async fn log_communication(
    pool: &PgPool,
    communication: &NewCommunication,
) -> Result<CommunicationRow, sqlx::Error> {
    sqlx::query_as::<_, CommunicationRow>(
        r#"
        INSERT INTO communications (candidate_id, subject, body, sent_by, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(communication.candidate_id)
    .bind(&communication.subject)
    .bind(&communication.body)
    .bind(communication.sent_by)
    .bind(communication.status.as_str())
    .fetch_one(pool)
    .await
}
