use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::candidate::{
    CandidateRow, CandidateSummaryRow, CandidateUpdate, NewCandidate, PipelineStage,
};
use crate::store::push_assignment;

/// All candidates, newest first.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn get_candidate(pool: &PgPool, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// The projection the match engine needs, in insertion order.
pub async fn list_match_summaries(pool: &PgPool) -> Result<Vec<CandidateSummaryRow>, sqlx::Error> {
    sqlx::query_as::<_, CandidateSummaryRow>(
        "SELECT id, full_name, skills, total_experience, location FROM candidates ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await
}

pub async fn create_candidate(
    pool: &PgPool,
    candidate: &NewCandidate,
) -> Result<CandidateRow, sqlx::Error> {
    let stage = candidate.stage.unwrap_or(PipelineStage::Screening);

    sqlx::query_as::<_, CandidateRow>(
        r#"
        INSERT INTO candidates
            (full_name, email, phone, location, total_experience, relevant_experience,
             skills, education, employment_history, links, projects,
             resume_file_path, resume_file_name, parsed_resume_text, source, notes,
             stage, tags, current_salary, expected_salary, notice_period)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20, $21)
        RETURNING *
        "#,
    )
    .bind(&candidate.full_name)
    .bind(&candidate.email)
    .bind(&candidate.phone)
    .bind(&candidate.location)
    .bind(&candidate.total_experience)
    .bind(&candidate.relevant_experience)
    .bind(&candidate.skills)
    .bind(&candidate.education)
    .bind(&candidate.employment_history)
    .bind(&candidate.links)
    .bind(&candidate.projects)
    .bind(&candidate.resume_file_path)
    .bind(&candidate.resume_file_name)
    .bind(&candidate.parsed_resume_text)
    .bind(&candidate.source)
    .bind(&candidate.notes)
    .bind(stage.as_str())
    .bind(&candidate.tags)
    .bind(candidate.current_salary)
    .bind(candidate.expected_salary)
    .bind(&candidate.notice_period)
    .fetch_one(pool)
    .await
}

/// Partial update: only the fields present in `update` are written.
pub async fn update_candidate(
    pool: &PgPool,
    id: Uuid,
    update: &CandidateUpdate,
) -> Result<Option<CandidateRow>, sqlx::Error> {
    let mut query = candidate_update_query(id, update);
    query
        .build_query_as::<CandidateRow>()
        .fetch_optional(pool)
        .await
}

fn candidate_update_query(id: Uuid, update: &CandidateUpdate) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new("UPDATE candidates SET updated_at = NOW()");

    if let Some(value) = &update.full_name {
        push_assignment(&mut query, "full_name", value);
    }
    if let Some(value) = &update.email {
        push_assignment(&mut query, "email", value);
    }
    if let Some(value) = &update.phone {
        push_assignment(&mut query, "phone", value);
    }
    if let Some(value) = &update.location {
        push_assignment(&mut query, "location", value);
    }
    if let Some(value) = &update.total_experience {
        push_assignment(&mut query, "total_experience", value);
    }
    if let Some(value) = &update.relevant_experience {
        push_assignment(&mut query, "relevant_experience", value);
    }
    if let Some(value) = &update.skills {
        push_assignment(&mut query, "skills", value);
    }
    if let Some(value) = &update.education {
        push_assignment(&mut query, "education", value);
    }
    if let Some(value) = &update.employment_history {
        push_assignment(&mut query, "employment_history", value);
    }
    if let Some(value) = &update.links {
        push_assignment(&mut query, "links", value);
    }
    if let Some(value) = &update.projects {
        push_assignment(&mut query, "projects", value);
    }
    if let Some(value) = &update.notes {
        push_assignment(&mut query, "notes", value);
    }
    if let Some(value) = &update.source {
        push_assignment(&mut query, "source", value);
    }
    if let Some(stage) = update.stage {
        push_assignment(&mut query, "stage", stage.as_str());
    }
    if let Some(tags) = &update.tags {
        push_assignment(&mut query, "tags", tags);
    }
    if let Some(salary) = update.current_salary {
        push_assignment(&mut query, "current_salary", salary);
    }
    if let Some(salary) = update.expected_salary {
        push_assignment(&mut query, "expected_salary", salary);
    }
    if let Some(notice) = &update.notice_period {
        push_assignment(&mut query, "notice_period", notice);
    }

    query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    query
}

/// Returns `false` when no row had that id.
pub async fn delete_candidate(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_sets_only_present_columns() {
        let update: CandidateUpdate = serde_json::from_value(serde_json::json!({
            "stage": "offer",
            "notes": null
        }))
        .unwrap();
        let query = candidate_update_query(Uuid::nil(), &update);
        assert_eq!(
            query.sql(),
            "UPDATE candidates SET updated_at = NOW(), notes = $1, stage = $2 WHERE id = $3 RETURNING *"
        );
    }

    #[test]
    fn test_empty_update_only_touches_timestamp() {
        let update = CandidateUpdate::default();
        let query = candidate_update_query(Uuid::nil(), &update);
        assert_eq!(
            query.sql(),
            "UPDATE candidates SET updated_at = NOW() WHERE id = $1 RETURNING *"
        );
    }
}
