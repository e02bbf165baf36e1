use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::job::{JobRow, JobUpdate, NewJob};
use crate::store::push_assignment;

/// All jobs, newest first.
pub async fn list_jobs(pool: &PgPool) -> Result<Vec<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn get_job(pool: &PgPool, id: Uuid) -> Result<Option<JobRow>, sqlx::Error> {
    sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_job(pool: &PgPool, job: &NewJob) -> Result<JobRow, sqlx::Error> {
    sqlx::query_as::<_, JobRow>(
        r#"
        INSERT INTO jobs
            (title, description, requirements, required_skills, min_experience, max_experience,
             location, employment_type, salary_min, salary_max, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 'open'))
        RETURNING *
        "#,
    )
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.requirements)
    .bind(&job.required_skills)
    .bind(job.min_experience.unwrap_or(0))
    .bind(job.max_experience)
    .bind(&job.location)
    .bind(job.employment_type.map(|t| t.as_str()))
    .bind(job.salary_min)
    .bind(job.salary_max)
    .bind(&job.status)
    .fetch_one(pool)
    .await
}

/// Partial update: only the fields present in `update` are written.
pub async fn update_job(
    pool: &PgPool,
    id: Uuid,
    update: &JobUpdate,
) -> Result<Option<JobRow>, sqlx::Error> {
    let mut query = job_update_query(id, update);
    query.build_query_as::<JobRow>().fetch_optional(pool).await
}

fn job_update_query(id: Uuid, update: &JobUpdate) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new("UPDATE jobs SET updated_at = NOW()");

    if let Some(title) = &update.title {
        push_assignment(&mut query, "title", title);
    }
    if let Some(description) = &update.description {
        push_assignment(&mut query, "description", description);
    }
    if let Some(requirements) = &update.requirements {
        push_assignment(&mut query, "requirements", requirements);
    }
    if let Some(skills) = &update.required_skills {
        push_assignment(&mut query, "required_skills", skills);
    }
    if let Some(min) = update.min_experience {
        push_assignment(&mut query, "min_experience", min);
    }
    if let Some(max) = update.max_experience {
        push_assignment(&mut query, "max_experience", max);
    }
    if let Some(location) = &update.location {
        push_assignment(&mut query, "location", location);
    }
    if let Some(employment_type) = update.employment_type {
        push_assignment(&mut query, "employment_type", employment_type.map(|t| t.as_str()));
    }
    if let Some(salary_min) = update.salary_min {
        push_assignment(&mut query, "salary_min", salary_min);
    }
    if let Some(salary_max) = update.salary_max {
        push_assignment(&mut query, "salary_max", salary_max);
    }
    if let Some(status) = &update.status {
        push_assignment(&mut query, "status", status);
    }

    query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    query
}

/// Returns `false` when no row had that id.
pub async fn delete_job(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_max_experience_is_written_as_clear() {
        let update: JobUpdate =
            serde_json::from_value(serde_json::json!({ "max_experience": null })).unwrap();
        let query = job_update_query(Uuid::nil(), &update);
        assert_eq!(
            query.sql(),
            "UPDATE jobs SET updated_at = NOW(), max_experience = $1 WHERE id = $2 RETURNING *"
        );
    }

    #[test]
    fn test_absent_fields_are_not_touched() {
        let update: JobUpdate =
            serde_json::from_value(serde_json::json!({ "title": "SRE", "location": "Remote" }))
                .unwrap();
        let query = job_update_query(Uuid::nil(), &update);
        assert_eq!(
            query.sql(),
            "UPDATE jobs SET updated_at = NOW(), title = $1, location = $2 WHERE id = $3 RETURNING *"
        );
    }
}
