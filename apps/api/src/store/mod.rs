//! Record store — PostgreSQL-backed candidates, jobs and candidate communications.

pub mod candidates;
pub mod communications;
pub mod jobs;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type};
use tracing::info;

/// Creates the PostgreSQL connection pool and applies pending migrations.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    info!("PostgreSQL pool established ({max_connections} connections max), migrations applied");
    Ok(pool)
}

/// Appends `, column = $n` to an `UPDATE ... SET` being built.
pub(crate) fn push_assignment<'a, T>(query: &mut QueryBuilder<'a, Postgres>, column: &str, value: T)
where
    T: 'a + Encode<'a, Postgres> + Send + Type<Postgres>,
{
    query.push(", ").push(column).push(" = ").push_bind(value);
}
