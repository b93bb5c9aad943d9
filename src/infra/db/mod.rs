//! Postgres-backed repository adapter.

mod posts;

use std::num::NonZeroU32;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::application::repos::RepoError;
use crate::infra::error::InfraError;

pub struct PostgresRepositories {
    pool: PgPool,
}

impl PostgresRepositories {
    pub async fn connect(url: &str, max_connections: NonZeroU32) -> Result<Self, InfraError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections.get())
            .connect(url)
            .await
            .map_err(|err| InfraError::database(format!("failed to connect: {err}")))?;
        Ok(Self { pool })
    }

    /// Apply the embedded migrations that provision the audited `posts`
    /// table. Intended for local or standalone deployments; a host
    /// publishing system will usually own this table already.
    pub async fn migrate(&self) -> Result<(), InfraError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|err| InfraError::database(format!("failed to run migrations: {err}")))
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

pub(crate) fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::PoolTimedOut => RepoError::Timeout,
        other => RepoError::from_persistence(other),
    }
}

/// Escape `LIKE` metacharacters so user terms match literally.
pub(crate) fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
