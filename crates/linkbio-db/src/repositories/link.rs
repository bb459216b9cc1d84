//! PostgreSQL implementation of LinkRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use linkbio_core::entities::{Link, NewLink};
use linkbio_core::traits::{LinkPatch, LinkRepository, RepoResult};

use crate::models::LinkModel;

use super::error::{link_not_found, map_db_error};

const LINK_COLUMNS: &str = "id, profile_id, title, url, icon, position, is_active, \
     click_count, scheduled_at, created_at";

/// PostgreSQL implementation of LinkRepository
#[derive(Clone)]
pub struct PgLinkRepository {
    pool: PgPool,
}

impl PgLinkRepository {
    /// Create a new PgLinkRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    #[instrument(skip(self))]
    async fn find_by_profile(&self, profile_id: Uuid) -> RepoResult<Vec<Link>> {
        let result = sqlx::query_as::<_, LinkModel>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE profile_id = $1 ORDER BY position ASC"
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_active_by_profile(&self, profile_id: Uuid) -> RepoResult<Vec<Link>> {
        let result = sqlx::query_as::<_, LinkModel>(&format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE profile_id = $1 AND is_active = TRUE \
             ORDER BY position ASC"
        ))
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Link::from).collect())
    }

    #[instrument(skip(self, link))]
    async fn insert(&self, link: &NewLink) -> RepoResult<Link> {
        let result = sqlx::query_as::<_, LinkModel>(&format!(
            "INSERT INTO links (profile_id, title, url, position, is_active, scheduled_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(link.profile_id)
        .bind(&link.title)
        .bind(&link.url)
        .bind(link.position)
        .bind(link.is_active)
        .bind(link.scheduled_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Link::from(result))
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: &LinkPatch) -> RepoResult<bool> {
        if patch.is_empty() {
            return Ok(true);
        }

        // clear_schedule wins over an explicit scheduled_at
        let result = sqlx::query(
            r"
            UPDATE links
            SET title = COALESCE($2, title),
                url = COALESCE($3, url),
                icon = CASE WHEN $4 IS NULL THEN icon ELSE NULLIF($4, '') END,
                position = COALESCE($5, position),
                is_active = COALESCE($6, is_active),
                scheduled_at = CASE
                    WHEN $8 THEN NULL
                    WHEN $7 IS NULL THEN scheduled_at
                    ELSE $7
                END
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.url)
        .bind(&patch.icon)
        .bind(patch.position)
        .bind(patch.is_active)
        .bind(patch.scheduled_at)
        .bind(patch.clear_schedule)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn set_position(&self, id: Uuid, position: i32) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE links SET position = $2 WHERE id = $1
            ",
        )
        .bind(id)
        .bind(position)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM links WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(link_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_profile(&self, profile_id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM links WHERE profile_id = $1
            ",
        )
        .bind(profile_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn get_click_count(&self, id: Uuid) -> RepoResult<Option<i64>> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT click_count FROM links WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn set_click_count(&self, id: Uuid, value: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE links SET click_count = $2 WHERE id = $1
            ",
        )
        .bind(id)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
