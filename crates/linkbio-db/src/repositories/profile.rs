//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use linkbio_core::entities::{NewProfile, Profile};
use linkbio_core::error::DomainError;
use linkbio_core::traits::{ProfilePatch, ProfileRepository, RepoResult};

use crate::mappers::theme_columns;
use crate::models::ProfileModel;

use super::error::{map_db_error, map_unique_violation, profile_not_found};

const PROFILE_COLUMNS: &str = "id, username, display_name, bio, email, avatar_url, \
     theme, custom_colors, plan, page_views, created_at";

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Profile::from))
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM profiles WHERE username = $1)
            ",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, profile))]
    async fn upsert(&self, profile: &NewProfile) -> RepoResult<()> {
        let (theme, custom_colors) = theme_columns(&profile.theme);

        // Provisioning races with server-side signup hooks; losing the race
        // on the id is fine, the existing row wins.
        sqlx::query(
            r"
            INSERT INTO profiles (id, username, display_name, email, avatar_url, theme, custom_colors)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(profile.id)
        .bind(&profile.username)
        .bind(&profile.display_name)
        .bind(&profile.email)
        .bind(&profile.avatar_url)
        .bind(theme)
        .bind(custom_colors)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::UsernameTaken(profile.username.clone())))?;

        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: Uuid, patch: &ProfilePatch) -> RepoResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let (theme, custom_colors) = match &patch.theme {
            Some(t) => {
                let (name, colors) = theme_columns(t);
                (Some(name), colors)
            }
            None => (None, None),
        };

        // NULL binds leave columns unchanged; for nullable text columns an
        // empty string clears the value.
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET username = COALESCE($2, username),
                display_name = CASE WHEN $3 IS NULL THEN display_name ELSE NULLIF($3, '') END,
                bio = CASE WHEN $4 IS NULL THEN bio ELSE NULLIF($4, '') END,
                avatar_url = CASE WHEN $5 IS NULL THEN avatar_url ELSE NULLIF($5, '') END,
                theme = COALESCE($6, theme),
                custom_colors = CASE WHEN $6 IS NULL THEN custom_colors ELSE $7 END,
                plan = COALESCE($8, plan)
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&patch.username)
        .bind(&patch.display_name)
        .bind(&patch.bio)
        .bind(&patch.avatar_url)
        .bind(theme)
        .bind(custom_colors)
        .bind(patch.plan.map(|p| p.as_str().to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::UsernameTaken(patch.username.clone().unwrap_or_default())
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM profiles WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(profile_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_page_views(&self, username: &str) -> RepoResult<Option<i64>> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT page_views FROM profiles WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn set_page_views(&self, username: &str, value: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE profiles SET page_views = $2 WHERE username = $1
            ",
        )
        .bind(username)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}
