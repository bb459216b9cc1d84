//! Link database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the links table
#[derive(Debug, Clone, FromRow)]
pub struct LinkModel {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub title: String,
    pub url: String,
    pub icon: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub click_count: i64,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
