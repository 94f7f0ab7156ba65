use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{NewProfile, UserProfileRow};

/// Where submitted profiles live. Carried in `AppState` as `Arc<dyn ProfileStore>`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert(&self, profile: &NewProfile<'_>) -> Result<UserProfileRow, sqlx::Error>;
    async fn get(&self, id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error>;
}

/// Postgres-backed store over the `user_profiles` table.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn insert(&self, profile: &NewProfile<'_>) -> Result<UserProfileRow, sqlx::Error> {
        insert_profile(&self.pool, profile).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
        get_profile(&self.pool, id).await
    }
}

/// Inserts a submitted profile. The database assigns `id` and `created_at`.
pub async fn insert_profile(
    pool: &PgPool,
    profile: &NewProfile<'_>,
) -> Result<UserProfileRow, sqlx::Error> {
    let row = sqlx::query_as::<_, UserProfileRow>(
        r#"
        INSERT INTO user_profiles (name, goals, interests, current_skills)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, goals, interests, current_skills, created_at
        "#,
    )
    .bind(profile.name)
    .bind(profile.goals)
    .bind(profile.interests)
    .bind(profile.current_skills)
    .fetch_one(pool)
    .await?;

    info!("Stored profile {}", row.id);
    Ok(row)
}

pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<Option<UserProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, UserProfileRow>(
        "SELECT id, name, goals, interests, current_skills, created_at FROM user_profiles WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}
