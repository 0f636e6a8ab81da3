use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo_types::{NewOwner, Owner};
use super::token::SessionToken;

#[async_trait]
pub trait OwnerRepo: Send + Sync {
    async fn find_by_token(&self, token: SessionToken) -> anyhow::Result<Option<Owner>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Owner>>;

    /// Inserts the owner bound to `token`. `None` means the email or the token is already taken
    /// and nothing was written.
    async fn create(&self, token: SessionToken, owner: &NewOwner) -> anyhow::Result<Option<Owner>>;
}

#[derive(Clone)]
pub struct PgOwnerRepo {
    db: PgPool,
}

impl PgOwnerRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OwnerRepo for PgOwnerRepo {
    async fn find_by_token(&self, token: SessionToken) -> anyhow::Result<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT id, token, name, email, created_at, updated_at
            FROM owners
            WHERE token = $1
            "#,
        )
        .bind(token.as_uuid())
        .fetch_optional(&self.db)
        .await
        .context("find owner by token")?;
        Ok(owner)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Owner>> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT id, token, name, email, created_at, updated_at
            FROM owners
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find owner by email")?;
        Ok(owner)
    }

    async fn create(&self, token: SessionToken, owner: &NewOwner) -> anyhow::Result<Option<Owner>> {
        let created = sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (id, token, name, email)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT DO NOTHING
            RETURNING id, token, name, email, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(token.as_uuid())
        .bind(&owner.name)
        .bind(&owner.email)
        .fetch_optional(&self.db)
        .await
        .context("insert owner")?;
        Ok(created)
    }
}

/// Process-local owner table backing `AppState::in_memory` in tests.
#[derive(Default)]
pub struct MemoryOwnerRepo {
    rows: RwLock<Vec<Owner>>,
}

#[async_trait]
impl OwnerRepo for MemoryOwnerRepo {
    async fn find_by_token(&self, token: SessionToken) -> anyhow::Result<Option<Owner>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|o| o.token == token.as_uuid()).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Owner>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|o| o.email == email).cloned())
    }

    async fn create(&self, token: SessionToken, owner: &NewOwner) -> anyhow::Result<Option<Owner>> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|o| o.email == owner.email || o.token == token.as_uuid())
        {
            return Ok(None);
        }
        let now = OffsetDateTime::now_utc();
        let created = Owner {
            id: Uuid::new_v4(),
            token: token.as_uuid(),
            name: owner.name.clone(),
            email: owner.email.clone(),
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(Some(created))
    }
}
