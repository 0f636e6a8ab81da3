use std::cmp::Reverse;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::repo_types::{MealInput, MealRecord};

/// Every query takes the owner id; no method reads or writes across owners.
#[async_trait]
pub trait MealRepo: Send + Sync {
    async fn insert(&self, owner_id: Uuid, input: &MealInput) -> anyhow::Result<MealRecord>;

    /// Newest `occurred_at` first.
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<MealRecord>>;

    async fn find_by_owner(&self, owner_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealRecord>>;

    /// Returns whether a row was replaced.
    async fn update(&self, owner_id: Uuid, meal_id: Uuid, input: &MealInput) -> anyhow::Result<bool>;

    /// Returns whether a row was removed.
    async fn delete(&self, owner_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgMealRepo {
    db: PgPool,
}

impl PgMealRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepo for PgMealRepo {
    async fn insert(&self, owner_id: Uuid, input: &MealInput) -> anyhow::Result<MealRecord> {
        let meal = sqlx::query_as::<_, MealRecord>(
            r#"
            INSERT INTO meal_records (id, owner_id, name, description, is_on_diet, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, name, description, is_on_diet, occurred_at, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.is_on_diet)
        .bind(input.occurred_at)
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Ok(meal)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<MealRecord>> {
        let rows = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, owner_id, name, description, is_on_diet, occurred_at, created_at, updated_at
            FROM meal_records
            WHERE owner_id = $1
            ORDER BY occurred_at DESC, created_at DESC, id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await
        .context("list meals by owner")?;
        Ok(rows)
    }

    async fn find_by_owner(&self, owner_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealRecord>> {
        let meal = sqlx::query_as::<_, MealRecord>(
            r#"
            SELECT id, owner_id, name, description, is_on_diet, occurred_at, created_at, updated_at
            FROM meal_records
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await
        .context("find meal by owner")?;
        Ok(meal)
    }

    async fn update(&self, owner_id: Uuid, meal_id: Uuid, input: &MealInput) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE meal_records
               SET name = $3,
                   description = $4,
                   is_on_diet = $5,
                   occurred_at = $6,
                   updated_at = now()
             WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.is_on_diet)
        .bind(input.occurred_at)
        .execute(&self.db)
        .await
        .context("update meal")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, owner_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM meal_records
             WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(owner_id)
        .execute(&self.db)
        .await
        .context("delete meal")?;
        Ok(result.rows_affected() > 0)
    }
}

/// Process-local meal table backing `AppState::in_memory` in tests.
#[derive(Default)]
pub struct MemoryMealRepo {
    rows: RwLock<Vec<MealRecord>>,
}

#[async_trait]
impl MealRepo for MemoryMealRepo {
    async fn insert(&self, owner_id: Uuid, input: &MealInput) -> anyhow::Result<MealRecord> {
        let now = OffsetDateTime::now_utc();
        let meal = MealRecord {
            id: Uuid::new_v4(),
            owner_id,
            name: input.name.clone(),
            description: input.description.clone(),
            is_on_diet: input.is_on_diet,
            occurred_at: input.occurred_at,
            created_at: now,
            updated_at: now,
        };
        self.rows.write().await.push(meal.clone());
        Ok(meal)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<MealRecord>> {
        let mut meals: Vec<MealRecord> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|m| m.owner_id == owner_id)
            .cloned()
            .collect();
        meals.sort_by_key(|m| Reverse((m.occurred_at, m.created_at, m.id)));
        Ok(meals)
    }

    async fn find_by_owner(&self, owner_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<MealRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|m| m.id == meal_id && m.owner_id == owner_id)
            .cloned())
    }

    async fn update(&self, owner_id: Uuid, meal_id: Uuid, input: &MealInput) -> anyhow::Result<bool> {
        let mut rows = self.rows.write().await;
        let Some(meal) = rows
            .iter_mut()
            .find(|m| m.id == meal_id && m.owner_id == owner_id)
        else {
            return Ok(false);
        };
        meal.name = input.name.clone();
        meal.description = input.description.clone();
        meal.is_on_diet = input.is_on_diet;
        meal.occurred_at = input.occurred_at;
        meal.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }

    async fn delete(&self, owner_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|m| !(m.id == meal_id && m.owner_id == owner_id));
        Ok(rows.len() < before)
    }
}
