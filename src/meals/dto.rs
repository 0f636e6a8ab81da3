use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::{MealInput, MealRecord};
use crate::validation::{
    required_bool, required_text, required_timestamp, TimestampInput, ValidationError,
};

/// Body of `POST /meals` and `PUT /meals/:id`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_on_diet: Option<bool>,
    #[serde(default, alias = "date")]
    pub occurred_at: Option<TimestampInput>,
}

impl MealPayload {
    pub fn validate(self) -> Result<MealInput, ValidationError> {
        Ok(MealInput {
            name: required_text("name", self.name)?,
            description: required_text("description", self.description)?,
            is_on_diet: required_bool("isOnDiet", self.is_on_diet)?,
            occurred_at: required_timestamp("occurredAt", self.occurred_at)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MealView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
    pub date: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<MealRecord> for MealView {
    fn from(m: MealRecord) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            is_on_diet: m.is_on_diet,
            date: m.occurred_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<MealView>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: MealView,
}
