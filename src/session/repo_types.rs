use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Owner record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Owner {
    pub id: Uuid,
    pub token: Uuid, // session token bound to this owner
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Validated registration data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwner {
    pub name: String,
    pub email: String,
}
