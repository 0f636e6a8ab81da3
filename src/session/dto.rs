use serde::Deserialize;

use super::repo_types::NewOwner;
use crate::validation::{required_email, required_text, ValidationError};

/// Request body for owner registration. Fields are optional so missing ones
/// surface as field-level validation errors instead of a body rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterOwnerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl RegisterOwnerRequest {
    pub fn validate(self) -> Result<NewOwner, ValidationError> {
        Ok(NewOwner {
            name: required_text("name", self.name)?,
            email: required_email("email", self.email)?,
        })
    }
}
