use serde::Deserialize;

use crate::api::dto::validation::Validator;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateSkillRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        let mut v = Validator::new();
        v.required("name", self.name.as_deref());
        v.finish()?;
        Ok(self.name.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSkillRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateSkillRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.not_blank("name", self.name.as_deref());
        v.finish()
    }
}
