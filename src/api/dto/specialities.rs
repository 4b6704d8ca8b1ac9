use serde::Deserialize;

use crate::api::dto::validation::Validator;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateSpecialityRequest {
    pub description: Option<String>,
}

impl CreateSpecialityRequest {
    pub fn validate(&self) -> Result<&str, AppError> {
        let mut v = Validator::new();
        v.required("description", self.description.as_deref());
        v.finish()?;
        Ok(self.description.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSpecialityRequest {
    pub description: Option<String>,
}

impl UpdateSpecialityRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.not_blank("description", self.description.as_deref());
        v.finish()
    }
}
