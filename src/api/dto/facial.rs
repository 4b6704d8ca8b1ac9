use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::api::dto::certificates::non_empty;
use crate::api::dto::validation::Validator;
use crate::error::AppError;

pub const NO_FACIAL_DATA: &str = "No facial_data_hash provided or file uploaded";

#[derive(Debug, PartialEq)]
pub struct FacialForm {
    pub human_id: i64,
    pub facial_data_hash: Option<String>,
}

impl FacialForm {
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, AppError> {
        let human_id = non_empty(fields, "human_id").and_then(|s| s.parse::<i64>().ok());

        let mut v = Validator::new();
        v.check(human_id.is_some(), "human_id", "human_id required");
        v.finish()?;

        Ok(Self {
            human_id: human_id.unwrap_or_default(),
            facial_data_hash: non_empty(fields, "facial_data_hash").map(str::to_string),
        })
    }

    /// The digest of an uploaded image wins over a supplied hash.
    pub fn resolve_hash(self, uploaded_digest: Option<&str>) -> Result<String, AppError> {
        uploaded_digest
            .map(str::to_string)
            .or(self.facial_data_hash)
            .ok_or_else(|| AppError::bad_request(NO_FACIAL_DATA))
    }
}

#[derive(Debug, Serialize)]
pub struct FacialCreatedResponse {
    pub id: i64,
    pub facial_hash: String,
    pub file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateFacialRequest {
    #[serde(default)]
    pub facial_validation: bool,
}
