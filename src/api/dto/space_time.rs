use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::api::dto::validation::Validator;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateSpaceTimeRequest {
    pub human_id: Option<i64>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    /// Defaults to the time of insertion.
    pub timestamp: Option<DateTime<Utc>>,
}

impl CreateSpaceTimeRequest {
    pub fn validate(&self) -> Result<(i64, &str, &str), AppError> {
        let mut v = Validator::new();
        v.present("human_id", &self.human_id)
            .required("longitude", self.longitude.as_deref())
            .required("latitude", self.latitude.as_deref());
        v.finish()?;

        Ok((
            self.human_id.unwrap_or_default(),
            self.longitude.as_deref().unwrap_or_default(),
            self.latitude.as_deref().unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateSpaceTimeRequest {
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl UpdateSpaceTimeRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut v = Validator::new();
        v.not_blank("longitude", self.longitude.as_deref())
            .not_blank("latitude", self.latitude.as_deref());
        v.finish()
    }
}
