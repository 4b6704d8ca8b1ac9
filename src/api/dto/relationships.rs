use serde::Deserialize;

use crate::api::dto::validation::Validator;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct HumanSkillRequest {
    pub human_id: Option<i64>,
    pub skill_id: Option<i64>,
}

impl HumanSkillRequest {
    pub fn validate(&self) -> Result<(i64, i64), AppError> {
        let mut v = Validator::new();
        v.present("human_id", &self.human_id)
            .present("skill_id", &self.skill_id);
        v.finish()?;
        Ok((
            self.human_id.unwrap_or_default(),
            self.skill_id.unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Deserialize)]
pub struct SkillSpecialityRequest {
    pub skill_id: Option<i64>,
    pub speciality_id: Option<i64>,
}

impl SkillSpecialityRequest {
    pub fn validate(&self) -> Result<(i64, i64), AppError> {
        let mut v = Validator::new();
        v.present("skill_id", &self.skill_id)
            .present("speciality_id", &self.speciality_id);
        v.finish()?;
        Ok((
            self.skill_id.unwrap_or_default(),
            self.speciality_id.unwrap_or_default(),
        ))
    }
}
