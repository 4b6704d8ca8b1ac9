/*
 * Responsibility
 * - /api/human の request/response DTO
 * - detail は human 本体 + 子テーブルをまとめて返す
 */
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::dto::validation::Validator;
use crate::error::AppError;
use crate::repos::{
    card_repo::CardSummaryRow,
    certificate_repo::CertificateRow,
    facial_repo::FacialRow,
    human_repo::{HumanChanges, HumanRow, NewHuman},
    skill_repo::SkillRow,
    space_time_repo::SpaceTimeRow,
    user_repo::UserRow,
};

#[derive(Debug, Deserialize)]
pub struct CreateHumanRequest {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub unique_id: Option<String>,
    pub legal_id: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl CreateHumanRequest {
    pub fn validate(&self) -> Result<NewHuman<'_>, AppError> {
        let mut v = Validator::new();
        v.required("name", self.name.as_deref())
            .required("lastname", self.lastname.as_deref())
            .not_blank("unique_id", self.unique_id.as_deref());
        v.finish()?;

        Ok(NewHuman {
            unique_id: self.unique_id.as_deref(),
            legal_id: self.legal_id.as_deref(),
            name: self.name.as_deref().unwrap_or_default(),
            lastname: self.lastname.as_deref().unwrap_or_default(),
            birthdate: self.birthdate,
            gender: self.gender.as_deref(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateHumanRequest {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub unique_id: Option<String>,
    pub legal_id: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
}

impl UpdateHumanRequest {
    pub fn validate(&self) -> Result<HumanChanges<'_>, AppError> {
        let mut v = Validator::new();
        v.not_blank("name", self.name.as_deref())
            .not_blank("lastname", self.lastname.as_deref())
            .not_blank("unique_id", self.unique_id.as_deref());
        v.finish()?;

        Ok(HumanChanges {
            unique_id: self.unique_id.as_deref(),
            legal_id: self.legal_id.as_deref(),
            name: self.name.as_deref(),
            lastname: self.lastname.as_deref(),
            birthdate: self.birthdate,
            gender: self.gender.as_deref(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HumanDetailResponse {
    #[serde(flatten)]
    pub human: HumanRow,
    pub users: Vec<UserRow>,
    pub skills: Vec<SkillRow>,
    pub certificates: Vec<CertificateRow>,
    pub facial_recognitions: Vec<FacialRow>,
    pub cards: Vec<CardSummaryRow>,
    pub space_time: Vec<SpaceTimeRow>,
}
