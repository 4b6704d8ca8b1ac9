/*
 * Responsibility
 * - /api/card の request DTO
 * - account_number は create で必須、一覧では返さない (repo 側で除外)
 */
use serde::Deserialize;

use crate::api::dto::validation::Validator;
use crate::error::AppError;
use crate::repos::card_repo::CardFields;

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub human_id: Option<i64>,
    pub account_number: Option<String>,
    pub bank: Option<String>,
    pub account_type: Option<String>,
    pub expiration_date: Option<String>,
}

/// Validated create input.
pub struct NewCard<'a> {
    pub human_id: i64,
    pub account_number: &'a str,
    pub fields: CardFields<'a>,
}

impl CreateCardRequest {
    pub fn validate(&self) -> Result<NewCard<'_>, AppError> {
        let mut v = Validator::new();
        v.present("human_id", &self.human_id)
            .required("account_number", self.account_number.as_deref());
        v.finish()?;

        Ok(NewCard {
            human_id: self.human_id.unwrap_or_default(),
            account_number: self.account_number.as_deref().unwrap_or_default(),
            fields: CardFields {
                bank: self.bank.as_deref(),
                account_type: self.account_type.as_deref(),
                account_number: None,
                expiration_date: self.expiration_date.as_deref(),
            },
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCardRequest {
    pub bank: Option<String>,
    pub account_type: Option<String>,
    pub account_number: Option<String>,
    pub expiration_date: Option<String>,
}

impl UpdateCardRequest {
    pub fn validate(&self) -> Result<CardFields<'_>, AppError> {
        let mut v = Validator::new();
        v.not_blank("account_number", self.account_number.as_deref());
        v.finish()?;

        Ok(CardFields {
            bank: self.bank.as_deref(),
            account_type: self.account_type.as_deref(),
            account_number: self.account_number.as_deref(),
            expiration_date: self.expiration_date.as_deref(),
        })
    }
}
