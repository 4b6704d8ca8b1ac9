/*
 * Responsibility
 * - /api/certificate の multipart text field を型付きの値にする
 * - file field は handler (upload_form) 側で保存済み
 */
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::api::dto::validation::{INVALID_VALUE, Validator};
use crate::error::AppError;

#[derive(Debug, Default, PartialEq)]
pub struct CertificateForm {
    pub human_id: Option<i64>,
    pub description: Option<String>,
    pub issued_at: Option<NaiveDate>,
}

impl CertificateForm {
    /// Parse the text fields. `require_human` is set on create.
    pub fn from_fields(
        fields: &HashMap<String, String>,
        require_human: bool,
    ) -> Result<Self, AppError> {
        let human_id = non_empty(fields, "human_id").map(str::parse::<i64>);
        let issued_at =
            non_empty(fields, "issued_at").map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"));

        let mut v = Validator::new();
        match &human_id {
            Some(parsed) => v.check(parsed.is_ok(), "human_id", "human_id is required"),
            None => v.check(!require_human, "human_id", "human_id is required"),
        };
        v.check(
            issued_at.as_ref().is_none_or(|d| d.is_ok()),
            "issued_at",
            INVALID_VALUE,
        );
        v.finish()?;

        Ok(Self {
            human_id: human_id.and_then(Result::ok),
            description: non_empty(fields, "description").map(str::to_string),
            issued_at: issued_at.and_then(Result::ok),
        })
    }
}

// Empty multipart text fields count as absent.
pub(crate) fn non_empty<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[derive(Debug, Serialize)]
pub struct CertificateCreatedResponse {
    pub id: i64,
    pub file: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CertificateUpdatedResponse {
    pub message: &'static str,
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn create_needs_integer_human_id() {
        assert!(CertificateForm::from_fields(&fields(&[]), true).is_err());
        assert!(CertificateForm::from_fields(&fields(&[("human_id", "abc")]), true).is_err());

        let form = CertificateForm::from_fields(
            &fields(&[("human_id", "7"), ("issued_at", "2024-02-29")]),
            true,
        )
        .unwrap();
        assert_eq!(form.human_id, Some(7));
        assert_eq!(form.issued_at, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(form.description, None);
    }

    #[test]
    fn update_accepts_missing_human_id_but_not_bad_dates() {
        let form =
            CertificateForm::from_fields(&fields(&[("description", "Diploma")]), false).unwrap();
        assert_eq!(form.description.as_deref(), Some("Diploma"));

        let err = CertificateForm::from_fields(&fields(&[("issued_at", "29/02/2024")]), false);
        assert!(matches!(err, Err(AppError::Validation(e)) if e[0].path == "issued_at"));
    }
}
