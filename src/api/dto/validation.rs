/*
 * Responsibility
 * - DTO の validate() が使う field 単位のチェックを集める
 * - 失敗をまとめて AppError::Validation (400, errors: [...]) にする
 */
use crate::error::{AppError, FieldError};

pub const INVALID_VALUE: &str = "Invalid value";

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, path: &'static str, msg: &'static str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::body(path, msg));
        }
        self
    }

    /// Present and not blank.
    pub fn required(&mut self, path: &'static str, value: Option<&str>) -> &mut Self {
        self.check(value.is_some_and(|v| !v.trim().is_empty()), path, INVALID_VALUE)
    }

    /// Present and not the empty string. Whitespace counts as content.
    pub fn non_empty(&mut self, path: &'static str, value: Option<&str>) -> &mut Self {
        self.check(value.is_some_and(|v| !v.is_empty()), path, INVALID_VALUE)
    }

    /// May be absent; if present must not be blank.
    pub fn not_blank(&mut self, path: &'static str, value: Option<&str>) -> &mut Self {
        self.check(value.is_none_or(|v| !v.trim().is_empty()), path, INVALID_VALUE)
    }

    pub fn present<T>(&mut self, path: &'static str, value: &Option<T>) -> &mut Self {
        self.check(value.is_some(), path, INVALID_VALUE)
    }

    pub fn email(&mut self, path: &'static str, value: Option<&str>) -> &mut Self {
        self.check(value.is_some_and(is_email), path, INVALID_VALUE)
    }

    pub fn min_chars(&mut self, path: &'static str, value: Option<&str>, min: usize) -> &mut Self {
        self.check(
            value.is_some_and(|v| v.chars().count() >= min),
            path,
            INVALID_VALUE,
        )
    }

    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Loose structural check: one `@`, non-empty local part, dotted domain, no
/// whitespace.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}
