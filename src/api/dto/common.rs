use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Response of a create that only reports the new id.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}
