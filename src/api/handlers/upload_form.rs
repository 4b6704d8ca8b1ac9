/*
 * Responsibility
 * - multipart body を text field と (最大 1 つの) 保存済み file に分ける
 * - file は chunk ごとに UploadStore へ流し込む (全体をメモリに載せない)
 * - 途中で失敗したら書きかけ/保存済みの file を消してからエラーを返す
 */
use std::collections::HashMap;

use axum::extract::Multipart;
use tracing::debug;

use crate::error::AppError;
use crate::services::uploads::{StoredUpload, UploadKind, UploadStore, remove_stored};

#[derive(Debug, Default)]
pub struct UploadForm {
    pub fields: HashMap<String, String>,
    pub file: Option<StoredUpload>,
}

impl UploadForm {
    /// Remove the stored file after a later step failed.
    pub async fn discard_file(&self) {
        if let Some(file) = &self.file {
            remove_stored(file).await;
        }
    }

    pub fn file_url(&self) -> Option<String> {
        self.file.as_ref().map(|f| f.url.clone())
    }
}

/// Read the whole form. Only `file_field` may carry a file, and only once.
pub async fn read_upload_form(
    multipart: Multipart,
    store: &UploadStore,
    kind: UploadKind,
    file_field: &str,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    match read_fields(multipart, store, kind, file_field, &mut form).await {
        Ok(()) => Ok(form),
        Err(e) => {
            form.discard_file().await;
            Err(e)
        }
    }
}

async fn read_fields(
    mut multipart: Multipart,
    store: &UploadStore,
    kind: UploadKind,
    file_field: &str,
    form: &mut UploadForm,
) -> Result<(), AppError> {
    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_none() {
            let value = field.text().await?;
            form.fields.insert(name, value);
            continue;
        }

        if name != file_field || form.file.is_some() {
            debug!(field = %name, "unexpected file field");
            return Err(AppError::bad_request("Unexpected field"));
        }

        let mut pending = store
            .begin(kind, &name, field.file_name(), field.content_type())
            .await?;

        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    pending.discard().await;
                    return Err(e.into());
                }
            };
            if let Err(e) = pending.write_chunk(&chunk).await {
                pending.discard().await;
                return Err(e.into());
            }
        }

        let stored = pending.finish().await?;
        debug!(file = %stored.filename, size = stored.size, "upload stored");
        form.file = Some(stored);
    }

    Ok(())
}
