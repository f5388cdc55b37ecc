use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

pub const FILE_FIELD: &str = "file";

/// One uploaded file pulled out of a multipart body.
#[derive(Debug)]
pub struct UploadItem {
    pub body: Bytes,
    pub content_type: Option<String>,
    pub file_name: Option<String>,
}

impl UploadItem {
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// Returns the first `file` field, or `None` if the form has none.
pub async fn read_file_field(mp: &mut Multipart) -> anyhow::Result<Option<UploadItem>> {
    while let Some(field) = mp.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "skipping multipart field");
            continue;
        }
        let content_type = field.content_type().map(|s| s.to_string());
        let file_name = field.file_name().map(|s| s.to_string());
        let body = field.bytes().await?;
        debug!(bytes = body.len(), content_type = ?content_type, "file field read");
        return Ok(Some(UploadItem {
            body,
            content_type,
            file_name,
        }));
    }
    Ok(None)
}
