use axum::extract::Multipart;
use contracts::shared::api::PUBLIC_FILES_PREFIX;
use contracts::usecases::u501_feedback::{AttachmentRef, UploadRejection, UploadRestrictions};
use uuid::Uuid;

use super::repository;
use crate::shared::config::{get_config, get_uploads_dir};

/// Keeps ASCII letters, digits, dot, dash and underscore; everything else
/// becomes `_`
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Public URL of a stored file
pub fn public_url(stored_name: &str) -> String {
    format!("{}/{}", PUBLIC_FILES_PREFIX, stored_name)
}

/// Reads the `file` field of a multipart upload, checks it against the
/// feedback restrictions, stores it and returns its public reference.
///
/// The per-session count limit is enforced by the client and re-checked
/// when the feedback is sent.
pub async fn upload(multipart: &mut Multipart) -> anyhow::Result<AttachmentRef> {
    let config = get_config()?;
    let restrictions = config.feedback.to_settings().upload_restrictions();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Uploaded field has no file name"))?;
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        check_upload(&restrictions, &file_name, bytes.len() as u64)?;

        let id = Uuid::new_v4().to_string();
        let stored_name = format!("{}-{}", &id[..8], sanitize_file_name(&file_name));
        let dir = get_uploads_dir(config);
        tokio::fs::create_dir_all(&dir).await?;
        let stored_path = dir.join(&stored_name);
        tokio::fs::write(&stored_path, &bytes).await?;

        let url = public_url(&stored_name);
        repository::insert(
            &id,
            &file_name,
            &url,
            &stored_path.to_string_lossy(),
            bytes.len() as i64,
            content_type,
        )
        .await?;

        tracing::info!(
            "Stored upload {} ({} bytes) as {}",
            file_name,
            bytes.len(),
            url
        );
        return Ok(AttachmentRef::new(url, file_name));
    }

    Err(anyhow::anyhow!("Multipart body has no 'file' field"))
}

/// Type and size check of a single upload
pub fn check_upload(
    restrictions: &UploadRestrictions,
    file_name: &str,
    size_bytes: u64,
) -> Result<(), UploadRejection> {
    restrictions.check(file_name, size_bytes, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("invoice 7.pdf"), "invoice_7.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\tmp\\scan.PNG"), "scan.PNG");
        assert_eq!(sanitize_file_name("فاتورة.pdf"), "______.pdf");
        assert_eq!(sanitize_file_name(".."), "file");
    }

    #[test]
    fn test_public_url() {
        assert_eq!(public_url("ab12cd34-scan.png"), "/files/ab12cd34-scan.png");
    }

    #[test]
    fn test_check_upload() {
        let restrictions = UploadRestrictions::new([".pdf".to_string()], 1024, 3);
        assert!(check_upload(&restrictions, "a.pdf", 1024).is_ok());
        assert!(matches!(
            check_upload(&restrictions, "a.exe", 10),
            Err(UploadRejection::FileType { .. })
        ));
        assert!(matches!(
            check_upload(&restrictions, "a.pdf", 1025),
            Err(UploadRejection::FileSize { .. })
        ));
    }
}
