use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// A file already transferred to the server, referenced by its public URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub url: String,
    pub display_name: String,
}

impl AttachmentRef {
    pub fn new(url: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_name: display_name.into(),
        }
    }

    /// Uses the last path segment of the URL as the display name
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let display_name = url.rsplit('/').next().unwrap_or_default().to_string();
        Self { url, display_name }
    }
}

fn format_mb(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    format!("{}", (mb * 100.0).round() / 100.0)
}

/// Why a single file did not make it into the staging buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Invalid file type: {extension} ({file_name})")]
    FileType { file_name: String, extension: String },

    #[error("File size exceeds the maximum limit of {}MB: {file_name}", format_mb(*.max_size_bytes))]
    FileSize { file_name: String, max_size_bytes: u64 },

    #[error("You can upload at most {max} files")]
    TooManyFiles { max: usize },

    #[error("Failed to upload file: {0}")]
    Transfer(String),
}

/// Lowercase extension including the leading dot, if the name has one
pub fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

/// Type/size/count limits the uploader enforces per file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRestrictions {
    pub allowed_file_types: BTreeSet<String>,
    pub max_file_size_bytes: u64,
    pub max_number_of_files: usize,
}

impl UploadRestrictions {
    pub fn new(
        allowed_file_types: impl IntoIterator<Item = String>,
        max_file_size_bytes: u64,
        max_number_of_files: usize,
    ) -> Self {
        Self {
            allowed_file_types: allowed_file_types
                .into_iter()
                .map(|t| t.trim().to_lowercase())
                .collect(),
            max_file_size_bytes,
            max_number_of_files,
        }
    }

    pub fn is_type_allowed(&self, file_name: &str) -> bool {
        file_extension(file_name)
            .map(|ext| self.allowed_file_types.contains(&ext))
            .unwrap_or(false)
    }

    /// Checks one file before transfer. `already_staged` is the number of files
    /// the current session holds.
    pub fn check(
        &self,
        file_name: &str,
        size_bytes: u64,
        already_staged: usize,
    ) -> Result<(), UploadRejection> {
        if already_staged >= self.max_number_of_files {
            return Err(UploadRejection::TooManyFiles {
                max: self.max_number_of_files,
            });
        }
        if !self.is_type_allowed(file_name) {
            return Err(UploadRejection::FileType {
                file_name: file_name.to_string(),
                extension: file_extension(file_name).unwrap_or_default(),
            });
        }
        if size_bytes > self.max_file_size_bytes {
            return Err(UploadRejection::FileSize {
                file_name: file_name.to_string(),
                max_size_bytes: self.max_file_size_bytes,
            });
        }
        Ok(())
    }

    /// `accept` attribute value for a file input
    pub fn accept_attribute(&self) -> String {
        self.allowed_file_types
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Ordered, append-only list of uploaded files for one dialog session.
///
/// Entries are never removed one by one; the whole buffer goes away with the
/// session that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentStagingBuffer {
    items: Vec<AttachmentRef>,
}

impl AttachmentStagingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the result of an awaited upload: success appends, failure
    /// leaves the buffer untouched and hands the rejection back.
    pub fn accept(
        &mut self,
        outcome: Result<AttachmentRef, UploadRejection>,
    ) -> Result<&AttachmentRef, UploadRejection> {
        let attachment = outcome?;
        self.items.push(attachment);
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[AttachmentRef] {
        &self.items
    }

    pub fn urls(&self) -> Vec<String> {
        self.items.iter().map(|a| a.url.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restrictions() -> UploadRestrictions {
        UploadRestrictions::new(
            [".pdf", ".PNG", ".jpeg"].into_iter().map(String::from),
            5 * 1024 * 1024,
            3,
        )
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("scan.PDF"), Some(".pdf".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some(".gz".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".bashrc"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_check_accepts_allowed_file() {
        assert_eq!(restrictions().check("invoice.png", 1024, 0), Ok(()));
        assert_eq!(restrictions().check("invoice.pdf", 5 * 1024 * 1024, 2), Ok(()));
    }

    #[test]
    fn test_check_rejections() {
        let r = restrictions();
        assert_eq!(
            r.check("notes.txt", 10, 0),
            Err(UploadRejection::FileType {
                file_name: "notes.txt".into(),
                extension: ".txt".into()
            })
        );
        assert!(matches!(
            r.check("big.pdf", 5 * 1024 * 1024 + 1, 0),
            Err(UploadRejection::FileSize { .. })
        ));
        assert_eq!(
            r.check("fourth.pdf", 10, 3),
            Err(UploadRejection::TooManyFiles { max: 3 })
        );
    }

    #[test]
    fn test_size_message_in_mb() {
        let err = restrictions().check("big.pdf", 6 * 1024 * 1024, 0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File size exceeds the maximum limit of 5MB: big.pdf"
        );
    }

    #[test]
    fn test_buffer_preserves_upload_order() {
        let mut buffer = AttachmentStagingBuffer::new();
        for i in 0..3 {
            let url = format!("/files/f{}.pdf", i);
            buffer.accept(Ok(AttachmentRef::from_url(url))).unwrap();
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(
            buffer.urls(),
            vec!["/files/f0.pdf", "/files/f1.pdf", "/files/f2.pdf"]
        );
        assert_eq!(buffer.as_slice()[1].display_name, "f1.pdf");
    }

    #[test]
    fn test_buffer_unchanged_on_failure() {
        let mut buffer = AttachmentStagingBuffer::new();
        buffer.accept(Ok(AttachmentRef::from_url("/files/a.pdf"))).unwrap();
        let err = buffer
            .accept(Err(UploadRejection::Transfer("network down".into())))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to upload file: network down");
        assert_eq!(buffer.urls(), vec!["/files/a.pdf"]);
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(restrictions().accept_attribute(), ".jpeg,.pdf,.png");
    }
}
