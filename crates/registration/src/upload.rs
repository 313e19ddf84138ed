use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use crate::error::UploadError;

type Result<T> = std::result::Result<T, UploadError>;

pub const MAX_FILE_SIZE_MB: usize = 5;
pub const MAX_FILE_SIZE: usize = MAX_FILE_SIZE_MB * 1024 * 1024;
pub const ALLOWED_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "application/pdf"];

/// The two proof documents a registration needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DocumentSlot {
    #[serde(rename = "aadhaar")]
    Aadhaar,
    #[serde(rename = "dob")]
    DateOfBirth,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 2] = [Self::Aadhaar, Self::DateOfBirth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::DateOfBirth => "dob",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar",
            Self::DateOfBirth => "DOB proof",
        }
    }
}

impl std::str::FromStr for DocumentSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aadhaar" => Ok(Self::Aadhaar),
            "dob" | "date-of-birth" | "date_of_birth" => Ok(Self::DateOfBirth),
            other => Err(format!(
                "Unknown document slot: '{}'. Available: aadhaar, dob",
                other
            )),
        }
    }
}

impl std::fmt::Display for DocumentSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A file selected by the registrant, held in memory until uploaded
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Check size and content type locally. Never touches the network.
pub fn validate_file(file: &DocumentFile) -> Result<()> {
    if file.size() > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge { size: file.size() });
    }

    let content_type = file.content_type.trim().to_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
        return Err(UploadError::UnsupportedType(file.content_type.clone()));
    }

    Ok(())
}

/// External host that stores a document and hands back a durable URL.
///
/// Every call creates a new remote object; there is no deduplication.
#[async_trait::async_trait]
pub trait MediaHost: Send + Sync {
    async fn upload(&self, file: DocumentFile) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: Option<String>,
}

/// Unsigned uploads to Cloudinary using a fixed upload preset
pub struct CloudinaryClient {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/auto/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }
}

#[async_trait::async_trait]
impl MediaHost for CloudinaryClient {
    async fn upload(&self, file: DocumentFile) -> Result<String> {
        let size = file.size();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;

        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        tracing::info!("Uploading document to media host ({} bytes)", size);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Media host rejected upload with status {}", status);
            return Err(UploadError::Rejected { status, body });
        }

        let data: CloudinaryUploadResponse = response.json().await?;

        data.secure_url
            .filter(|url| !url.is_empty())
            .ok_or(UploadError::MissingUrl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(content_type: &str, size: usize) -> DocumentFile {
        DocumentFile {
            file_name: "proof.bin".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn test_accepts_allowed_types() {
        for content_type in ALLOWED_CONTENT_TYPES {
            assert!(validate_file(&file(content_type, 1024)).is_ok());
        }
        assert!(validate_file(&file("IMAGE/PNG", 10)).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err = validate_file(&file("image/gif", 10)).unwrap_err();
        assert!(matches!(err, UploadError::UnsupportedType(_)));
        assert_eq!(err.to_string(), "Only JPG, PNG, and PDF files are allowed");
        assert!(err.is_local());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_file(&file("application/pdf", MAX_FILE_SIZE)).is_ok());

        let err = validate_file(&file("application/pdf", MAX_FILE_SIZE + 1)).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(err.to_string(), "File size must be less than 5MB");
    }

    #[test]
    fn test_size_is_checked_before_type() {
        let err = validate_file(&file("text/plain", MAX_FILE_SIZE + 1)).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("aadhaar".parse::<DocumentSlot>().unwrap(), DocumentSlot::Aadhaar);
        assert_eq!("DOB".parse::<DocumentSlot>().unwrap(), DocumentSlot::DateOfBirth);
        assert!("passport".parse::<DocumentSlot>().is_err());
    }

    #[test]
    fn test_upload_url() {
        let client = CloudinaryClient::new(CloudinaryConfig {
            base_url: "https://api.cloudinary.com/".to_string(),
            cloud_name: "demo".to_string(),
            upload_preset: "unsigned".to_string(),
        })
        .unwrap();

        assert_eq!(
            client.upload_url(),
            "https://api.cloudinary.com/v1_1/demo/auto/upload"
        );
    }

    #[tokio::test]
    #[ignore] // Needs network access and a real unsigned preset
    async fn test_live_upload() {
        let client = CloudinaryClient::new(CloudinaryConfig {
            base_url: "https://api.cloudinary.com".to_string(),
            cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME").unwrap(),
            upload_preset: std::env::var("CLOUDINARY_UPLOAD_PRESET").unwrap(),
        })
        .unwrap();

        let url = client.upload(file("image/png", 64)).await.unwrap();
        assert!(url.starts_with("https://"));
    }
}
