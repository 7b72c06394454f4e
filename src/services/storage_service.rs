use std::path::Path;
use std::time::Duration;

use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};

/// Logical folder prefixes keying each asset class in the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFolder {
    RequirementDocs,
    CompaniesDoc,
    PostImages,
    PostVideos,
    ProposalDocs,
    ProfileImages,
}

impl StorageFolder {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::RequirementDocs => "requirement_docs",
            Self::CompaniesDoc => "companies_doc",
            Self::PostImages => "post_images",
            Self::PostVideos => "post_videos",
            Self::ProposalDocs => "proposal_docs",
            Self::ProfileImages => "profile_images",
        }
    }
}

/// Derives the object key for an upload: `<prefix>/<uuid>.<ext>`.
/// The extension comes from the client filename, lower-cased; anything
/// unrecognizable falls back to `bin`.
pub fn build_object_key(folder: StorageFolder, filename: &str) -> String {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{}/{}.{}", folder.prefix(), Uuid::new_v4(), ext)
}

/// Thin wrapper over the S3 client. Uploads and deletes are idempotent by
/// construction (deterministic keys, overwrite-safe); presigned links are
/// derived fresh on every call and never stored.
#[derive(Clone)]
pub struct StorageService {
    client: aws_sdk_s3::Client,
    bucket: String,
    presign_ttl: Duration,
}

impl StorageService {
    pub async fn connect(config: &Config) -> Self {
        let credentials = Credentials::new(
            &config.aws_access_key_id,
            &config.aws_secret_access_key,
            None,
            None,
            "qualtr-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.s3_region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(&config.s3_endpoint)
            .load()
            .await;

        Self {
            client: aws_sdk_s3::Client::new(&s3_config),
            bucket: config.s3_bucket.clone(),
            presign_ttl: Duration::from_secs(config.presign_ttl_secs),
        }
    }

    pub async fn upload(
        &self,
        folder: StorageFolder,
        filename: &str,
        data: bytes::Bytes,
        content_type: Option<&str>,
    ) -> Result<String> {
        let key = build_object_key(folder, filename);
        let mut req = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data));
        if let Some(ct) = content_type {
            req = req.content_type(ct);
        }
        req.send()
            .await
            .map_err(|e| Error::Storage(format!("Upload failed for {}: {}", key, e)))?;
        tracing::info!("Uploaded object {} to bucket {}", key, self.bucket);
        Ok(key)
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("Delete failed for {}: {}", key, e)))?;
        Ok(())
    }

    /// Time-limited GET link for a stored key. Cheap and stateless, so
    /// callers re-derive on every read instead of caching.
    pub async fn presign(&self, key: &str) -> Result<String> {
        let presigning = PresigningConfig::expires_in(self.presign_ttl)
            .map_err(|e| Error::Storage(format!("Invalid presign TTL: {}", e)))?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| Error::Storage(format!("Presign failed for {}: {}", key, e)))?;
        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_keys_are_prefixed_and_keep_extension() {
        let key = build_object_key(StorageFolder::ProposalDocs, "pitch deck.PDF");
        assert!(key.starts_with("proposal_docs/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn unknown_extension_falls_back_to_bin() {
        let key = build_object_key(StorageFolder::PostImages, "no-extension");
        assert!(key.starts_with("post_images/"));
        assert!(key.ends_with(".bin"));

        let weird = build_object_key(StorageFolder::PostImages, "evil.p/df");
        assert!(weird.starts_with("post_images/"));
    }
}
