//! Resume binaries in S3-compatible object storage.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resumes::text::ResumeFormat;

const UPLOAD_PREFIX: &str = "uploads";
const SUFFIX_LEN: usize = 9;

/// Where an uploaded resume landed, plus the name the user gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResume {
    pub path: String,
    pub file_name: String,
}

/// `uploads/{unix_millis}-{9 random chars}.{ext}`
pub fn object_key(format: ResumeFormat, unix_millis: i64) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{UPLOAD_PREFIX}/{unix_millis}-{}.{}",
        &suffix[..SUFFIX_LEN],
        format.extension()
    )
}

pub async fn put_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    file_name: &str,
    format: ResumeFormat,
    body: Bytes,
) -> Result<StoredResume, AppError> {
    let key = object_key(format, chrono::Utc::now().timestamp_millis());
    let size = body.len();

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(body))
        .content_type(format.content_type())
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!("Uploaded resume ({size} bytes) to s3://{bucket}/{key}");

    Ok(StoredResume {
        path: key,
        file_name: file_name.to_string(),
    })
}

/// Time-limited GET URL for a stored resume.
pub async fn presigned_resume_url(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    ttl: Duration,
) -> Result<String, AppError> {
    let presigning = PresigningConfig::expires_in(ttl)
        .map_err(|e| AppError::S3(format!("Invalid presign TTL: {e}")))?;

    let request = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .presigned(presigning)
        .await
        .map_err(|e| AppError::S3(format!("Presigning failed: {e}")))?;

    Ok(request.uri().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_key_layout() {
        let key = object_key(ResumeFormat::Pdf, 1_700_000_000_000);
        assert!(key.starts_with("uploads/1700000000000-"));
        assert!(key.ends_with(".pdf"));

        let suffix = key
            .trim_start_matches("uploads/1700000000000-")
            .trim_end_matches(".pdf");
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_object_keys_do_not_collide() {
        let a = object_key(ResumeFormat::Txt, 1);
        let b = object_key(ResumeFormat::Txt, 1);
        assert_ne!(a, b);
    }
}
