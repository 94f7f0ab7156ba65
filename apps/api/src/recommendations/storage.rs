use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

const REPORT_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// Object key of the rendered report for a profile.
pub fn report_key(profile_id: Uuid) -> String {
    format!("reports/{profile_id}.md")
}

/// Uploads a rendered report, replacing any previous one for the profile.
pub async fn store_report(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    profile_id: Uuid,
    markdown: String,
) -> Result<String, AppError> {
    let key = report_key(profile_id);
    s3.put_object()
        .bucket(s3_bucket)
        .key(&key)
        .body(ByteStream::from(markdown.into_bytes()))
        .content_type(REPORT_CONTENT_TYPE)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Report upload failed: {e}")))?;

    info!("Uploaded career report to s3://{}/{}", s3_bucket, key);
    Ok(key)
}

/// Downloads a rendered report. Missing objects map to `AppError::NotFound`.
pub async fn fetch_report(
    s3: &aws_sdk_s3::Client,
    s3_bucket: &str,
    profile_id: Uuid,
) -> Result<Bytes, AppError> {
    let key = report_key(profile_id);
    let output = s3
        .get_object()
        .bucket(s3_bucket)
        .key(&key)
        .send()
        .await
        .map_err(|e| {
            let missing = e
                .as_service_error()
                .map(|se| se.is_no_such_key())
                .unwrap_or(false);
            if missing {
                AppError::NotFound(format!("No report stored for profile {profile_id}"))
            } else {
                AppError::S3(format!("Report download failed: {e}"))
            }
        })?;

    let data = output
        .body
        .collect()
        .await
        .map_err(|e| AppError::S3(format!("Report body read failed: {e}")))?;

    Ok(data.into_bytes())
}
