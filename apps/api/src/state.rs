use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;

use crate::admission::AdmissionGate;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::profiles::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Profile persistence. `PgProfileStore` in production.
    pub profiles: Arc<dyn ProfileStore>,
    pub s3: S3Client,
    /// Model backend. `GeminiClient` in production.
    pub generator: Arc<dyn TextGenerator>,
    /// One gate for the whole process, created at startup.
    pub gate: Arc<AdmissionGate>,
    pub config: Config,
}
