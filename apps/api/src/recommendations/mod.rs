// Career recommendations: analysis endpoint, model-output normalization,
// document rendering and storage.
// All model calls go through llm_client; handlers never reach the API directly.

pub mod handlers;
pub mod normalizer;
pub mod render;
pub mod storage;
