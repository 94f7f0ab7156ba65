// Student profile persistence. Profiles are written once per analysis and never updated.

pub mod handlers;
pub mod store;
