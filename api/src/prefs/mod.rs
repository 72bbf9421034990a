//! The persisted preference document and the store it lives in.

pub mod store;
pub mod user_prefs;
