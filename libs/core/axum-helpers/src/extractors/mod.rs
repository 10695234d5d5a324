//! Extractors whose rejections render as [`crate::ErrorResponse`] JSON.

pub mod id_path;
pub mod params;
pub mod validated_json;

pub use id_path::IdPath;
pub use params::{PathParams, QueryParams};
pub use validated_json::ValidatedJson;
