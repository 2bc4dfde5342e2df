//! Display helpers for diagnostics output.

pub mod format;

pub use format::{format_age_minutes, format_bytes, format_hours_old};
