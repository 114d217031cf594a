//! Result alias used across all layers.

use crate::EmporiumError;

/// Result type with the unified [`EmporiumError`].
pub type EmporiumResult<T> = Result<T, EmporiumError>;
