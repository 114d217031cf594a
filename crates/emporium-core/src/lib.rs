//! # Emporium Core
//!
//! Core types, traits, and error definitions for the Emporium product
//! catalog service. This crate provides the foundational abstractions used
//! across all layers: the unified error taxonomy, typed identifiers,
//! pagination, filter/sort parameters, and the domain entities.

pub mod domain;
pub mod error;
pub mod filter;
pub mod id;
pub mod pagination;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use filter::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;
