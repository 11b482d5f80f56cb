//! # Scholaris Core
//!
//! Core types shared by every Scholaris crate.
//!
//! - [`errors`]: The client error taxonomy and HTTP status mapping
//! - [`pagination`]: List query parameters and the paginated response envelope
//! - [`serde`]: Lenient serde helpers for API payloads
//!
//! # Example
//!
//! ```ignore
//! use scholaris_core::{ClientError, ListParams};
//!
//! let params = ListParams::new().search("math").page(2);
//! let query = params.to_query();
//!
//! let err = ClientError::from_status(404, r#"{"error":"Class not found"}"#);
//! assert!(matches!(err, ClientError::NotFound(_)));
//! ```

pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{ClientError, ConflictKind, GENERIC_FAILURE_MESSAGE};
pub use pagination::{ListParams, Paginated, PaginationMeta};

pub type ClientResult<T> = Result<T, ClientError>;
