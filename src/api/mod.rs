//! REST access: the [`Transport`] seam, its HTTP and in-memory
//! implementations, and the typed [`ApiClient`].

pub mod client;
pub mod http;
pub mod memory;
pub mod transport;

pub use client::{ApiClient, paths};
pub use http::HttpTransport;
pub use memory::MemoryTransport;
pub use transport::{ApiRequest, ApiResponse, FilePart, RequestBody, Transport};
