//! # Scholaris Auth
//!
//! Client-side handling of the API's access token.
//!
//! - [`claims`]: The claim set carried by access tokens
//! - [`token`]: Reading claims and expiry without the signing secret
//! - [`store`]: Persisting the token between runs
//!
//! The client never verifies signatures (it does not hold the secret); it only
//! reads the claims to skip a doomed `/users/me` round trip when the token has
//! already expired. The API remains the authority on every request.
//!
//! # Example
//!
//! ```ignore
//! use scholaris_auth::{CredentialStore, FileCredentialStore, inspect_token};
//!
//! let store = FileCredentialStore::new("/home/me/.config/scholaris/credentials.json");
//! if let Some(credential) = store.load()? {
//!     let claims = inspect_token(&credential.access_token)?;
//!     println!("token for {} expires at {}", claims.sub, claims.exp);
//! }
//! ```

pub mod claims;
pub mod store;
pub mod token;

// Re-export commonly used types at crate root
pub use claims::AccessClaims;
pub use store::{
    Credential, CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore,
};
pub use token::{TokenError, TokenStatus, inspect_token, token_status};
