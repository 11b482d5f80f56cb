//! JWT claim structure for access tokens issued by the API.

use serde::{Deserialize, Serialize};

/// Claims embedded in an access token.
///
/// Only `sub` and `exp` are required; everything else is informational and
/// the `/users/me` response stays authoritative for role and approval state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
    /// Token issued-at timestamp (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    /// Role name as issued, e.g. `"teacher"`
    #[serde(default)]
    pub role: Option<String>,
}
