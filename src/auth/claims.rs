use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload carried by a session token. Validity is purely a function of
/// the signature and `exp`; there is no server-side session table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}
