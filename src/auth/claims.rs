use serde::{Deserialize, Serialize};

/// JWT payload: the subject is the username, expiry is enforced on decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // username
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
}
