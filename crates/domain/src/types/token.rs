//! Session token pair

use serde::{Deserialize, Serialize};

/// The access/refresh token pair issued by the authentication endpoints.
///
/// Both values travel as HTTP cookies (`Access-token` / `Refresh-token`).
/// The pair is an immutable value; rotation produces a new `Token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
}

impl Token {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token: refresh_token.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_through_the_session_file_format() {
        let token = Token::new("acc-1", "ref-1");
        let json = serde_json::to_string(&token).unwrap();
        assert!(json.contains("\"access_token\":\"acc-1\""));

        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
