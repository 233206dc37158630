//! Signed-in session.

use super::AuthToken;

/// Bearer token plus the name of the signed-in user.
///
/// Presence of a session is what unlocks admin actions; there is no expiry or
/// role check on the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: AuthToken,
    username: Option<String>,
}

impl Session {
    /// Creates new session.
    #[must_use]
    pub fn new(token: AuthToken, username: Option<String>) -> Self {
        Self {
            token,
            username: username.filter(|name| !name.trim().is_empty()),
        }
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Returns the stored username.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns a name suitable for the header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("Admin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_username_is_dropped() {
        let session = Session::new(AuthToken::new("abc").unwrap(), Some("  ".to_string()));
        assert_eq!(session.username(), None);
        assert_eq!(session.display_name(), "Admin");
    }

    #[test]
    fn test_display_name_uses_username() {
        let session = Session::new(AuthToken::new("abc").unwrap(), Some("rina".to_string()));
        assert_eq!(session.display_name(), "rina");
    }
}
