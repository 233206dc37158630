use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::{AuthToken, Session};
use crate::domain::errors::ApiError;

/// Payload wrapped as `{"data": ...}` or returned bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{"data": payload}`.
    Wrapped {
        /// Payload.
        data: T,
    },
    /// Payload at the top level.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Unwraps the payload.
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Parses a response body, accepting either envelope form.
///
/// # Errors
/// Returns a decode error when the body matches neither form.
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| ApiError::decode(e.to_string()))
}

/// Pulls a human message out of an error body: `message`, then `error`.
#[must_use]
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.get("data").filter(|d| d.is_object()).unwrap_or(&value);

    ["message", "error"].iter().find_map(|key| {
        object
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
    })
}

/// Sign-in request body.
#[derive(Debug, serde::Serialize)]
pub struct LoginBody<'a> {
    /// Account email.
    pub email: &'a str,
    /// Account password.
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    #[serde(default)]
    pub name: Option<String>,
}

/// Sign-in response. The token may come as `token` or `access_token`.
#[derive(Debug, Deserialize)]
pub struct LoginResponseDto {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<LoginUser>,
    #[serde(default)]
    pub name: Option<String>,
}

impl LoginResponseDto {
    /// Builds the session, preferring `token` and `user.name`.
    ///
    /// # Errors
    /// Returns a decode error when no usable token is present.
    pub fn into_session(self) -> Result<Session, ApiError> {
        let token = self
            .token
            .and_then(AuthToken::new)
            .or_else(|| self.access_token.and_then(AuthToken::new))
            .ok_or_else(|| ApiError::decode("login response carried no token"))?;

        let username = self.user.and_then(|u| u.name).or(self.name);
        Ok(Session::new(token, username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_envelope_forms() {
        let wrapped: Vec<u32> = parse_envelope(r#"{"data": [1, 2]}"#).unwrap();
        let bare: Vec<u32> = parse_envelope("[3]").unwrap();
        assert_eq!(wrapped, vec![1, 2]);
        assert_eq!(bare, vec![3]);

        let broken = parse_envelope::<Vec<u32>>(r#"{"items": []}"#);
        assert!(matches!(broken, Err(ApiError::Decode { .. })));
    }

    #[test_case(r#"{"message": "Title already used"}"#, Some("Title already used") ; "message")]
    #[test_case(r#"{"error": "Bad category"}"#, Some("Bad category") ; "error field")]
    #[test_case(r#"{"message": "", "error": "Fallback"}"#, Some("Fallback") ; "blank message")]
    #[test_case(r#"{"data": {"message": "Nested"}}"#, Some("Nested") ; "wrapped")]
    #[test_case(r#"{"error": {"code": 12}}"#, None ; "non string")]
    #[test_case("<html>502</html>", None ; "not json")]
    fn test_extract_error_message(body: &str, expected: Option<&str>) {
        assert_eq!(extract_error_message(body).as_deref(), expected);
    }

    #[test]
    fn test_login_response_variants() {
        let dto: LoginResponseDto =
            serde_json::from_str(r#"{"token": "abc", "user": {"name": "Rina"}}"#).unwrap();
        let session = dto.into_session().unwrap();
        assert_eq!(session.token().as_str(), "abc");
        assert_eq!(session.username(), Some("Rina"));

        let dto: LoginResponseDto =
            serde_json::from_str(r#"{"access_token": "xyz", "name": "Budi"}"#).unwrap();
        let session = dto.into_session().unwrap();
        assert_eq!(session.token().as_str(), "xyz");
        assert_eq!(session.username(), Some("Budi"));
    }

    #[test]
    fn test_login_response_without_token() {
        let dto: LoginResponseDto = serde_json::from_str(r#"{"user": {"name": "Rina"}}"#).unwrap();
        assert!(matches!(dto.into_session(), Err(ApiError::Decode { .. })));
    }
}
