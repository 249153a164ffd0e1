//! Authenticated user identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::role::Role;
use crate::session::PersistedSession;

/// Credentials posted to the login endpoint.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Server-issued login payload.
///
/// Accepts the current field names as well as the legacy backend's
/// (`nome`, `perfil`, `tipoAtividadeGerenciada`, `fotoUrl`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    pub token: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "perfil")]
    pub role: Role,
    #[serde(default, alias = "tipoAtividadeGerenciada")]
    pub modality: Option<String>,
    #[serde(default, alias = "fotoUrl")]
    pub avatar_url: Option<String>,
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("token", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("modality", &self.modality)
            .field("avatar_url", &self.avatar_url)
            .finish()
    }
}

/// Normalizes an avatar URL: `"null"`, the empty string and absence all mean
/// "no avatar". Any other value is kept exactly.
pub fn normalize_avatar_url(url: Option<&str>) -> Option<String> {
    match url {
        None | Some("") | Some("null") => None,
        Some(url) => Some(url.to_string()),
    }
}

/// Empty modality strings are treated as absent.
fn normalize_modality(modality: Option<String>) -> Option<String> {
    modality.filter(|m| !m.is_empty())
}

/// The identity half of the session.
///
/// `is_logged_in` is stored rather than computed so observers can read it
/// directly, but every constructor keeps it equal to `token.is_some()`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub token: Option<String>,
    pub name: String,
    pub role: Option<Role>,
    pub modality: Option<String>,
    pub avatar_url: Option<String>,
    pub is_logged_in: bool,
}

impl SessionUser {
    /// Builds the logged-in identity from a login payload.
    pub fn from_login(payload: LoginPayload) -> Self {
        Self {
            token: Some(payload.token),
            name: payload.name,
            role: Some(payload.role),
            modality: normalize_modality(payload.modality),
            avatar_url: normalize_avatar_url(payload.avatar_url.as_deref()),
            is_logged_in: true,
        }
    }

    /// Rebuilds the identity from a persisted record.
    ///
    /// Missing or unparseable fields fall back to safe defaults (empty name,
    /// no role, no modality, no avatar) instead of failing.
    pub fn from_record(record: PersistedSession) -> Self {
        let role = record.role.as_deref().and_then(|raw| match Role::from_str(raw) {
            Ok(role) => Some(role),
            Err(_) => {
                tracing::warn!("[SessionUser] Ignoring unknown persisted role: {}", raw);
                None
            }
        });

        Self {
            token: Some(record.token),
            name: record.name.unwrap_or_default(),
            role,
            modality: normalize_modality(record.modality),
            avatar_url: normalize_avatar_url(record.avatar_url.as_deref()),
            is_logged_in: true,
        }
    }

    /// The subset of the identity that survives a restart, if logged in.
    pub fn to_record(&self) -> Option<PersistedSession> {
        let token = self.token.clone()?;
        Some(PersistedSession {
            token,
            name: Some(self.name.clone()),
            role: self.role.map(|role| role.to_string()),
            modality: self.modality.clone(),
            avatar_url: self.avatar_url.clone(),
        })
    }
}

impl fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionUser")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("name", &self.name)
            .field("role", &self.role)
            .field("modality", &self.modality)
            .field("avatar_url", &self.avatar_url)
            .field("is_logged_in", &self.is_logged_in)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(avatar_url: Option<&str>) -> LoginPayload {
        LoginPayload {
            token: "tok-1".to_string(),
            name: "Ana".to_string(),
            role: Role::Student,
            modality: None,
            avatar_url: avatar_url.map(str::to_string),
        }
    }

    #[test]
    fn test_avatar_null_string_is_absent() {
        assert_eq!(SessionUser::from_login(payload(Some("null"))).avatar_url, None);
        assert_eq!(SessionUser::from_login(payload(None)).avatar_url, None);
        assert_eq!(SessionUser::from_login(payload(Some(""))).avatar_url, None);
    }

    #[test]
    fn test_avatar_other_values_preserved() {
        let user = SessionUser::from_login(payload(Some("https://cdn.example/a.png")));
        assert_eq!(user.avatar_url.as_deref(), Some("https://cdn.example/a.png"));

        // Only the exact literal is special
        let user = SessionUser::from_login(payload(Some("NULL")));
        assert_eq!(user.avatar_url.as_deref(), Some("NULL"));
    }

    #[test]
    fn test_login_payload_accepts_legacy_fields() {
        let json = r#"{
            "token": "abc",
            "nome": "Bruno",
            "perfil": "PROFESSOR",
            "tipoAtividadeGerenciada": "EXTENSAO"
        }"#;
        let payload: LoginPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.name, "Bruno");
        assert_eq!(payload.role, Role::Teacher);
        assert_eq!(payload.modality.as_deref(), Some("EXTENSAO"));
        assert_eq!(payload.avatar_url, None);
    }

    #[test]
    fn test_login_payload_camel_case() {
        let json = r#"{"token":"t","name":"C","role":"ADMIN","avatarUrl":"null"}"#;
        let payload: LoginPayload = serde_json::from_str(json).unwrap();
        let user = SessionUser::from_login(payload);
        assert_eq!(user.role, Some(Role::Admin));
        assert_eq!(user.avatar_url, None);
        assert!(user.is_logged_in);
    }

    #[test]
    fn test_from_record_fills_defaults() {
        let user = SessionUser::from_record(PersistedSession {
            token: "tok".to_string(),
            name: None,
            role: Some("SUPERUSER".to_string()),
            modality: Some(String::new()),
            avatar_url: Some("null".to_string()),
        });
        assert_eq!(user.token.as_deref(), Some("tok"));
        assert_eq!(user.name, "");
        assert_eq!(user.role, None);
        assert_eq!(user.modality, None);
        assert_eq!(user.avatar_url, None);
        assert!(user.is_logged_in);
    }

    #[test]
    fn test_record_round_trip_keeps_identity() {
        let user = SessionUser::from_login(LoginPayload {
            modality: Some("PESQUISA".to_string()),
            ..payload(Some("https://a/b.png"))
        });
        let restored = SessionUser::from_record(user.to_record().unwrap());
        assert_eq!(restored, user);
    }

    #[test]
    fn test_debug_redacts_token() {
        let user = SessionUser::from_login(payload(None));
        let rendered = format!("{:?}", user);
        assert!(!rendered.contains("tok-1"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_logged_out_user_has_no_record() {
        assert!(SessionUser::default().to_record().is_none());
    }
}
