use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Data of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    /// ISO-8601, usually without an offset (server time is UTC).
    #[serde(default)]
    pub expiry: Option<String>,
}

impl LoginResponse {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.expiry.as_deref()?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn naive_expiry_is_read_as_utc() {
        let resp = LoginResponse {
            token: "t".into(),
            username: "admin".into(),
            role: Some("admin".into()),
            expiry: Some("2025-05-01T10:30:00.123456".into()),
        };
        let at = resp.expires_at().unwrap();
        assert_eq!(at.hour(), 10);
        assert_eq!(at.minute(), 30);
    }

    #[test]
    fn garbage_expiry_is_none() {
        let resp = LoginResponse {
            token: "t".into(),
            username: "admin".into(),
            role: None,
            expiry: Some("tomorrow".into()),
        };
        assert!(resp.expires_at().is_none());
    }
}
