use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue},
};
use std::convert::Infallible;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

/// The caller's session, identified by the `session_id` cookie. A request
/// without a usable cookie gets a fresh id; handlers that keep state for it
/// must send [`Session::set_cookie`] back.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub is_new: bool,
}

impl Session {
    fn fresh() -> Self {
        Session {
            id: Uuid::new_v4().to_string(),
            is_new: true,
        }
    }

    /// `Set-Cookie` value for a newly created session, `None` otherwise.
    pub fn set_cookie(&self) -> Option<HeaderValue> {
        if !self.is_new {
            return None;
        }
        HeaderValue::from_str(&format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE, self.id
        ))
        .ok()
    }
}

fn session_id_from_cookies(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        // Only ids we could have issued
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
        .map(|id| id.to_string())
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(match session_id_from_cookies(parts) {
            Some(id) => Session { id, is_new: false },
            None => Session::fresh(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(cookie: Option<&str>) -> Session {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        Session::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reuses_valid_cookie() {
        let id = Uuid::new_v4().to_string();
        let session = extract(Some(&format!("theme=dark; session_id={id}"))).await;
        assert_eq!(session.id, id);
        assert!(!session.is_new);
        assert!(session.set_cookie().is_none());
    }

    #[tokio::test]
    async fn missing_or_forged_cookie_starts_new_session() {
        let none = extract(None).await;
        assert!(none.is_new);

        let forged = extract(Some("session_id=../../etc")).await;
        assert!(forged.is_new);
        assert_ne!(forged.id, "../../etc");

        let cookie = forged.set_cookie().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("session_id={}", forged.id)));
        assert!(cookie.contains("HttpOnly"));
    }
}
