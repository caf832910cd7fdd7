//! Single-use anti-forgery tokens.

use rand::Rng;

use crate::error::AppError;

/// Session key the token is stored under.
pub const SESSION_KEY: &str = "csrf_token";

/// Form field the token is submitted in.
pub const FORM_FIELD: &str = "csrf_token";

const TOKEN_BYTES: usize = 32;

/// 32 random bytes from the thread-local CSPRNG, hex encoded.
pub fn generate_token() -> String {
    hex::encode(rand::thread_rng().gen::<[u8; TOKEN_BYTES]>())
}

/// Compares the submitted token against the one taken out of the session.
/// The caller must already have removed `stored` from the session, so a
/// failure here leaves no token behind either.
pub fn verify(submitted: Option<&str>, stored: Option<&str>) -> Result<(), AppError> {
    let stored = stored.ok_or(AppError::Security("no token in session"))?;
    let submitted = submitted
        .filter(|s| !s.is_empty())
        .ok_or(AppError::Security("no token submitted"))?;

    if constant_time_eq(submitted.as_bytes(), stored.as_bytes()) {
        Ok(())
    } else {
        Err(AppError::Security("token mismatch"))
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_64_hex_chars_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a, b);
    }

    #[test]
    fn verify_outcomes() {
        let token = generate_token();
        assert!(verify(Some(&token), Some(&token)).is_ok());
        assert!(matches!(verify(Some(&token), None), Err(AppError::Security(_))));
        assert!(matches!(verify(None, Some(&token)), Err(AppError::Security(_))));
        assert!(matches!(verify(Some(""), Some(&token)), Err(AppError::Security(_))));
        assert!(matches!(
            verify(Some(&generate_token()), Some(&token)),
            Err(AppError::Security(_))
        ));
    }
}
