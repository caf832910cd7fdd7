//! Per-session key/value state. The only key in use is the anti-forgery
//! token: created if absent on form render, taken (read and deleted) on
//! every submission.

mod memory;
mod redis_store;

pub use memory::MemorySessions;
pub use redis_store::RedisSessions;

use crate::csrf;
use crate::error::AppError;

#[derive(Clone)]
pub enum SessionStore {
    Redis(RedisSessions),
    Memory(MemorySessions),
}

impl SessionStore {
    /// Returns the session's token, minting and storing one if it has none.
    pub async fn get_or_create_token(&self, session_id: &str) -> Result<String, AppError> {
        match self {
            SessionStore::Redis(store) => store.get_or_create(session_id, csrf::SESSION_KEY).await,
            SessionStore::Memory(store) => store.get_or_create(session_id, csrf::SESSION_KEY),
        }
    }

    /// Removes the session's token and returns what was there.
    pub async fn take_token(&self, session_id: &str) -> Result<Option<String>, AppError> {
        match self {
            SessionStore::Redis(store) => store.take(session_id, csrf::SESSION_KEY).await,
            SessionStore::Memory(store) => store.take(session_id, csrf::SESSION_KEY),
        }
    }
}
