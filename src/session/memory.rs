use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::csrf;
use crate::error::AppError;

/// Session values keyed by (session id, key). Clones share state.
#[derive(Clone, Default)]
pub struct MemorySessions {
    values: Arc<Mutex<HashMap<(String, String), String>>>,
}

impl MemorySessions {
    pub fn get_or_create(&self, session_id: &str, key: &str) -> Result<String, AppError> {
        let mut values = self.values.lock().map_err(|_| AppError::Poisoned)?;
        let token = values
            .entry((session_id.to_string(), key.to_string()))
            .or_insert_with(csrf::generate_token);
        Ok(token.clone())
    }

    pub fn take(&self, session_id: &str, key: &str) -> Result<Option<String>, AppError> {
        let mut values = self.values.lock().map_err(|_| AppError::Poisoned)?;
        Ok(values.remove(&(session_id.to_string(), key.to_string())))
    }

    pub fn get(&self, session_id: &str, key: &str) -> Result<Option<String>, AppError> {
        let values = self.values.lock().map_err(|_| AppError::Poisoned)?;
        Ok(values.get(&(session_id.to_string(), key.to_string())).cloned())
    }
}
