use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tracing::debug;

use crate::csrf;
use crate::error::AppError;

#[derive(Clone)]
pub struct RedisSessions {
    conn: MultiplexedConnection,
    ttl_seconds: u64,
}

fn session_key(session_id: &str, key: &str) -> String {
    format!("session:{}:{}", session_id, key)
}

impl RedisSessions {
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> redis::RedisResult<Self> {
        let client = Client::open(redis_url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(RedisSessions { conn, ttl_seconds })
    }

    pub async fn get_or_create(&self, session_id: &str, key: &str) -> Result<String, AppError> {
        let redis_key = session_key(session_id, key);
        let mut conn = self.conn.clone();

        let existing: Option<String> = conn.get(&redis_key).await?;
        if let Some(token) = existing {
            return Ok(token);
        }

        // SET NX so two concurrent renders of the same session agree on one token
        let token = csrf::generate_token();
        let created: Option<String> = redis::cmd("SET")
            .arg(&redis_key)
            .arg(&token)
            .arg("NX")
            .arg("EX")
            .arg(self.ttl_seconds)
            .query_async(&mut conn)
            .await?;
        if created.is_some() {
            debug!("issued anti-forgery token for session {}", session_id);
            return Ok(token);
        }

        let winner: Option<String> = conn.get(&redis_key).await?;
        match winner {
            Some(token) => Ok(token),
            None => {
                // Taken by a submission in between; issue a fresh one
                let _: () = conn.set_ex(&redis_key, &token, self.ttl_seconds).await?;
                Ok(token)
            }
        }
    }

    /// GETDEL, so each stored token can be handed out to exactly one caller.
    pub async fn take(&self, session_id: &str, key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.conn.clone();
        let token: Option<String> = conn.get_del(session_key(session_id, key)).await?;
        Ok(token)
    }
}
