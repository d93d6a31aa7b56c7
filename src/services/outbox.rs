use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const OUTBOX_KEY: &str = "warranty_desk:notices";
const PROCESSING_KEY: &str = "warranty_desk:notices:processing";

/// Which template the notifier renders for a queued notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Submission,
    StatusChange,
}

/// Notice payload serialized into Redis.
///
/// Enqueued only after the claim row is committed; the notifier re-reads the
/// record before rendering, so the payload carries the id, not the fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedNotice {
    pub claim_id: Uuid,
    pub recipient: String,
    pub kind: NoticeKind,
    pub attempts: u32,
}

/// Redis-backed notification outbox with retry support.
pub struct NotificationOutbox {
    client: redis::Client,
}

impl NotificationOutbox {
    pub fn new(redis_url: &str) -> Result<Self, OutboxError> {
        let client = redis::Client::open(redis_url).map_err(OutboxError::Redis)?;
        Ok(Self { client })
    }

    /// Enqueue a notice for delivery.
    pub async fn enqueue(&self, notice: &QueuedNotice) -> Result<(), OutboxError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(OutboxError::Redis)?;
        let payload = serde_json::to_string(notice).map_err(OutboxError::Serialize)?;
        conn.lpush::<_, _, ()>(OUTBOX_KEY, &payload)
            .await
            .map_err(OutboxError::Redis)?;
        Ok(())
    }

    /// Dequeue a notice for delivery (pop with move to processing list).
    pub async fn dequeue(&self) -> Result<Option<QueuedNotice>, OutboxError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(OutboxError::Redis)?;
        let result: Option<String> = conn
            .rpoplpush(OUTBOX_KEY, PROCESSING_KEY)
            .await
            .map_err(OutboxError::Redis)?;

        match result {
            Some(payload) => {
                let notice: QueuedNotice =
                    serde_json::from_str(&payload).map_err(OutboxError::Serialize)?;
                Ok(Some(notice))
            }
            None => Ok(None),
        }
    }

    /// Check Redis connectivity (for health checks).
    pub async fn health_check(&self) -> Result<(), OutboxError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(OutboxError::Redis)?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(OutboxError::Redis)?;
        Ok(())
    }

    /// Current outbox depth (notices waiting for delivery).
    pub async fn depth(&self) -> Result<u64, OutboxError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(OutboxError::Redis)?;
        let depth: u64 = conn.llen(OUTBOX_KEY).await.map_err(OutboxError::Redis)?;
        Ok(depth)
    }

    /// Mark a notice as handled (remove from processing list).
    pub async fn complete(&self, notice: &QueuedNotice) -> Result<(), OutboxError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(OutboxError::Redis)?;
        let payload = serde_json::to_string(notice).map_err(OutboxError::Serialize)?;
        conn.lrem::<_, _, ()>(PROCESSING_KEY, 1, &payload)
            .await
            .map_err(OutboxError::Redis)?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OutboxError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
