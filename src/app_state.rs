use sqlx::PgPool;
use std::sync::Arc;

use crate::services::outbox::NotificationOutbox;

/// Shared application state passed to all route handlers.
///
/// The mail client lives in the notifier process, not here; the server only
/// ever enqueues notices.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub outbox: Arc<NotificationOutbox>,
}

impl AppState {
    pub fn new(db: PgPool, outbox: NotificationOutbox) -> Self {
        Self {
            db,
            outbox: Arc::new(outbox),
        }
    }
}
