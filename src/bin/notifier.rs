use sqlx::PgPool;
use std::time::Duration;
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;

use warranty_desk::{
    config::AppConfig,
    db::{self, claim_queries},
    services::{
        mailer::Mailer,
        outbox::{NoticeKind, NotificationOutbox, QueuedNotice},
    },
};

const MAX_ATTEMPTS: u32 = 3;
const POLL_INTERVAL_MS: u64 = 1000; // 1 second

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting notification worker");

    // Load configuration
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Initialize database
    tracing::info!("Connecting to PostgreSQL");
    let db_pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // Initialize outbox and mail client
    let outbox = NotificationOutbox::new(&config.redis_url).expect("Failed to initialize outbox");
    let mailer = Mailer::new(
        &config.mail_api_url,
        &config.mail_api_token,
        &config.mail_sender,
    );

    tracing::info!("Worker ready, starting delivery loop");

    // Main delivery loop
    loop {
        match deliver_next(&db_pool, &outbox, &mailer).await {
            Ok(true) => {
                tracing::debug!("Notice handled, checking for next");
            }
            Ok(false) => {
                tracing::trace!("Outbox empty, sleeping");
                sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error handling notice, will retry");
                sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
            }
        }
    }
}

/// Handle the next notice from the outbox.
/// Returns Ok(true) if a notice was handled, Ok(false) if the outbox is empty.
async fn deliver_next(
    pool: &PgPool,
    outbox: &NotificationOutbox,
    mailer: &Mailer,
) -> Result<bool, Box<dyn std::error::Error>> {
    let notice = match outbox.dequeue().await? {
        Some(n) => n,
        None => return Ok(false),
    };

    tracing::info!(
        claim_id = %notice.claim_id,
        kind = ?notice.kind,
        attempt = notice.attempts + 1,
        "Delivering notice"
    );

    // Re-read the claim so the message reflects committed state
    let claim = match claim_queries::get_claim(pool, notice.claim_id).await? {
        Some(c) => c,
        None => {
            tracing::warn!(claim_id = %notice.claim_id, "Claim no longer exists, dropping notice");
            outbox.complete(&notice).await?;
            return Ok(true);
        }
    };

    let result = match notice.kind {
        NoticeKind::Submission => mailer.send_submission_notice(&notice.recipient, &claim).await,
        NoticeKind::StatusChange => {
            mailer
                .send_status_change_notice(&notice.recipient, &claim)
                .await
        }
    };

    match result {
        Ok(()) => {
            outbox.complete(&notice).await?;
            metrics::counter!("notices_sent_total").increment(1);

            tracing::info!(
                claim_id = %claim.id,
                recipient = %notice.recipient,
                "Notice delivered"
            );

            Ok(true)
        }
        Err(e) => {
            tracing::error!(claim_id = %claim.id, error = %e, "Notice delivery failed");

            let attempts = notice.attempts + 1;
            if attempts >= MAX_ATTEMPTS {
                // Best effort ends here; the write it announced is unaffected
                outbox.complete(&notice).await?;
                metrics::counter!("notices_failed_total").increment(1);

                tracing::warn!(
                    claim_id = %claim.id,
                    attempts = attempts,
                    "Notice abandoned after max attempts"
                );
            } else {
                // Re-queue for retry
                let retry = QueuedNotice { attempts, ..notice.clone() };
                outbox.enqueue(&retry).await?;
                outbox.complete(&notice).await?;

                tracing::info!(
                    claim_id = %claim.id,
                    attempts = attempts,
                    "Notice re-queued for retry"
                );
            }

            Ok(true)
        }
    }
}
