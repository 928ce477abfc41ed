//! Inbound event dispatch.
//!
//! One long-polling loop feeds events to the active pipeline; each event
//! runs as its own task, so pipelines for different users interleave at
//! await points while one user's pipeline stays strictly sequential.

use crate::telegram::TelegramClient;
use crate::transport::InboundEvent;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Wait before retrying after a failed update poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// A pipeline that consumes classified inbound events.
///
/// `handle` owns its error boundary: it replies to the user on failure and
/// never returns an error into the dispatch loop.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: InboundEvent);
}

/// Runs the dispatch loop until the process is stopped.
pub async fn run_dispatch_loop(telegram: Arc<TelegramClient>, handler: Arc<dyn EventHandler>) {
    let mut offset = 0;
    loop {
        let (next_offset, events) = match telegram.poll_events(offset).await {
            Ok(batch) => batch,
            Err(err) => {
                warn!(%err, "failed to poll updates, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };
        offset = next_offset;

        for event in events {
            let handler = handler.clone();
            tokio::spawn(async move {
                handler.handle(event).await;
            });
        }
    }
}
