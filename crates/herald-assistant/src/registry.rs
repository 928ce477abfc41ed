//! Maps each user to their provider-side conversation thread.
//!
//! A user gets exactly one thread for the process lifetime; the provider
//! owns the actual resource, the registry only remembers its identifier.
//! Thread creation is guarded per user rather than by one map-wide lock
//! across the provider call, so concurrent first contacts from two users
//! create their threads in parallel while a single user racing against
//! themselves still triggers exactly one creation call.
//!
//! No eviction: entries live until the process exits.

use crate::api::AssistantApi;
use crate::error::AssistantError;
use herald_types::{ThreadId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

type Slot = Arc<Mutex<Option<ThreadId>>>;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    slots: Mutex<HashMap<UserId, Slot>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's thread, creating it on first contact.
    ///
    /// The map lock is held only long enough to fetch or insert the
    /// per-user slot; the provider call happens under the slot's own lock.
    /// A failed creation leaves the slot empty, so the next message from
    /// that user retries.
    pub async fn resolve_or_create(
        &self,
        user: UserId,
        api: &dyn AssistantApi,
    ) -> Result<ThreadId, AssistantError> {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.entry(user).or_default().clone()
        };

        let mut guard = slot.lock().await;
        if let Some(thread) = guard.as_ref() {
            return Ok(thread.clone());
        }

        let thread = api.create_thread().await?;
        info!(%user, %thread, "created conversation thread");
        *guard = Some(thread.clone());
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use herald_types::{MessageId, Run, RunId, RunStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Hands out sequentially numbered threads and counts creations.
    #[derive(Default)]
    struct CountingApi {
        created: AtomicUsize,
    }

    #[async_trait]
    impl AssistantApi for CountingApi {
        async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
            let n = self.created.fetch_add(1, Ordering::SeqCst);
            // Yield so concurrent callers overlap inside the critical
            // section if the guard is broken.
            tokio::task::yield_now().await;
            Ok(ThreadId(format!("thread_{n}")))
        }

        async fn add_user_message(
            &self,
            _thread: &ThreadId,
            _text: &str,
        ) -> Result<MessageId, AssistantError> {
            unimplemented!("not used by the registry")
        }

        async fn create_run(&self, _thread: &ThreadId) -> Result<Run, AssistantError> {
            unimplemented!("not used by the registry")
        }

        async fn run_status(
            &self,
            _thread: &ThreadId,
            _run: &RunId,
        ) -> Result<RunStatus, AssistantError> {
            unimplemented!("not used by the registry")
        }

        async fn latest_reply(&self, _thread: &ThreadId) -> Result<String, AssistantError> {
            unimplemented!("not used by the registry")
        }
    }

    #[tokio::test]
    async fn second_resolve_reuses_thread() {
        let registry = SessionRegistry::new();
        let api = CountingApi::default();
        let user = UserId(42);

        let first = registry.resolve_or_create(user, &api).await.unwrap();
        let second = registry.resolve_or_create(user, &api).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_contact_creates_once() {
        let registry = Arc::new(SessionRegistry::new());
        let api = Arc::new(CountingApi::default());
        let user = UserId(7);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                let api = api.clone();
                tokio::spawn(async move { registry.resolve_or_create(user, api.as_ref()).await })
            })
            .collect();

        let mut threads = Vec::new();
        for task in tasks {
            threads.push(task.await.unwrap().unwrap());
        }

        assert!(threads.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(api.created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn distinct_users_get_distinct_threads() {
        let registry = SessionRegistry::new();
        let api = CountingApi::default();

        let a = registry.resolve_or_create(UserId(1), &api).await.unwrap();
        let b = registry.resolve_or_create(UserId(2), &api).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(api.created.load(Ordering::SeqCst), 2);
    }

    /// Fails the first creation, succeeds afterwards.
    struct FlakyApi {
        inner: CountingApi,
    }

    #[async_trait]
    impl AssistantApi for FlakyApi {
        async fn create_thread(&self) -> Result<ThreadId, AssistantError> {
            if self.inner.created.load(Ordering::SeqCst) == 0 {
                self.inner.created.fetch_add(1, Ordering::SeqCst);
                return Err(AssistantError::Api {
                    status: 500,
                    message: "try later".into(),
                });
            }
            self.inner.create_thread().await
        }

        async fn add_user_message(
            &self,
            _thread: &ThreadId,
            _text: &str,
        ) -> Result<MessageId, AssistantError> {
            unimplemented!()
        }

        async fn create_run(&self, _thread: &ThreadId) -> Result<Run, AssistantError> {
            unimplemented!()
        }

        async fn run_status(
            &self,
            _thread: &ThreadId,
            _run: &RunId,
        ) -> Result<RunStatus, AssistantError> {
            unimplemented!()
        }

        async fn latest_reply(&self, _thread: &ThreadId) -> Result<String, AssistantError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn failed_creation_retries_on_next_contact() {
        let registry = SessionRegistry::new();
        let api = FlakyApi {
            inner: CountingApi::default(),
        };
        let user = UserId(3);

        assert!(registry.resolve_or_create(user, &api).await.is_err());
        let thread = registry.resolve_or_create(user, &api).await.unwrap();
        assert_eq!(thread, ThreadId("thread_1".into()));
    }
}
