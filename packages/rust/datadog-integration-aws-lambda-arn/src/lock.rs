//! Cross-resource mutation lock for AWS integration accounts.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

/// Serializes remote mutations of AWS integration account records.
///
/// The Datadog API does not handle concurrent attach/detach calls against an
/// integration account safely, so every resource that mutates the account
/// record (this one and the AWS integration account resource) must hold
/// the same handle for the duration of its remote call. Clones share the
/// underlying lock; construct one handle per process and inject it into each
/// resource.
#[derive(Clone, Debug, Default)]
pub struct IntegrationAwsLock {
    inner: Arc<Mutex<()>>,
}

impl IntegrationAwsLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock, waiting until any other holder releases it. The
    /// returned guard releases on drop.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}
