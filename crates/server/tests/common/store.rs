//! Status store doubles for failure paths.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use strata_core::StatusRecord;
use strata_status::models::StatusRow;
use strata_status::{StatusError, StatusRepo, StatusResult, StatusStore};

/// Store whose every operation fails, counting how often it was touched.
#[allow(dead_code)]
pub struct UnavailableStore {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl UnavailableStore {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> StatusResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StatusError::Internal("database unavailable".to_string()))
    }
}

#[async_trait]
impl StatusRepo for UnavailableStore {
    async fn get_status_row(&self, _study_uid: &str) -> StatusResult<Option<StatusRow>> {
        self.fail()
    }

    async fn set_status(&self, _study_uid: &str, _status: &StatusRecord) -> StatusResult<()> {
        self.fail()
    }
}

#[async_trait]
impl StatusStore for UnavailableStore {
    async fn migrate(&self) -> StatusResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StatusResult<()> {
        self.fail()
    }

    async fn close(&self) {}
}

/// Store that reads through to a real store but rejects every write.
#[allow(dead_code)]
pub struct ReadOnlyStore {
    inner: Arc<dyn StatusStore>,
}

#[allow(dead_code)]
impl ReadOnlyStore {
    pub fn new(inner: Arc<dyn StatusStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl StatusRepo for ReadOnlyStore {
    async fn get_status_row(&self, study_uid: &str) -> StatusResult<Option<StatusRow>> {
        self.inner.get_status_row(study_uid).await
    }

    async fn set_status(&self, _study_uid: &str, _status: &StatusRecord) -> StatusResult<()> {
        Err(StatusError::Internal("read-only replica".to_string()))
    }
}

#[async_trait]
impl StatusStore for ReadOnlyStore {
    async fn migrate(&self) -> StatusResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StatusResult<()> {
        self.inner.health_check().await
    }

    async fn close(&self) {
        self.inner.close().await;
    }
}
