use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::load::{load_with_report, save, LoadReport, LoadSource};
use crate::state::SavedState;
use crate::storage::ByteStorage;

/// Serializes every load and save against one storage location.
///
/// Callers never observe a half-written or half-migrated record: each operation holds the
/// storage lock from read (or encode) to the end of the write.
#[derive(Debug)]
pub struct StateStore<S> {
    storage: Mutex<S>,
}

impl<S: ByteStorage> StateStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    /// Loads the stored state. Only storage errors are returned; undecodable bytes load as the
    /// default state.
    pub fn load(&self) -> Result<SavedState> {
        Ok(self.load_report()?.state)
    }

    pub fn load_report(&self) -> Result<LoadReport> {
        let bytes = self.lock().read()?;
        Ok(load_with_report(&bytes))
    }

    pub fn save(&self, state: &SavedState) -> Result<()> {
        let bytes = save(state);
        self.lock().write(&bytes)?;
        Ok(())
    }

    /// Replaces the stored state with the default one and returns it.
    pub fn reset(&self) -> Result<SavedState> {
        let state = SavedState::default();
        self.save(&state)?;
        Ok(state)
    }

    /// Rewrites a readable record in the current schema.
    ///
    /// Nothing is written when the storage is empty or its bytes could not be loaded, so a
    /// corrupt record stays on disk for inspection.
    pub fn migrate(&self) -> Result<LoadReport> {
        let mut storage = self.lock();
        let report = load_with_report(&storage.read()?);
        if let LoadSource::Upgraded { from } = report.source {
            storage.write(&save(&report.state))?;
            tracing::info!(from = %from, "rewrote persisted state in the current schema");
        }
        Ok(report)
    }

    pub fn into_inner(self) -> S {
        self.storage
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
