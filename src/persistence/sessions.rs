use super::files::{read_json, write_json, StoreError};
use crate::domain::SessionRecord;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Durable tracking of completed work sessions
pub trait SessionStore {
    /// Today's record, reset to zero if the stored one is from another day
    fn load(&self) -> Result<SessionRecord>;

    /// Record one more completed work session and return the updated record
    fn increment(&mut self) -> Result<SessionRecord>;
}

/// Session store backed by sessions.json
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    path: PathBuf,
}

impl JsonSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record as seen on `today`
    pub fn load_on(&self, today: NaiveDate) -> Result<SessionRecord> {
        let stored = match read_json::<SessionRecord>(&self.path) {
            Ok(Some(record)) => record,
            Ok(None) => {
                let record = SessionRecord::fresh(today);
                write_json(&self.path, &record)?;
                return Ok(record);
            }
            Err(StoreError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "session file is corrupt, starting a new day");
                return Ok(SessionRecord::fresh(today));
            }
            Err(e) => return Err(e.into()),
        };

        if stored.is_for(today) {
            return Ok(stored);
        }

        info!(previous = %stored.created, "new day, resetting session count");
        let record = SessionRecord::fresh(today);
        write_json(&self.path, &record)?;
        Ok(record)
    }

    /// Increment the record as seen on `today`
    pub fn increment_on(&self, today: NaiveDate) -> Result<SessionRecord> {
        let mut record = self.load_on(today)?;
        record.increment();
        write_json(&self.path, &record)?;
        Ok(record)
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<SessionRecord> {
        self.load_on(Local::now().date_naive())
    }

    fn increment(&mut self) -> Result<SessionRecord> {
        self.increment_on(Local::now().date_naive())
    }
}
