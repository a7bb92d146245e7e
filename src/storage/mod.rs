//! Persistence for the ledger record
//!
//! The ledger lives in exactly one slot. `load` never fails: a missing slot
//! or an unparsable blob both yield the zero-default record. `save` fully
//! overwrites the slot, last writer wins.

pub mod file_io;
mod json_file;
mod memory;

pub use file_io::{read_json, read_json_opt, read_json_value, write_json_atomic, write_text_atomic};
pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;

use tracing::warn;

use crate::error::{TrackerError, TrackerResult};
use crate::models::LedgerRecord;

/// A single named slot holding the serialized ledger
pub trait LedgerPersistence {
    /// Last saved record, or the default record if none can be read
    fn load(&self) -> LedgerRecord;

    /// Serialize the whole record and overwrite the slot
    fn save(&self, record: &LedgerRecord) -> TrackerResult<()>;
}

impl<P: LedgerPersistence + ?Sized> LedgerPersistence for &P {
    fn load(&self) -> LedgerRecord {
        (**self).load()
    }

    fn save(&self, record: &LedgerRecord) -> TrackerResult<()> {
        (**self).save(record)
    }
}

impl<P: LedgerPersistence + ?Sized> LedgerPersistence for Box<P> {
    fn load(&self) -> LedgerRecord {
        (**self).load()
    }

    fn save(&self, record: &LedgerRecord) -> TrackerResult<()> {
        (**self).save(record)
    }
}

/// Shared load path: parse, sanitize, or fall back to the default record
pub(crate) fn recover_record(
    source: &str,
    parsed: Result<LedgerRecord, TrackerError>,
) -> LedgerRecord {
    match parsed {
        Ok(mut record) => {
            for repair in record.sanitize() {
                warn!(slot = source, repair = %repair, "repaired persisted ledger");
            }
            record
        }
        Err(e) => {
            let err = TrackerError::MalformedPersistedData(e.to_string());
            warn!(slot = source, error = %err, "ignoring unreadable ledger, starting empty");
            LedgerRecord::default()
        }
    }
}
