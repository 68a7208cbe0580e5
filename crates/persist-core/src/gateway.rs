//! Persistence gateway for the single snapshot slot.
//!
//! The gateway owns the storage path and the save/restore lifecycle entry
//! points; the byte layout itself belongs to the [`codec`](crate::codec).
//! There is exactly one "current" snapshot at a time, overwritten on each
//! save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::{self, DecodeError, SNAPSHOT_LEN};
use crate::state::StateAccess;

/// File name of the single snapshot slot.
pub const SNAPSHOT_FILE_NAME: &str = "save.bin";

/// Storage-level failures reported by the gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No saved snapshot exists yet. Expected on first run and never fatal;
    /// the caller proceeds with power-on state.
    #[error("no saved snapshot exists")]
    NotFound,
    /// The storage entry could not be opened, read, or fully written.
    #[error("snapshot storage i/o failed: {0}")]
    Io(#[from] io::Error),
}

/// Result of a restore attempt that did not hit a storage failure.
///
/// Codec-level rejections are recovered locally: the emulator keeps whatever
/// state it already has instead of escalating a user-visible error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// A valid snapshot was applied to the live state.
    Restored,
    /// No snapshot file exists; power-on state stands.
    NoSnapshot,
    /// A file exists but failed a codec gate; power-on state stands.
    Rejected(DecodeError),
}

/// Gateway to the single named snapshot slot on disk.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store writing the snapshot slot under `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SNAPSHOT_FILE_NAME),
        }
    }

    /// Returns the path of the snapshot slot.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes a snapshot blob to the slot, truncating any previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the entry cannot be created or the
    /// full length cannot be written; a partial write is a failure, never a
    /// partial-success state.
    pub fn save_blob(&self, blob: &[u8; SNAPSHOT_LEN]) -> Result<(), StoreError> {
        fs::write(&self.path, blob)?;
        Ok(())
    }

    /// Reads the raw contents of the slot.
    ///
    /// Length is not validated here; a short file flows to the codec and is
    /// rejected there as a size mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no prior save exists, or
    /// [`StoreError::Io`] on a genuine read failure.
    pub fn load_blob(&self) -> Result<Vec<u8>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Encodes the live state and writes it to the slot.
    ///
    /// Called at suspend/pause/terminate boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the write fails; the save did not
    /// happen and the caller should surface the possible progress loss.
    pub fn save_state<S: StateAccess>(&self, state: &S) -> Result<(), StoreError> {
        let blob = codec::encode(state);
        self.save_blob(&blob)?;
        tracing::info!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    /// Loads, validates, and applies the stored snapshot to the live state.
    ///
    /// Called at the resume/start boundary. A missing file and codec-level
    /// rejections are reported as recovered [`RestoreOutcome`]s with the
    /// live state untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] only on a genuine storage read failure;
    /// the caller degrades gracefully to starting fresh.
    pub fn restore_state<S: StateAccess>(&self, state: &mut S) -> Result<RestoreOutcome, StoreError> {
        let bytes = match self.load_blob() {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => {
                tracing::info!(path = %self.path.display(), "no snapshot present");
                return Ok(RestoreOutcome::NoSnapshot);
            }
            Err(err) => return Err(err),
        };

        match codec::decode(&bytes, state) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "snapshot restored");
                Ok(RestoreOutcome::Restored)
            }
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "snapshot rejected");
                Ok(RestoreOutcome::Rejected(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RestoreOutcome, SnapshotStore, StoreError, SNAPSHOT_FILE_NAME};
    use crate::codec::{DecodeError, SNAPSHOT_LEN, VERSION_OFFSET};
    use crate::state::MachineState;

    #[test]
    fn load_from_fresh_install_reports_not_found() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SnapshotStore::new(dir.path());

        assert!(matches!(store.load_blob(), Err(StoreError::NotFound)));

        let mut machine = MachineState::power_on();
        let outcome = store.restore_state(&mut machine).expect("no i/o failure");
        assert_eq!(outcome, RestoreOutcome::NoSnapshot);
        assert_eq!(machine, MachineState::power_on());
    }

    #[test]
    fn save_creates_a_slot_of_the_exact_format_length() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SnapshotStore::new(dir.path());

        let machine = MachineState::power_on();
        store.save_state(&machine).expect("save succeeds");

        assert!(store.path().ends_with(SNAPSHOT_FILE_NAME));
        let on_disk = std::fs::read(store.path()).expect("slot exists");
        assert_eq!(on_disk.len(), SNAPSHOT_LEN);
    }

    #[test]
    fn save_then_restore_round_trips_the_machine() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SnapshotStore::new(dir.path());

        let mut machine = MachineState::power_on();
        machine.registers.set_pc(0x0456);
        machine.registers.set_tick_counter(99);
        machine.memory.set(0x020, 0xD);
        store.save_state(&machine).expect("save succeeds");

        let mut restored = MachineState::power_on();
        let outcome = store.restore_state(&mut restored).expect("no i/o failure");

        assert_eq!(outcome, RestoreOutcome::Restored);
        assert_eq!(restored, machine);
    }

    #[test]
    fn repeated_saves_without_state_change_are_byte_identical() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SnapshotStore::new(dir.path());
        let machine = MachineState::power_on();

        store.save_state(&machine).expect("first save succeeds");
        let first = std::fs::read(store.path()).expect("slot exists");
        store.save_state(&machine).expect("second save succeeds");
        let second = std::fs::read(store.path()).expect("slot exists");

        assert_eq!(first, second);
    }

    #[test]
    fn tampered_slot_is_a_recovered_rejection() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SnapshotStore::new(dir.path());

        let machine = MachineState::power_on();
        store.save_state(&machine).expect("save succeeds");

        let mut bytes = std::fs::read(store.path()).expect("slot exists");
        bytes[VERSION_OFFSET] = 0x7F;
        std::fs::write(store.path(), &bytes).expect("rewrite slot");

        let mut target = MachineState::power_on();
        let outcome = store.restore_state(&mut target).expect("no i/o failure");
        assert_eq!(
            outcome,
            RestoreOutcome::Rejected(DecodeError::UnsupportedVersion { found: 0x7F })
        );
        assert_eq!(target, MachineState::power_on());
    }

    #[test]
    fn truncated_slot_surfaces_as_size_mismatch_rejection() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = SnapshotStore::new(dir.path());

        store
            .save_state(&MachineState::power_on())
            .expect("save succeeds");
        let bytes = std::fs::read(store.path()).expect("slot exists");
        std::fs::write(store.path(), &bytes[..SNAPSHOT_LEN - 1]).expect("truncate slot");

        let mut target = MachineState::power_on();
        let outcome = store.restore_state(&mut target).expect("no i/o failure");
        assert_eq!(
            outcome,
            RestoreOutcome::Rejected(DecodeError::SizeMismatch {
                expected: SNAPSHOT_LEN,
                actual: SNAPSHOT_LEN - 1,
            })
        );
    }
}
