//! Versioned user-preferences flag store.
//!
//! A deliberately tiny sibling of the snapshot format: a fixed 5-byte blob
//! holding a 4-byte format version and a single boolean flag. Unlike the
//! snapshot it carries no magic tag; the version gate is the only header
//! check.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::codec::{ByteReader, ByteWriter};
use crate::gateway::StoreError;

/// File name of the preferences blob.
pub const PREFERENCES_FILE_NAME: &str = "preferences.bin";
/// Exact length of the preferences blob in bytes.
pub const PREFERENCES_LEN: usize = 5;
/// Current preferences format version.
pub const PREFERENCES_VERSION: u32 = 1;

/// Reasons a preferences blob is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreferencesError {
    /// Blob length differs from the fixed format length.
    #[error("preferences length mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// The fixed format length.
        expected: usize,
        /// The length actually presented.
        actual: usize,
    },
    /// The header version differs from the supported version.
    #[error("unsupported preferences version {found}")]
    UnsupportedVersion {
        /// The version found in the header.
        found: u32,
    },
}

/// Persistable user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Preferences {
    /// Whether the beeper is audible.
    pub sound_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sound_enabled: true,
        }
    }
}

impl Preferences {
    /// Serializes the preferences into the fixed 5-byte blob.
    #[must_use]
    pub fn encode(&self) -> [u8; PREFERENCES_LEN] {
        let mut blob = [0_u8; PREFERENCES_LEN];
        let mut writer = ByteWriter::new(&mut blob);
        writer.write_u32(PREFERENCES_VERSION);
        writer.write_bool(self.sound_enabled);
        blob
    }

    /// Parses a preferences blob.
    ///
    /// # Errors
    ///
    /// Returns [`PreferencesError`] on a length or version mismatch; no
    /// migration between versions is attempted.
    pub fn decode(blob: &[u8]) -> Result<Self, PreferencesError> {
        if blob.len() != PREFERENCES_LEN {
            return Err(PreferencesError::SizeMismatch {
                expected: PREFERENCES_LEN,
                actual: blob.len(),
            });
        }

        let mut reader = ByteReader::new(blob);
        let version = reader.read_u32();
        if version != PREFERENCES_VERSION {
            return Err(PreferencesError::UnsupportedVersion { found: version });
        }

        Ok(Self {
            sound_enabled: reader.read_bool(),
        })
    }
}

/// Gateway to the preferences blob on disk.
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    /// Creates a store writing the preferences blob under `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(PREFERENCES_FILE_NAME),
        }
    }

    /// Returns the path of the preferences blob.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored preferences.
    ///
    /// A missing file or a blob that fails a format gate yields the
    /// defaults instead of an error; there is no progress to lose here.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] only on a genuine storage read failure.
    pub fn load(&self) -> Result<Preferences, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(err) => return Err(StoreError::Io(err)),
        };

        match Preferences::decode(&bytes) {
            Ok(preferences) => Ok(preferences),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "preferences rejected, using defaults");
                Ok(Preferences::default())
            }
        }
    }

    /// Writes the preferences blob, truncating any previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the write fails.
    pub fn save(&self, preferences: &Preferences) -> Result<(), StoreError> {
        fs::write(&self.path, preferences.encode())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Preferences, PreferencesError, PreferencesStore, PREFERENCES_LEN};

    #[test]
    fn defaults_enable_sound() {
        assert!(Preferences::default().sound_enabled);
    }

    #[test]
    fn blob_layout_is_version_then_flag() {
        let enabled = Preferences {
            sound_enabled: true,
        };
        assert_eq!(enabled.encode(), [0x01, 0x00, 0x00, 0x00, 0x01]);

        let muted = Preferences {
            sound_enabled: false,
        };
        assert_eq!(muted.encode(), [0x01, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn decode_round_trips_both_flag_states() {
        for sound_enabled in [false, true] {
            let preferences = Preferences { sound_enabled };
            let decoded = Preferences::decode(&preferences.encode()).expect("valid blob decodes");
            assert_eq!(decoded, preferences);
        }
    }

    #[test]
    fn foreign_version_is_rejected() {
        let mut blob = Preferences::default().encode();
        blob[0] = 0x02;
        assert_eq!(
            Preferences::decode(&blob),
            Err(PreferencesError::UnsupportedVersion { found: 2 })
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            Preferences::decode(&[0x01]),
            Err(PreferencesError::SizeMismatch {
                expected: PREFERENCES_LEN,
                actual: 1,
            })
        );
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = PreferencesStore::new(dir.path());
        assert_eq!(store.load().expect("no i/o failure"), Preferences::default());
    }

    #[test]
    fn invalid_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = PreferencesStore::new(dir.path());
        std::fs::write(store.path(), [0xFF; PREFERENCES_LEN]).expect("write garbage");

        assert_eq!(store.load().expect("no i/o failure"), Preferences::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let store = PreferencesStore::new(dir.path());

        let muted = Preferences {
            sound_enabled: false,
        };
        store.save(&muted).expect("save succeeds");
        assert_eq!(store.load().expect("no i/o failure"), muted);
    }
}
