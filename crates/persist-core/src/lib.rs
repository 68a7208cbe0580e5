//! Snapshot persistence core for the Pixelpet handheld emulator.
//!
//! The 4-bit core's complete execution state (registers, timers, interrupt
//! controller, and nibble-addressed working memory) is frozen into a single
//! fixed-length binary blob on suspend and thawed again on resume. This
//! crate owns the stable on-disk format, the bit-exact packing primitives,
//! the storage gateway for the single snapshot slot, and the small
//! versioned preferences store that rides alongside it.

/// Nibble-addressable working-memory model.
pub mod memory;
pub use memory::{
    NibbleMemory, MEM_IO_ADDR, MEM_IO_SIZE, MEM_RAM_ADDR, MEM_RAM_SIZE, MEM_SIZE, NIBBLE_MASK,
};

/// Emulator state model and the codec-facing access capability.
pub mod state;
pub use state::{
    registers::{FLAGS_MASK, FLAG_C, FLAG_D, FLAG_I, FLAG_Z, NP_MASK, PC_MASK, XY_MASK},
    InterruptSlot, InterruptSource, MachineState, Registers, StateAccess, INT_SLOT_NUM,
};

/// State snapshot codec: fixed-layout binary encode/decode with header
/// gating.
pub mod codec;
pub use codec::{
    decode, encode, ByteReader, ByteWriter, DecodeError, SNAPSHOT_LEN, SNAPSHOT_MAGIC,
    SNAPSHOT_VERSION,
};

/// Persistence gateway for the single snapshot slot.
pub mod gateway;
pub use gateway::{RestoreOutcome, SnapshotStore, StoreError, SNAPSHOT_FILE_NAME};

/// Versioned user-preferences flag store.
pub mod preferences;
pub use preferences::{
    Preferences, PreferencesError, PreferencesStore, PREFERENCES_FILE_NAME, PREFERENCES_LEN,
    PREFERENCES_VERSION,
};

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
