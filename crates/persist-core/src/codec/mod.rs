//! State snapshot codec: fixed-layout binary encode/decode with header
//! gating.
//!
//! The snapshot is a single fixed-length blob: a 4-byte magic tag, a 1-byte
//! format version, the packed register/timer/interrupt fields in a fixed
//! order, and the two persisted memory windows. Field order and byte count
//! are part of the format contract; any layout change requires a version
//! bump, never a silent relayout.

/// Masked little-endian cursor primitives.
pub mod bitfield;

use thiserror::Error;

use crate::memory::{MEM_IO_ADDR, MEM_IO_SIZE, MEM_RAM_ADDR, MEM_RAM_SIZE, NIBBLE_MASK};
use crate::state::{StateAccess, INT_SLOT_NUM};

pub use bitfield::{ByteReader, ByteWriter};

/// ASCII tag identifying the snapshot format family.
pub const SNAPSHOT_MAGIC: [u8; 4] = *b"TLST";
/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u8 = 2;

/// Offset of the magic tag.
pub const MAGIC_OFFSET: usize = 0;
/// Offset of the format version byte.
pub const VERSION_OFFSET: usize = 4;
/// Offset of the 13-bit program counter (2 bytes).
pub const PC_OFFSET: usize = 5;
/// Offset of the 12-bit `X` register (2 bytes).
pub const X_OFFSET: usize = 7;
/// Offset of the 12-bit `Y` register (2 bytes).
pub const Y_OFFSET: usize = 9;
/// Offset of the 4-bit accumulator `A`.
pub const A_OFFSET: usize = 11;
/// Offset of the 4-bit accumulator `B`.
pub const B_OFFSET: usize = 12;
/// Offset of the 5-bit `NP` register.
pub const NP_OFFSET: usize = 13;
/// Offset of the 8-bit stack pointer.
pub const SP_OFFSET: usize = 14;
/// Offset of the 4-bit `FLAGS` register.
pub const FLAGS_OFFSET: usize = 15;
/// Offset of the 32-bit tick counter.
pub const TICK_COUNTER_OFFSET: usize = 16;
/// Offset of the 32-bit clock-timer timestamp.
pub const CLK_TIMER_OFFSET: usize = 20;
/// Offset of the 32-bit programmable-timer timestamp.
pub const PROG_TIMER_OFFSET: usize = 24;
/// Offset of the programmable-timer enabled flag (bit 0).
pub const PROG_TIMER_ENABLED_OFFSET: usize = 28;
/// Offset of the programmable-timer data register.
pub const PROG_TIMER_DATA_OFFSET: usize = 29;
/// Offset of the programmable-timer reload register.
pub const PROG_TIMER_RLD_OFFSET: usize = 30;
/// Offset of the 32-bit `CALL` depth counter.
pub const CALL_DEPTH_OFFSET: usize = 31;
/// Offset of the interrupt slots (3 bytes per slot).
pub const INT_SLOTS_OFFSET: usize = 35;
/// Offset of the persisted RAM window (one byte per nibble cell).
pub const RAM_WINDOW_OFFSET: usize = INT_SLOTS_OFFSET + 3 * INT_SLOT_NUM;
/// Offset of the persisted I/O window (one byte per nibble cell).
pub const IO_WINDOW_OFFSET: usize = RAM_WINDOW_OFFSET + MEM_RAM_SIZE;
/// Exact length of a snapshot blob in bytes.
pub const SNAPSHOT_LEN: usize = IO_WINDOW_OFFSET + MEM_IO_SIZE;

/// High-byte mask of the 13-bit program counter field.
const PC_MSB_MASK: u8 = 0x1F;
/// High-byte mask of the 12-bit `X`/`Y` fields.
const XY_MSB_MASK: u8 = 0x0F;
/// High-byte mask of the 5-bit `NP` field.
const NP_MSB_MASK: u8 = 0x1F;
/// Mask covering a full byte.
const FULL_MASK: u8 = 0xFF;

/// Reasons a snapshot blob is rejected before any state is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Blob length differs from the fixed format length (including short or
    /// zero-length reads from storage).
    #[error("snapshot length mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// The fixed format length.
        expected: usize,
        /// The length actually presented.
        actual: usize,
    },
    /// The magic tag does not identify this format family; the blob is not
    /// a snapshot at all.
    #[error("unrecognized snapshot magic tag")]
    BadMagic,
    /// The header version differs from the supported version. No migration
    /// is attempted; the blob is rejected wholesale.
    #[error("unsupported snapshot version {found}")]
    UnsupportedVersion {
        /// The version byte found in the header.
        found: u8,
    },
}

/// Serializes the complete live state into a fresh snapshot blob.
///
/// Every packed field has its unused high bits masked to zero; encoding a
/// valid live state always succeeds, and identical states encode to
/// byte-identical blobs.
#[must_use]
pub fn encode<S: StateAccess>(state: &S) -> [u8; SNAPSHOT_LEN] {
    let mut blob = [0_u8; SNAPSHOT_LEN];
    let mut writer = ByteWriter::new(&mut blob);

    writer.write_bytes(&SNAPSHOT_MAGIC);
    writer.write_u8(SNAPSHOT_VERSION, FULL_MASK);

    let regs = state.registers();
    writer.write_u16(regs.pc(), PC_MSB_MASK);
    writer.write_u16(regs.x(), XY_MSB_MASK);
    writer.write_u16(regs.y(), XY_MSB_MASK);
    writer.write_u8(regs.a(), NIBBLE_MASK);
    writer.write_u8(regs.b(), NIBBLE_MASK);
    writer.write_u8(regs.np(), NP_MSB_MASK);
    writer.write_u8(regs.sp(), FULL_MASK);
    writer.write_u8(regs.flags(), NIBBLE_MASK);
    writer.write_u32(regs.tick_counter());
    writer.write_u32(regs.clk_timer_timestamp());
    writer.write_u32(regs.prog_timer_timestamp());
    writer.write_bool(regs.prog_timer_enabled());
    writer.write_u8(regs.prog_timer_data(), FULL_MASK);
    writer.write_u8(regs.prog_timer_rld(), FULL_MASK);
    writer.write_u32(regs.call_depth());

    for slot in state.interrupts() {
        writer.write_u8(slot.factor_flag(), NIBBLE_MASK);
        writer.write_u8(slot.mask(), NIBBLE_MASK);
        writer.write_bool(slot.triggered());
    }

    for offset in 0..MEM_RAM_SIZE {
        writer.write_u8(state.memory_nibble(MEM_RAM_ADDR + offset), NIBBLE_MASK);
    }
    for offset in 0..MEM_IO_SIZE {
        writer.write_u8(state.memory_nibble(MEM_IO_ADDR + offset), NIBBLE_MASK);
    }

    debug_assert_eq!(writer.position(), SNAPSHOT_LEN);
    blob
}

/// Parses a snapshot blob and applies it to the live state.
///
/// The header gates run in order (length, magic tag, version) before any
/// field is assigned, so a rejected blob leaves the live state completely
/// untouched. After a successful application the core is told to refresh
/// its derived hardware state.
///
/// # Errors
///
/// Returns [`DecodeError`] when the blob fails a header gate. Migration
/// between format versions is not implemented; a blob with any other
/// version is rejected wholesale.
pub fn decode<S: StateAccess>(blob: &[u8], state: &mut S) -> Result<(), DecodeError> {
    if blob.len() != SNAPSHOT_LEN {
        return Err(DecodeError::SizeMismatch {
            expected: SNAPSHOT_LEN,
            actual: blob.len(),
        });
    }

    let mut reader = ByteReader::new(blob);
    if reader.read_bytes(SNAPSHOT_MAGIC.len()) != SNAPSHOT_MAGIC {
        return Err(DecodeError::BadMagic);
    }
    let version = reader.read_u8(FULL_MASK);
    if version != SNAPSHOT_VERSION {
        return Err(DecodeError::UnsupportedVersion { found: version });
    }

    let regs = state.registers_mut();
    regs.set_pc(reader.read_u16(PC_MSB_MASK));
    regs.set_x(reader.read_u16(XY_MSB_MASK));
    regs.set_y(reader.read_u16(XY_MSB_MASK));
    regs.set_a(reader.read_u8(NIBBLE_MASK));
    regs.set_b(reader.read_u8(NIBBLE_MASK));
    regs.set_np(reader.read_u8(NP_MSB_MASK));
    regs.set_sp(reader.read_u8(FULL_MASK));
    regs.set_flags(reader.read_u8(NIBBLE_MASK));
    regs.set_tick_counter(reader.read_u32());
    regs.set_clk_timer_timestamp(reader.read_u32());
    regs.set_prog_timer_timestamp(reader.read_u32());
    regs.set_prog_timer_enabled(reader.read_bool());
    regs.set_prog_timer_data(reader.read_u8(FULL_MASK));
    regs.set_prog_timer_rld(reader.read_u8(FULL_MASK));
    regs.set_call_depth(reader.read_u32());

    for slot in state.interrupts_mut() {
        slot.set_factor_flag(reader.read_u8(NIBBLE_MASK));
        slot.set_mask(reader.read_u8(NIBBLE_MASK));
        slot.set_triggered(reader.read_bool());
    }

    for offset in 0..MEM_RAM_SIZE {
        state.set_memory_nibble(MEM_RAM_ADDR + offset, reader.read_u8(NIBBLE_MASK));
    }
    for offset in 0..MEM_IO_SIZE {
        state.set_memory_nibble(MEM_IO_ADDR + offset, reader.read_u8(NIBBLE_MASK));
    }

    debug_assert_eq!(reader.position(), SNAPSHOT_LEN);
    state.refresh_hardware();
    Ok(())
}
