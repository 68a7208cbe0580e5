//! Nibble-addressable working-memory model.
//!
//! The 4-bit core addresses memory in 4-bit cells. The host keeps the full
//! cell space in a packed byte buffer (two cells per byte); the snapshot
//! codec only persists the RAM and I/O windows defined here.

/// Number of addressable 4-bit cells in the working-memory space.
pub const MEM_SIZE: usize = 0x1000;
/// First cell address of the persisted RAM window.
pub const MEM_RAM_ADDR: usize = 0x000;
/// Number of cells in the persisted RAM window.
pub const MEM_RAM_SIZE: usize = 640;
/// First cell address of the persisted I/O window.
pub const MEM_IO_ADDR: usize = 0xF00;
/// Number of cells in the persisted I/O window.
pub const MEM_IO_SIZE: usize = 128;

/// Value mask for a single 4-bit cell.
pub const NIBBLE_MASK: u8 = 0x0F;

/// Packed nibble-cell backing store for the working-memory space.
///
/// Cells are packed two per byte with the even address in the low nibble.
/// Reads and writes are always masked to the low 4 bits, so a cell can never
/// hold an out-of-range value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct NibbleMemory {
    cells: Box<[u8]>,
}

impl Default for NibbleMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl NibbleMemory {
    /// Allocates a zeroed cell space covering all `MEM_SIZE` addresses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![0; MEM_SIZE / 2].into_boxed_slice(),
        }
    }

    /// Reads the 4-bit cell at `addr`.
    #[must_use]
    pub fn get(&self, addr: usize) -> u8 {
        let byte = self.cells[addr >> 1];
        if addr & 1 == 0 {
            byte & NIBBLE_MASK
        } else {
            byte >> 4
        }
    }

    /// Writes the 4-bit cell at `addr`, masking `value` to the low nibble.
    pub fn set(&mut self, addr: usize, value: u8) {
        let slot = &mut self.cells[addr >> 1];
        let value = value & NIBBLE_MASK;
        if addr & 1 == 0 {
            *slot = (*slot & 0xF0) | value;
        } else {
            *slot = (*slot & NIBBLE_MASK) | (value << 4);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        NibbleMemory, MEM_IO_ADDR, MEM_IO_SIZE, MEM_RAM_ADDR, MEM_RAM_SIZE, MEM_SIZE, NIBBLE_MASK,
    };

    #[test]
    fn persisted_windows_fit_inside_the_cell_space() {
        assert!(MEM_RAM_ADDR + MEM_RAM_SIZE <= MEM_SIZE);
        assert!(MEM_IO_ADDR + MEM_IO_SIZE <= MEM_SIZE);
        assert!(MEM_RAM_ADDR + MEM_RAM_SIZE <= MEM_IO_ADDR);
    }

    #[test]
    fn new_memory_is_fully_zeroed() {
        let memory = NibbleMemory::new();
        for addr in 0..MEM_SIZE {
            assert_eq!(memory.get(addr), 0);
        }
    }

    #[test]
    fn adjacent_cells_are_independent() {
        let mut memory = NibbleMemory::new();
        memory.set(0x010, 0xA);
        memory.set(0x011, 0x5);

        assert_eq!(memory.get(0x010), 0xA);
        assert_eq!(memory.get(0x011), 0x5);

        memory.set(0x010, 0x3);
        assert_eq!(memory.get(0x010), 0x3);
        assert_eq!(memory.get(0x011), 0x5);
    }

    #[test]
    fn writes_are_masked_to_the_low_nibble() {
        let mut memory = NibbleMemory::new();
        memory.set(0xF00, 0xFF);
        assert_eq!(memory.get(0xF00), NIBBLE_MASK);

        memory.set(0xF01, 0xA7);
        assert_eq!(memory.get(0xF01), 0x7);
    }

    #[test]
    fn last_address_is_reachable() {
        let mut memory = NibbleMemory::new();
        memory.set(MEM_SIZE - 1, 0xC);
        assert_eq!(memory.get(MEM_SIZE - 1), 0xC);
    }
}
