//! Emulator state model and the codec-facing access capability.

/// Architectural register file and timer block.
pub mod registers;

/// Interrupt-controller slot model.
pub mod interrupts;

/// Standalone machine-state aggregate implementing [`StateAccess`].
pub mod machine;

pub use interrupts::{InterruptSlot, InterruptSource, INT_SLOT_NUM};
pub use machine::MachineState;
pub use registers::Registers;

/// Borrowed access capability over a live emulator state.
///
/// The snapshot codec does not own the emulator's state; it receives an
/// implementation of this trait for the duration of a single encode or
/// decode call and never retains it. The emulation core exposes its register
/// file, interrupt controller, and nibble-addressed working memory through
/// this surface.
pub trait StateAccess {
    /// Borrows the register file for reading.
    fn registers(&self) -> &Registers;

    /// Borrows the register file for writing.
    fn registers_mut(&mut self) -> &mut Registers;

    /// Borrows the interrupt-controller slots for reading.
    fn interrupts(&self) -> &[InterruptSlot; INT_SLOT_NUM];

    /// Borrows the interrupt-controller slots for writing.
    fn interrupts_mut(&mut self) -> &mut [InterruptSlot; INT_SLOT_NUM];

    /// Reads the 4-bit working-memory cell at `addr`.
    fn memory_nibble(&self, addr: usize) -> u8;

    /// Writes the 4-bit working-memory cell at `addr`.
    fn set_memory_nibble(&mut self, addr: usize, value: u8);

    /// Notifies the core that raw state changed underneath it.
    ///
    /// Invoked exactly once after a snapshot has been fully applied, so the
    /// core can recompute any derived or cached hardware state (for example
    /// latched pin levels) from the restored registers and memory.
    fn refresh_hardware(&mut self);
}
