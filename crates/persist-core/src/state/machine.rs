use crate::memory::NibbleMemory;

use super::{InterruptSlot, Registers, StateAccess, INT_SLOT_NUM};

/// Complete machine state aggregate: registers, interrupt controller, and
/// working memory.
///
/// This is the host-side model of everything the snapshot format persists.
/// An embedding emulation core can use it directly or implement
/// [`StateAccess`] over its own internal representation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MachineState {
    /// Architectural register file and timer block.
    pub registers: Registers,
    /// Interrupt-controller slots in fixed source order.
    pub interrupts: [InterruptSlot; INT_SLOT_NUM],
    /// Nibble-addressed working memory.
    pub memory: NibbleMemory,
}

impl MachineState {
    /// Creates a machine in its power-on state: zeroed registers, inactive
    /// interrupt slots, and cleared memory.
    #[must_use]
    pub fn power_on() -> Self {
        Self::default()
    }
}

impl StateAccess for MachineState {
    fn registers(&self) -> &Registers {
        &self.registers
    }

    fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    fn interrupts(&self) -> &[InterruptSlot; INT_SLOT_NUM] {
        &self.interrupts
    }

    fn interrupts_mut(&mut self) -> &mut [InterruptSlot; INT_SLOT_NUM] {
        &mut self.interrupts
    }

    fn memory_nibble(&self, addr: usize) -> u8 {
        self.memory.get(addr)
    }

    fn set_memory_nibble(&mut self, addr: usize, value: u8) {
        self.memory.set(addr, value);
    }

    fn refresh_hardware(&mut self) {
        // The standalone aggregate keeps no derived hardware state; cores
        // embedding their own representation recompute pin levels here.
    }
}
