use crate::memory::NIBBLE_MASK;

/// Number of interrupt-controller slots.
pub const INT_SLOT_NUM: usize = 6;

/// Interrupt source identifier, in the fixed slot order used on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum InterruptSource {
    ProgTimer = 0,
    Serial = 1,
    K10 = 2,
    K13 = 3,
    ClockTimer = 4,
    Stopwatch = 5,
}

impl InterruptSource {
    /// Ordered list of all interrupt sources (slot order).
    pub const ALL: [Self; INT_SLOT_NUM] = [
        Self::ProgTimer,
        Self::Serial,
        Self::K10,
        Self::K13,
        Self::ClockTimer,
        Self::Stopwatch,
    ];

    /// Returns the slot index for this source (`0..=5`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One interrupt-controller slot: factor/flag and mask registers plus the
/// triggered latch.
///
/// The factor/flag and mask registers are 4 bits wide; writes are masked so a
/// slot never carries stray high bits into the snapshot codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct InterruptSlot {
    factor_flag: u8,
    mask: u8,
    triggered: bool,
}

impl InterruptSlot {
    /// Reads the 4-bit factor/flag register.
    #[must_use]
    pub const fn factor_flag(&self) -> u8 {
        self.factor_flag
    }

    /// Writes the factor/flag register, masked to 4 bits.
    pub const fn set_factor_flag(&mut self, value: u8) {
        self.factor_flag = value & NIBBLE_MASK;
    }

    /// Reads the 4-bit mask register.
    #[must_use]
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    /// Writes the mask register, masked to 4 bits.
    pub const fn set_mask(&mut self, value: u8) {
        self.mask = value & NIBBLE_MASK;
    }

    /// Returns `true` when this slot's interrupt is pending.
    #[must_use]
    pub const fn triggered(&self) -> bool {
        self.triggered
    }

    /// Sets or clears the triggered latch.
    pub const fn set_triggered(&mut self, triggered: bool) {
        self.triggered = triggered;
    }
}

#[cfg(test)]
mod tests {
    use super::{InterruptSlot, InterruptSource, INT_SLOT_NUM};

    #[test]
    fn source_order_matches_slot_indices() {
        assert_eq!(InterruptSource::ALL.len(), INT_SLOT_NUM);
        for (index, source) in InterruptSource::ALL.iter().enumerate() {
            assert_eq!(source.index(), index);
        }
    }

    #[test]
    fn slot_registers_mask_oversized_writes() {
        let mut slot = InterruptSlot::default();

        slot.set_factor_flag(0xFF);
        slot.set_mask(0xA5);
        slot.set_triggered(true);

        assert_eq!(slot.factor_flag(), 0x0F);
        assert_eq!(slot.mask(), 0x05);
        assert!(slot.triggered());
    }

    #[test]
    fn default_slot_is_inactive() {
        let slot = InterruptSlot::default();
        assert_eq!(slot.factor_flag(), 0);
        assert_eq!(slot.mask(), 0);
        assert!(!slot.triggered());
    }
}
