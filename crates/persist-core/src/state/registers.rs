use crate::memory::NIBBLE_MASK;

/// Value mask for the 13-bit program counter.
pub const PC_MASK: u16 = 0x1FFF;
/// Value mask for the 12-bit index registers `X` and `Y`.
pub const XY_MASK: u16 = 0x0FFF;
/// Value mask for the 5-bit new-page register `NP`.
pub const NP_MASK: u8 = 0x1F;
/// Mask of the architecturally active `FLAGS` bits (`C/Z/D/I`).
pub const FLAGS_MASK: u8 = 0x0F;
/// `FLAGS` bit for carry.
pub const FLAG_C: u8 = 1 << 0;
/// `FLAGS` bit for zero result.
pub const FLAG_Z: u8 = 1 << 1;
/// `FLAGS` bit for decimal mode.
pub const FLAG_D: u8 = 1 << 2;
/// `FLAGS` bit for interrupt enable.
pub const FLAG_I: u8 = 1 << 3;

/// Architectural register file and timer block of the 4-bit core.
///
/// Fields are private so that every write path applies the register's width
/// mask; several registers are narrower than their storage type and must
/// never hold stray high bits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Registers {
    pc: u16,
    x: u16,
    y: u16,
    a: u8,
    b: u8,
    np: u8,
    sp: u8,
    flags: u8,
    tick_counter: u32,
    clk_timer_timestamp: u32,
    prog_timer_timestamp: u32,
    prog_timer_enabled: bool,
    prog_timer_data: u8,
    prog_timer_rld: u8,
    call_depth: u32,
}

impl Registers {
    /// Reads the 13-bit program counter.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        self.pc
    }

    /// Writes the program counter, masked to 13 bits.
    pub const fn set_pc(&mut self, value: u16) {
        self.pc = value & PC_MASK;
    }

    /// Reads the 12-bit `X` index register.
    #[must_use]
    pub const fn x(&self) -> u16 {
        self.x
    }

    /// Writes the `X` index register, masked to 12 bits.
    pub const fn set_x(&mut self, value: u16) {
        self.x = value & XY_MASK;
    }

    /// Reads the 12-bit `Y` index register.
    #[must_use]
    pub const fn y(&self) -> u16 {
        self.y
    }

    /// Writes the `Y` index register, masked to 12 bits.
    pub const fn set_y(&mut self, value: u16) {
        self.y = value & XY_MASK;
    }

    /// Reads the 4-bit accumulator `A`.
    #[must_use]
    pub const fn a(&self) -> u8 {
        self.a
    }

    /// Writes the accumulator `A`, masked to 4 bits.
    pub const fn set_a(&mut self, value: u8) {
        self.a = value & NIBBLE_MASK;
    }

    /// Reads the 4-bit accumulator `B`.
    #[must_use]
    pub const fn b(&self) -> u8 {
        self.b
    }

    /// Writes the accumulator `B`, masked to 4 bits.
    pub const fn set_b(&mut self, value: u8) {
        self.b = value & NIBBLE_MASK;
    }

    /// Reads the 5-bit new-page register `NP`.
    #[must_use]
    pub const fn np(&self) -> u8 {
        self.np
    }

    /// Writes the `NP` register, masked to 5 bits.
    pub const fn set_np(&mut self, value: u8) {
        self.np = value & NP_MASK;
    }

    /// Reads the 8-bit stack pointer.
    #[must_use]
    pub const fn sp(&self) -> u8 {
        self.sp
    }

    /// Writes the stack pointer.
    pub const fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Reads the 4-bit `FLAGS` register.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Writes the `FLAGS` register, masked to the active bits.
    pub const fn set_flags(&mut self, value: u8) {
        self.flags = value & FLAGS_MASK;
    }

    /// Returns `true` when a specific `FLAGS` bit is set.
    #[must_use]
    pub const fn flag_is_set(&self, flag: u8) -> bool {
        (self.flags & flag) != 0
    }

    /// Sets or clears a specific active `FLAGS` bit.
    pub const fn set_flag(&mut self, flag: u8, enabled: bool) {
        if enabled {
            self.flags |= flag & FLAGS_MASK;
        } else {
            self.flags &= !(flag & FLAGS_MASK);
        }
    }

    /// Reads the machine tick counter.
    #[must_use]
    pub const fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Writes the machine tick counter.
    pub const fn set_tick_counter(&mut self, value: u32) {
        self.tick_counter = value;
    }

    /// Reads the clock-timer timestamp.
    #[must_use]
    pub const fn clk_timer_timestamp(&self) -> u32 {
        self.clk_timer_timestamp
    }

    /// Writes the clock-timer timestamp.
    pub const fn set_clk_timer_timestamp(&mut self, value: u32) {
        self.clk_timer_timestamp = value;
    }

    /// Reads the programmable-timer timestamp.
    #[must_use]
    pub const fn prog_timer_timestamp(&self) -> u32 {
        self.prog_timer_timestamp
    }

    /// Writes the programmable-timer timestamp.
    pub const fn set_prog_timer_timestamp(&mut self, value: u32) {
        self.prog_timer_timestamp = value;
    }

    /// Returns `true` when the programmable timer is running.
    #[must_use]
    pub const fn prog_timer_enabled(&self) -> bool {
        self.prog_timer_enabled
    }

    /// Starts or stops the programmable timer.
    pub const fn set_prog_timer_enabled(&mut self, enabled: bool) {
        self.prog_timer_enabled = enabled;
    }

    /// Reads the programmable-timer data (countdown) register.
    #[must_use]
    pub const fn prog_timer_data(&self) -> u8 {
        self.prog_timer_data
    }

    /// Writes the programmable-timer data register.
    pub const fn set_prog_timer_data(&mut self, value: u8) {
        self.prog_timer_data = value;
    }

    /// Reads the programmable-timer reload register.
    #[must_use]
    pub const fn prog_timer_rld(&self) -> u8 {
        self.prog_timer_rld
    }

    /// Writes the programmable-timer reload register.
    pub const fn set_prog_timer_rld(&mut self, value: u8) {
        self.prog_timer_rld = value;
    }

    /// Reads the `CALL` nesting depth counter.
    #[must_use]
    pub const fn call_depth(&self) -> u32 {
        self.call_depth
    }

    /// Writes the `CALL` nesting depth counter.
    pub const fn set_call_depth(&mut self, value: u32) {
        self.call_depth = value;
    }
}

#[cfg(test)]
mod tests {
    use super::{Registers, FLAGS_MASK, FLAG_C, FLAG_D, FLAG_I, FLAG_Z, NP_MASK, PC_MASK, XY_MASK};

    #[test]
    fn narrow_registers_mask_oversized_writes() {
        let mut regs = Registers::default();

        regs.set_pc(0xFFFF);
        assert_eq!(regs.pc(), PC_MASK);

        regs.set_x(0xFFFF);
        regs.set_y(0xFFFF);
        assert_eq!(regs.x(), XY_MASK);
        assert_eq!(regs.y(), XY_MASK);

        regs.set_a(0xFF);
        regs.set_b(0xFF);
        assert_eq!(regs.a(), 0x0F);
        assert_eq!(regs.b(), 0x0F);

        regs.set_np(0xFF);
        assert_eq!(regs.np(), NP_MASK);

        regs.set_flags(0xFF);
        assert_eq!(regs.flags(), FLAGS_MASK);
    }

    #[test]
    fn full_width_registers_store_exact_values() {
        let mut regs = Registers::default();

        regs.set_sp(0xFF);
        assert_eq!(regs.sp(), 0xFF);

        regs.set_tick_counter(u32::MAX);
        regs.set_clk_timer_timestamp(0x0102_0304);
        regs.set_prog_timer_timestamp(0xA0B0_C0D0);
        regs.set_call_depth(0xDEAD_BEEF);

        assert_eq!(regs.tick_counter(), u32::MAX);
        assert_eq!(regs.clk_timer_timestamp(), 0x0102_0304);
        assert_eq!(regs.prog_timer_timestamp(), 0xA0B0_C0D0);
        assert_eq!(regs.call_depth(), 0xDEAD_BEEF);
    }

    #[test]
    fn flag_bits_can_be_set_and_cleared_individually() {
        let mut regs = Registers::default();

        for flag in [FLAG_C, FLAG_Z, FLAG_D, FLAG_I] {
            regs.set_flag(flag, true);
            assert!(regs.flag_is_set(flag));
        }
        assert_eq!(regs.flags(), FLAGS_MASK);

        for flag in [FLAG_C, FLAG_Z, FLAG_D, FLAG_I] {
            regs.set_flag(flag, false);
            assert!(!regs.flag_is_set(flag));
        }
        assert_eq!(regs.flags(), 0);
    }

    #[test]
    fn power_on_defaults_are_zeroed() {
        let regs = Registers::default();
        assert_eq!(regs.pc(), 0);
        assert_eq!(regs.flags(), 0);
        assert_eq!(regs.tick_counter(), 0);
        assert!(!regs.prog_timer_enabled());
    }
}
