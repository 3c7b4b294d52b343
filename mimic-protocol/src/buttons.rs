//! Button state bytes
//!
//! Two 8-bit flag registers travel in every packet. The codec only packs
//! and unpacks them; which bit means what is agreed between the command
//! source and the replica.

/// Highest valid bit index within a button byte
pub const MAX_BIT_INDEX: u8 = 7;

/// Errors from button bit manipulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonError {
    /// Bit index outside 0-7
    BitIndexOutOfRange(u8),
}

impl core::fmt::Display for ButtonError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ButtonError::BitIndexOutOfRange(index) => {
                write!(f, "button bit index {} is outside 0-{}", index, MAX_BIT_INDEX)
            }
        }
    }
}

/// Set or clear a single bit of a button byte
///
/// Only the addressed bit changes. Indices above 7 are rejected instead of
/// wrapping into a neighbouring bit.
pub fn set_button_bit(current: u8, index: u8, pressed: bool) -> Result<u8, ButtonError> {
    if index > MAX_BIT_INDEX {
        return Err(ButtonError::BitIndexOutOfRange(index));
    }

    let mask = 1u8 << index;
    if pressed {
        Ok(current | mask)
    } else {
        Ok(current & !mask)
    }
}

/// Check whether a bit of a button byte is set
pub fn is_button_bit_set(current: u8, index: u8) -> Result<bool, ButtonError> {
    if index > MAX_BIT_INDEX {
        return Err(ButtonError::BitIndexOutOfRange(index));
    }
    Ok(current & (1u8 << index) != 0)
}

/// Which of the two button bytes to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonByte {
    /// Packet button byte 0
    First,
    /// Packet button byte 1
    Second,
}

/// Both button bytes of a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    pub byte0: u8,
    pub byte1: u8,
}

impl ButtonState {
    /// Create a button state from raw bytes
    pub const fn new(byte0: u8, byte1: u8) -> Self {
        Self { byte0, byte1 }
    }

    /// No buttons pressed
    pub const fn released() -> Self {
        Self { byte0: 0, byte1: 0 }
    }

    fn byte_mut(&mut self, byte: ButtonByte) -> &mut u8 {
        match byte {
            ButtonByte::First => &mut self.byte0,
            ButtonByte::Second => &mut self.byte1,
        }
    }

    fn byte(&self, byte: ButtonByte) -> u8 {
        match byte {
            ButtonByte::First => self.byte0,
            ButtonByte::Second => self.byte1,
        }
    }

    /// Set or clear one bit in the addressed byte
    pub fn set(&mut self, byte: ButtonByte, index: u8, pressed: bool) -> Result<(), ButtonError> {
        let slot = self.byte_mut(byte);
        *slot = set_button_bit(*slot, index, pressed)?;
        Ok(())
    }

    /// Builder form of [`ButtonState::set`]
    pub fn with(mut self, byte: ButtonByte, index: u8, pressed: bool) -> Result<Self, ButtonError> {
        self.set(byte, index, pressed)?;
        Ok(self)
    }

    /// Check one bit in the addressed byte
    pub fn is_set(&self, byte: ButtonByte, index: u8) -> Result<bool, ButtonError> {
        is_button_bit_set(self.byte(byte), index)
    }

    /// Number of pressed buttons across both bytes
    pub fn pressed_count(&self) -> u32 {
        self.byte0.count_ones() + self.byte1.count_ones()
    }

    /// Wire representation
    pub fn to_bytes(self) -> [u8; 2] {
        [self.byte0, self.byte1]
    }

    /// Parse from wire representation
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            byte0: bytes[0],
            byte1: bytes[1],
        }
    }
}
