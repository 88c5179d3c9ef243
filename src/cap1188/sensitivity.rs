use num_enum::{FromPrimitive, IntoPrimitive};

const BASE_SHIFT_DEFAULT: u8 = 0x08;
const DELTA_SENSE_SHIFT: u8 = 4;
const DELTA_SENSE_MASK: u8 = 0b0111_0000;
const GAIN_SHIFT: u8 = 6;
const GAIN_MASK: u8 = 0b1100_0000;

/// Touch sensitivity, the `DELTA_SENSE` field of the Sensitivity Control register.  Higher
/// multipliers register a touch from a smaller change in capacitance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Sensitivity {
    Multiplier128x = 0,
    Multiplier64x = 1,
    #[default]
    Multiplier32x = 2,
    Multiplier16x = 3,
    Multiplier8x = 4,
    Multiplier4x = 5,
    Multiplier2x = 6,
    Multiplier1x = 7,
}

impl Sensitivity {
    /// Maps level `1` (least sensitive) through `8` (most sensitive).
    #[must_use]
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1..=8 => Some(Self::from(8 - level)),
            _ => None,
        }
    }

    #[must_use]
    pub fn level(self) -> u8 {
        8 - u8::from(self)
    }

    /// Full Sensitivity Control register value, keeping `BASE_SHIFT` at its power-on default.
    #[must_use]
    pub fn register_value(self) -> u8 {
        (u8::from(self) << DELTA_SENSE_SHIFT) | BASE_SHIFT_DEFAULT
    }

    #[must_use]
    pub fn from_register(value: u8) -> Self {
        Self::from((value & DELTA_SENSE_MASK) >> DELTA_SENSE_SHIFT)
    }
}

/// Analog gain, bits 7:6 of the Main Control register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, IntoPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Gain {
    #[default]
    X1 = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
}

impl Gain {
    #[must_use]
    pub fn from_register(value: u8) -> Self {
        Self::from((value & GAIN_MASK) >> GAIN_SHIFT)
    }

    /// Replaces the gain field of a Main Control register value, leaving the other bits alone.
    #[must_use]
    pub fn apply(self, value: u8) -> u8 {
        (value & !GAIN_MASK) | (u8::from(self) << GAIN_SHIFT)
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    extern crate std;
    use std::vec::Vec;

    use crate::cap1188::sensitivity::{Gain, Sensitivity};

    #[test]
    pub fn level_table() {
        let values: Vec<u8> = (1..=8)
            .map(|level| Sensitivity::from_level(level).unwrap().register_value())
            .collect();
        assert_eq!(values, [0x78, 0x68, 0x58, 0x48, 0x38, 0x28, 0x18, 0x08]);
    }

    #[test]
    pub fn level_out_of_range() {
        assert_eq!(Sensitivity::from_level(0), None);
        assert_eq!(Sensitivity::from_level(9), None);
    }

    #[test]
    pub fn level_extremes() {
        assert_eq!(Sensitivity::from_level(1), Some(Sensitivity::Multiplier1x));
        assert_eq!(Sensitivity::from_level(8), Some(Sensitivity::Multiplier128x));
        assert_eq!(Sensitivity::Multiplier16x.level(), 5);
    }

    #[test]
    pub fn decodes_delta_sense_ignoring_base_shift() {
        // power-on default
        assert_eq!(Sensitivity::from_register(0x2F), Sensitivity::Multiplier32x);
        assert_eq!(Sensitivity::from_register(0x70), Sensitivity::Multiplier1x);
        assert_eq!(Sensitivity::from_register(0x80), Sensitivity::Multiplier128x);
        assert_eq!(Sensitivity::default(), Sensitivity::Multiplier32x);
    }

    #[test]
    pub fn gain_field() {
        assert_eq!(Gain::from_register(0b1000_0001), Gain::X4);
        assert_eq!(Gain::X8.apply(0b0010_0001), 0b1110_0001);
        assert_eq!(Gain::X1.apply(0b1110_0001), 0b0010_0001);
    }
}
