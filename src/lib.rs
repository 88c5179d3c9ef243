#![no_std]
#![doc = include_str!("../README.md")]

/// Errors returned by [`cap1188::Cap1188`] operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The underlying I2C or SPI transport failed.
    BusError(E),
    /// The reset line could not be driven.
    ResetPinError,
    /// A channel index or sensitivity level was outside its valid range.
    ArgumentError,
    /// The identity registers did not match a CAP1188.
    UnexpectedDevice(Identity),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::BusError(error)
    }
}

/// Contents of the product ID, manufacturer ID and revision registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    pub product_id: u8,
    pub manufacturer_id: u8,
    pub revision: u8,
}

pub trait WhoAmI<E, T: core::cmp::Eq> {
    const EXPECTED_WHOAMI: T;

    fn whoami(&mut self) -> Result<T, E>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRange;

/// The CAP1188 answers on `0x28..=0x2D` depending on how its `ADDR_COMM` pin is strapped.
///
/// # Errors
///
/// [`OutOfRange`]: address is outside of the allowed range `0x28..=0x2D`
pub fn address_check(address: u8) -> Result<(), OutOfRange> {
    if (0x28..=0x2D).contains(&address) {
        Ok(())
    } else {
        Err(OutOfRange)
    }
}

pub mod cap1188;
pub mod channels;
pub mod interface;

pub use cap1188::{Cap1188, NoResetPin};
pub use channels::{Channel, Channels};

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod fakes;

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    use crate::{address_check, OutOfRange};

    #[test]
    pub fn address_check_accepts_strap_range() {
        for address in 0x28..=0x2D {
            assert_eq!(address_check(address), Ok(()));
        }
    }

    #[test]
    pub fn address_check_rejects_outside_strap_range() {
        assert_eq!(address_check(0x27), Err(OutOfRange));
        assert_eq!(address_check(0x2E), Err(OutOfRange));
        assert_eq!(address_check(0x00), Err(OutOfRange));
    }
}
