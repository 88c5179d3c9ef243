extern crate std;
use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

/// Records requested delays in milliseconds instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingDelay(Rc<RefCell<Vec<u32>>>);

impl RecordingDelay {
    pub fn millis(&self) -> Vec<u32> {
        self.0.borrow().clone()
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().push(ms);
    }
}

/// Levels driven on a [`RecordingPin`], in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Low,
    High,
}

#[derive(Clone, Default)]
pub struct RecordingPin(Rc<RefCell<Vec<Event>>>);

impl RecordingPin {
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::Low);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.borrow_mut().push(Event::High);
        Ok(())
    }
}

/// A reset line that can never be driven.
pub struct BrokenPin;

#[derive(Debug)]
pub struct BrokenPinError;

impl embedded_hal::digital::Error for BrokenPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl ErrorType for BrokenPin {
    type Error = BrokenPinError;
}

impl OutputPin for BrokenPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Err(BrokenPinError)
    }
}

/// An SPI device whose every transfer fails.
pub struct BrokenSpi;

impl spi::ErrorType for BrokenSpi {
    type Error = spi::ErrorKind;
}

impl SpiDevice for BrokenSpi {
    fn transaction(&mut self, _operations: &mut [Operation<'_, u8>]) -> Result<(), Self::Error> {
        Err(spi::ErrorKind::Other)
    }
}
