//! Register transports.
//!
//! The CAP1188 speaks either I2C or SPI depending on how its `ADDR_COMM` pin is strapped at power
//! on. Both carry the same register map, so the driver only ever needs "read one register" and
//! "write one register".  Software (bit-banged) SPI is just another [`SpiDevice`] implementation
//! and needs no special handling here.

use crate::{address_check, OutOfRange};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::{Operation, SpiDevice};

const SPI_SET_ADDRESS_POINTER: u8 = 0x7D;
const SPI_WRITE_DATA: u8 = 0x7E;
const SPI_READ_DATA: u8 = 0x7F;

pub trait Interface {
    type Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error>;
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error>;
}

pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> I2cInterface<I2C> {
    /// # Errors
    ///
    /// [`OutOfRange`]: address is outside of the allowed range `0x28..=0x2D`
    pub fn new(i2c: I2C, address: u8) -> Result<Self, OutOfRange> {
        address_check(address)?;
        Ok(Self { i2c, address })
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Interface for I2cInterface<I2C> {
    type Error = I2C::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut data: [u8; 1] = [0];
        self.i2c.write_read(self.address, &[register], &mut data)?;
        Ok(data[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }
}

/// SPI transport.  Each command is framed by its own chip select assertion, which the
/// [`SpiDevice`] takes care of.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> SpiInterface<SPI> {
    pub fn new(spi: SPI) -> Self {
        Self { spi }
    }

    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiDevice> Interface for SpiInterface<SPI> {
    type Error = SPI::Error;

    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        self.spi.write(&[SPI_SET_ADDRESS_POINTER, register])?;
        let mut data: [u8; 1] = [0];
        self.spi.transaction(&mut [
            Operation::Write(&[SPI_READ_DATA]),
            Operation::Read(&mut data),
        ])?;
        Ok(data[0])
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.spi
            .write(&[SPI_SET_ADDRESS_POINTER, register, SPI_WRITE_DATA, value])?;
        Ok(())
    }
}
