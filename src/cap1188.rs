//! # Driver for Microchip CAP1188 8-Channel Capacitive Touch Sensor
//!
//! ## External Links
//!
//! - [Product Site]
//! - [Datasheet]
//! - [Breakout Board]
//!
//! [Product Site]: https://www.microchip.com/en-us/product/CAP1188
//! [Datasheet]: https://ww1.microchip.com/downloads/en/DeviceDoc/CAP1188%20.pdf
//! [Breakout Board]: https://www.adafruit.com/product/1602

use crate::channels::{Channel, Channels};
use crate::interface::{I2cInterface, Interface, SpiInterface};
use crate::{Error, OutOfRange, WhoAmI};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;
use fugit::MillisDurationU32;

pub mod sensitivity;
mod whoami;

pub use sensitivity::{Gain, Sensitivity};

pub const DEFAULT_ADDRESS: u8 = 0x29;
/// Address selected by tying the breakout's `AD` pin to 3V.
pub const ALTERNATE_ADDRESS: u8 = 0x28;

const REG_MAIN_CONTROL: u8 = 0x00;
const REG_SENSOR_INPUT_STATUS: u8 = 0x03;
const REG_SENSOR_INPUT_DELTA_COUNT: u8 = 0x10;
const REG_SENSITIVITY_CONTROL: u8 = 0x1F;
const REG_CONFIGURATION: u8 = 0x20;
const REG_SENSOR_INPUT_ENABLE: u8 = 0x21;
const REG_SENSOR_INPUT_CONFIG: u8 = 0x22;
const REG_SENSOR_INPUT_CONFIG_2: u8 = 0x23;
const REG_AVERAGING_AND_SAMPLING: u8 = 0x24;
const REG_CALIBRATION_ACTIVATE: u8 = 0x26;
const REG_REPEAT_RATE_ENABLE: u8 = 0x28;
const REG_MULTIPLE_TOUCH_CONFIG: u8 = 0x2A;
const REG_SENSOR_INPUT_THRESHOLD: u8 = 0x30;
const REG_STANDBY_CHANNEL: u8 = 0x40;
const REG_STANDBY_CONFIG: u8 = 0x41;
const REG_STANDBY_SENSITIVITY: u8 = 0x42;
const REG_CONFIGURATION_2: u8 = 0x44;
const REG_SENSOR_INPUT_LED_LINKING: u8 = 0x72;
const REG_LED_POLARITY: u8 = 0x73;
pub(crate) const REG_PRODUCT_ID: u8 = 0xFD;
pub(crate) const REG_MANUFACTURER_ID: u8 = 0xFE;
pub(crate) const REG_REVISION: u8 = 0xFF;

const MAIN_CONTROL_INT: u8 = 0b0000_0001;

const RESET_PULSE: MillisDurationU32 = MillisDurationU32::from_ticks(100);
// datasheet pg 54
const CALIBRATION_TIME: MillisDurationU32 = MillisDurationU32::from_ticks(600);

/// Placeholder for a driver with no reset line wired up.
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct Cap1188<IFACE, DELAY, RST = NoResetPin> {
    interface: IFACE,
    delay: DELAY,
    reset: Option<RST>,
}

impl<I2C: I2c, DELAY: DelayNs> Cap1188<I2cInterface<I2C>, DELAY> {
    /// The entry point for a CAP1188 strapped for I2C.  Expects [`I2c`] (obtainable from target
    /// platform HAL), an I2C device address in the range `0x28..=0x2D` and a [`DelayNs`] (also
    /// usually obtainable from the target platform HAL).  This provides a handle that does not
    /// initialize the hardware.  Initialization is deferred to [`Cap1188::init`].
    ///
    /// # Errors
    ///
    /// [`OutOfRange`]: address is outside of the allowed range `0x28..=0x2D`
    pub fn new_i2c(i2c: I2C, address: u8, delay: DELAY) -> Result<Self, OutOfRange> {
        Ok(Self::new(I2cInterface::new(i2c, address)?, delay))
    }
}

impl<SPI: SpiDevice, DELAY: DelayNs> Cap1188<SpiInterface<SPI>, DELAY> {
    /// The entry point for a CAP1188 strapped for SPI.  Hardware and bit-banged buses work alike
    /// as long as they implement [`SpiDevice`] and drive chip select.
    pub fn new_spi(spi: SPI, delay: DELAY) -> Self {
        Self::new(SpiInterface::new(spi), delay)
    }
}

impl<IFACE: Interface, DELAY: DelayNs> Cap1188<IFACE, DELAY> {
    pub fn new(interface: IFACE, delay: DELAY) -> Self {
        Self {
            interface,
            delay,
            reset: None,
        }
    }

    /// Attaches the line wired to the chip's `RESET` pin.  [`Cap1188::init`] pulses it before
    /// talking to the chip.
    pub fn with_reset_pin<RST: OutputPin>(self, reset: RST) -> Cap1188<IFACE, DELAY, RST> {
        Cap1188 {
            interface: self.interface,
            delay: self.delay,
            reset: Some(reset),
        }
    }
}

impl<IFACE: Interface, DELAY: DelayNs, RST: OutputPin> Cap1188<IFACE, DELAY, RST> {
    /// Resets the chip (when a reset line is attached), checks that it identifies as a CAP1188,
    /// then allows multiple simultaneous touches and links each LED to its channel.
    ///
    /// The product ID is read once and discarded to wake the bus, then all three identity
    /// registers (0xFD, 0xFE, 0xFF) are read before comparing, so a mismatch reports the full
    /// [`Identity`](crate::Identity).
    ///
    /// # Errors
    ///
    /// - [`Error::ResetPinError`]: the reset line could not be driven
    /// - [`Error::UnexpectedDevice`]: the identity registers do not match a CAP1188
    /// - [`Error::BusError`]: transport failure
    pub fn init(mut self) -> Result<Self, Error<IFACE::Error>> {
        self.reset()?;

        // first access after reset
        self.read_register(REG_PRODUCT_ID)?;

        let identity = self.whoami()?;
        #[cfg(feature = "defmt")]
        defmt::debug!("cap1188 identity {}", identity);
        if identity != Self::EXPECTED_WHOAMI {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "unexpected device: {}, expected {}",
                identity,
                Self::EXPECTED_WHOAMI
            );
            return Err(Error::UnexpectedDevice(identity));
        }

        self.set_multiple_touch_config(0)?;
        self.set_led_linking(Channels::ALL)?;
        Ok(self)
    }

    fn reset(&mut self) -> Result<(), Error<IFACE::Error>> {
        let Some(reset) = self.reset.as_mut() else {
            return Ok(());
        };
        let pulse = RESET_PULSE.to_millis();
        reset.set_low().map_err(|_| Error::ResetPinError)?;
        self.delay.delay_ms(pulse);
        reset.set_high().map_err(|_| Error::ResetPinError)?;
        self.delay.delay_ms(pulse);
        reset.set_low().map_err(|_| Error::ResetPinError)?;
        self.delay.delay_ms(pulse);
        Ok(())
    }

    pub fn release(self) -> (IFACE, DELAY, Option<RST>) {
        (self.interface, self.delay, self.reset)
    }

    pub fn read_register(&mut self, register: u8) -> Result<u8, Error<IFACE::Error>> {
        Ok(self.interface.read_register(register)?)
    }

    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), Error<IFACE::Error>> {
        self.interface.write_register(register, value)?;
        Ok(())
    }

    /// Channels currently reporting a touch.  Reading a touch leaves the interrupt flag set, and
    /// the status register will not update again until it is cleared, so a non-empty result also
    /// clears it.
    pub fn touched(&mut self) -> Result<Channels, Error<IFACE::Error>> {
        let status = self.read_register(REG_SENSOR_INPUT_STATUS)?;
        if status != 0 {
            self.clear_interrupt()?;
        }
        Ok(Channels::from_bits(status))
    }

    /// Signed difference between a channel's measurement and its baseline.  Clears the interrupt
    /// flag when non-zero, as [`Cap1188::touched`] does.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentError`]: channel is outside of `1..=8`
    pub fn delta_count(&mut self, channel: u8) -> Result<i8, Error<IFACE::Error>> {
        let channel = Channel::new(channel).ok_or(Error::ArgumentError)?;
        let raw = self.read_register(REG_SENSOR_INPUT_DELTA_COUNT + channel.index() - 1)?;
        if raw != 0 {
            self.clear_interrupt()?;
        }
        Ok(i8::from_ne_bytes([raw]))
    }

    pub fn clear_interrupt(&mut self) -> Result<(), Error<IFACE::Error>> {
        let main_control = self.read_register(REG_MAIN_CONTROL)?;
        self.write_register(REG_MAIN_CONTROL, main_control & !MAIN_CONTROL_INT)
    }

    /// Writes the whole Main Control register: gain, standby, deep sleep and the interrupt flag.
    pub fn set_main_control(&mut self, value: u8) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_MAIN_CONTROL, value)
    }

    pub fn gain(&mut self) -> Result<Gain, Error<IFACE::Error>> {
        Ok(Gain::from_register(self.read_register(REG_MAIN_CONTROL)?))
    }

    pub fn set_gain(&mut self, gain: Gain) -> Result<(), Error<IFACE::Error>> {
        let main_control = self.read_register(REG_MAIN_CONTROL)?;
        self.write_register(REG_MAIN_CONTROL, gain.apply(main_control))
    }

    /// Writes Configuration (20h) then Configuration 2 (44h).
    pub fn set_general_config(
        &mut self,
        config: u8,
        config_2: u8,
    ) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_CONFIGURATION, config)?;
        self.write_register(REG_CONFIGURATION_2, config_2)
    }

    /// Writes Sensor Input Configuration (`MAX_DUR`, `RPT_RATE`) then Sensor Input Configuration 2
    /// (`M_PRESS`).
    pub fn set_input_config(
        &mut self,
        config: u8,
        config_2: u8,
    ) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_SENSOR_INPUT_CONFIG, config)?;
        self.write_register(REG_SENSOR_INPUT_CONFIG_2, config_2)
    }

    pub fn set_averaging_and_sampling(&mut self, value: u8) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_AVERAGING_AND_SAMPLING, value)
    }

    /// Channels sampled in the active state.
    pub fn set_input_enable(&mut self, channels: Channels) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_SENSOR_INPUT_ENABLE, channels.bits())
    }

    /// Touch threshold of channel 1.  See [`Cap1188::set_channel_threshold`] for the others.
    pub fn set_input_threshold(&mut self, threshold: u8) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_SENSOR_INPUT_THRESHOLD, threshold)
    }

    /// # Errors
    ///
    /// [`Error::ArgumentError`]: channel is outside of `1..=8`
    pub fn set_channel_threshold(
        &mut self,
        channel: u8,
        threshold: u8,
    ) -> Result<(), Error<IFACE::Error>> {
        let channel = Channel::new(channel).ok_or(Error::ArgumentError)?;
        self.write_register(
            REG_SENSOR_INPUT_THRESHOLD + channel.index() - 1,
            threshold,
        )
    }

    /// Channels sampled in the standby state.
    pub fn set_standby_active(&mut self, channels: Channels) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_STANDBY_CHANNEL, channels.bits())
    }

    /// Standby averaging, sample time and cycle time.  The power-on value is `0x30`.
    pub fn set_standby_config(&mut self, value: u8) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_STANDBY_CONFIG, value)
    }

    pub fn set_standby_sensitivity(&mut self, value: u8) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_STANDBY_SENSITIVITY, value)
    }

    pub fn sensitivity(&mut self) -> Result<Sensitivity, Error<IFACE::Error>> {
        Ok(Sensitivity::from_register(
            self.read_register(REG_SENSITIVITY_CONTROL)?,
        ))
    }

    pub fn set_sensitivity(&mut self, sensitivity: Sensitivity) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_SENSITIVITY_CONTROL, sensitivity.register_value())
    }

    /// Level `1` is the least sensitive and `8` the most.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentError`]: level is outside of `1..=8`
    pub fn set_sensitivity_level(&mut self, level: u8) -> Result<(), Error<IFACE::Error>> {
        let sensitivity = Sensitivity::from_level(level).ok_or(Error::ArgumentError)?;
        self.set_sensitivity(sensitivity)
    }

    pub fn set_repeat_enable(&mut self, channels: Channels) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_REPEAT_RATE_ENABLE, channels.bits())
    }

    /// `0` lets any number of channels report a touch at once.
    pub fn set_multiple_touch_config(&mut self, value: u8) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_MULTIPLE_TOUCH_CONFIG, value)
    }

    /// Channels whose LED follows the touch state.
    pub fn set_led_linking(&mut self, channels: Channels) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_SENSOR_INPUT_LED_LINKING, channels.bits())
    }

    /// Channels whose LED output is inverted.
    pub fn set_led_polarity(&mut self, channels: Channels) -> Result<(), Error<IFACE::Error>> {
        self.write_register(REG_LED_POLARITY, channels.bits())
    }

    /// Forces a baseline recalibration of one channel and waits for it to finish.
    ///
    /// # Errors
    ///
    /// [`Error::ArgumentError`]: channel is outside of `1..=8`
    pub fn recalibrate(&mut self, channel: u8) -> Result<(), Error<IFACE::Error>> {
        let channel = Channel::new(channel).ok_or(Error::ArgumentError)?;
        self.write_register(REG_CALIBRATION_ACTIVATE, channel.mask())?;
        self.delay.delay_ms(CALIBRATION_TIME.to_millis());
        Ok(())
    }

    /// Recalibrates every channel in turn, waiting out each one.
    pub fn recalibrate_all(&mut self) -> Result<(), Error<IFACE::Error>> {
        for channel in Channel::all() {
            self.recalibrate(channel.index())?;
        }
        Ok(())
    }
}
