use crate::cap1188::{Cap1188, REG_MANUFACTURER_ID, REG_PRODUCT_ID, REG_REVISION};
use crate::interface::Interface;
use crate::{Error, Identity, WhoAmI};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

impl<IFACE: Interface, DELAY: DelayNs, RST: OutputPin> WhoAmI<Error<IFACE::Error>, Identity>
    for Cap1188<IFACE, DELAY, RST>
{
    const EXPECTED_WHOAMI: Identity = Identity {
        product_id: 0x50,
        manufacturer_id: 0x5D,
        revision: 0x83,
    };

    fn whoami(&mut self) -> Result<Identity, Error<IFACE::Error>> {
        Ok(Identity {
            product_id: self.read_register(REG_PRODUCT_ID)?,
            manufacturer_id: self.read_register(REG_MANUFACTURER_ID)?,
            revision: self.read_register(REG_REVISION)?,
        })
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod whoami_test {
    extern crate std;
    use std::vec;
    extern crate embedded_hal;
    extern crate embedded_hal_mock;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use crate::fakes::RecordingDelay;
    use crate::{Cap1188, Identity, WhoAmI};

    #[test]
    pub fn whoami() {
        let expectations = [
            I2cTransaction::write_read(0x2B, vec![0xFD], vec![0x50]),
            I2cTransaction::write_read(0x2B, vec![0xFE], vec![0x5D]),
            I2cTransaction::write_read(0x2B, vec![0xFF], vec![0x83]),
        ];
        let i2c = I2cMock::new(&expectations);
        let mut i2c_clone = i2c.clone();

        let mut cap1188 = Cap1188::new_i2c(i2c, 0x2B, RecordingDelay::default()).unwrap();
        assert_eq!(
            cap1188.whoami(),
            Ok(Identity {
                product_id: 0x50,
                manufacturer_id: 0x5D,
                revision: 0x83,
            })
        );

        i2c_clone.done();
    }
}
