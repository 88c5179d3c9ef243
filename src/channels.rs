//! Channel indices and per-channel bitmasks.
//!
//! Channels are numbered `1..=8` to match the `CS1`..`CS8` pin names on the package. Registers
//! holding one bit per channel map `CS1` to bit 0.

/// A validated sensor input index in `1..=8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel(u8);

impl Channel {
    pub const COUNT: u8 = 8;

    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index >= 1 && index <= Self::COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Single-bit mask selecting this channel in per-channel registers.
    #[must_use]
    pub const fn mask(self) -> u8 {
        1 << (self.0 - 1)
    }

    /// Iterates over `CS1` to `CS8` in order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::COUNT).map(Self)
    }
}

/// One bit per channel, as found in the status, enable, linking and polarity registers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channels(u8);

impl Channels {
    pub const NONE: Self = Self(0x00);
    pub const ALL: Self = Self(0xFF);

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    #[must_use]
    pub const fn with(self, channel: Channel) -> Self {
        Self(self.0 | channel.mask())
    }

    #[must_use]
    pub const fn without(self, channel: Channel) -> Self {
        Self(self.0 & !channel.mask())
    }

    /// Number of channels set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub fn iter(self) -> impl Iterator<Item = Channel> {
        Channel::all().filter(move |channel| self.contains(*channel))
    }
}

impl From<Channel> for Channels {
    fn from(channel: Channel) -> Self {
        Self(channel.mask())
    }
}

impl From<Channels> for u8 {
    fn from(channels: Channels) -> Self {
        channels.0
    }
}

impl FromIterator<Channel> for Channels {
    fn from_iter<T: IntoIterator<Item = Channel>>(iter: T) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

#[cfg(all(test, not(all(target_arch = "arm", target_os = "none"))))]
mod test {
    extern crate std;
    use std::vec::Vec;

    use crate::channels::{Channel, Channels};

    #[test]
    pub fn channel_range() {
        assert_eq!(Channel::new(0), None);
        assert_eq!(Channel::new(9), None);
        assert_eq!(Channel::new(1).map(Channel::index), Some(1));
        assert_eq!(Channel::new(8).map(Channel::index), Some(8));
    }

    #[test]
    pub fn channel_mask_shifts_one_based_index() {
        let masks: Vec<u8> = Channel::all().map(Channel::mask).collect();
        assert_eq!(
            masks,
            [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80]
        );
    }

    #[test]
    pub fn iterates_set_channels() {
        let touched: Vec<u8> = Channels::from_bits(0b1000_0101)
            .iter()
            .map(Channel::index)
            .collect();
        assert_eq!(touched, [1, 3, 8]);
        assert_eq!(Channels::NONE.iter().count(), 0);
        assert_eq!(Channels::ALL.len(), 8);
    }

    #[test]
    pub fn with_and_without() {
        let cs2 = Channel::new(2).unwrap();
        let cs7 = Channel::new(7).unwrap();
        let channels = Channels::NONE.with(cs2).with(cs7);
        assert_eq!(channels.bits(), 0b0100_0010);
        assert!(channels.contains(cs7));
        assert_eq!(channels.without(cs7), Channels::from(cs2));
        assert_eq!([cs2, cs7].into_iter().collect::<Channels>(), channels);
        assert!(Channels::NONE.is_empty());
    }
}
