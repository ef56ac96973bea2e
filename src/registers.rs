/*!
    registers and wire value types of the XN module family

    every module kind is described by a fixed bus address and a namespace of constants of
    type [Register] giving its register indices their payload types. register indices are
    module-local: the same numeric index means different things on different module kinds,
    so a constant from one namespace must never be used against another module.
*/

use core::marker::PhantomData;
use packbytes::{FromBytes, ToBytes, ByteArray};
use bilge::prelude::*;

use crate::bus::InvalidChannel;
use crate::{pack_bits, pack_enum};


/**
    a register is a typed pointer into one module's register space

    it only holds the one-byte register index and the payload type expected behind it,
    hence can be created, copied or destroyed at no cost
*/
#[derive(PartialEq, Hash)]
pub struct Register<T> {
    index: u8,
    ty: PhantomData<T>,
}
impl<T> Register<T> {
    /// create a register from its index
    pub const fn new(index: u8) -> Self {
        Self{index, ty: PhantomData}
    }
    /// register index on the wire
    pub const fn address(&self) -> u8 {self.index}
}
impl<T: FromBytes> Register<T> {
    /// payload width in bytes
    pub const fn size(&self) -> usize {T::Bytes::SIZE}
}
impl<T> Clone for Register<T> {
    fn clone(&self) -> Self {
        Self::new(self.address())
    }
}
impl<T> Copy for Register<T> {}


/// fixed bus address of each module kind
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Addresses {
    pub inputs: u8,
    pub outputs: u8,
    pub sensors: u8,
    pub relays: u8,
}
impl Addresses {
    /// the factory address table, every module kind ships hard-wired to its entry
    pub const DEFAULT: Self = Self {
        inputs: 1,
        outputs: 2,
        sensors: 4,
        relays: 11,
        };
}

/// registers of the XN01 digital input module
pub mod xn01 {
    use super::*;
    /// factory bus address
    pub const ADDRESS: u8 = Addresses::DEFAULT.inputs;
    /// snapshot of the eight input channels, read-only
    pub const INPUTS: Register<Frame> = Register::new(0x01);
}
/// registers of the XN02 digital output module
pub mod xn02 {
    use super::*;
    /// factory bus address
    pub const ADDRESS: u8 = Addresses::DEFAULT.outputs;
    /// the eight output channels, written as one whole frame
    pub const OUTPUTS: Register<Frame> = Register::new(0x01);
}
/// registers of the XN04 environmental sensor module
pub mod xn04 {
    use super::*;
    /// factory bus address
    pub const ADDRESS: u8 = Addresses::DEFAULT.sensors;
    /// ambient temperature in hundredths of a degree
    pub const TEMPERATURE: Register<Centi> = Register::new(0x01);
    /// relative humidity in hundredths of a percent
    pub const HUMIDITY: Register<Centi> = Register::new(0x02);
    /// luminosity as a raw sensor count
    pub const LUMINOSITY: Register<u16> = Register::new(0x03);
}
/// registers of the XN11 relay module
pub mod xn11 {
    use super::*;
    /// factory bus address
    pub const ADDRESS: u8 = Addresses::DEFAULT.relays;
    /// first relay coil
    pub const RELAY1: Register<Switch> = Register::new(0x01);
    /// second relay coil
    pub const RELAY2: Register<Switch> = Register::new(0x02);
}


/**
    1-based channel number inside a digital [Frame]

    channel 1 occupies the least significant bit of the frame byte, channel 8 the most
    significant. construction is the only validation point: a [Channel] in hand is always
    in range, so no later stage needs a sentinel value
*/
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Channel(u8);
impl Channel {
    /// smallest valid channel number
    pub const FIRST: Self = Self(1);
    /// biggest valid channel number
    pub const LAST: Self = Self(8);

    /// validate a channel number, out of [1, 8] fails before anything touches the bus
    pub const fn new(number: u8) -> Result<Self, InvalidChannel> {
        if number >= Self::FIRST.0 && number <= Self::LAST.0
            {Ok(Self(number))}
        else
            {Err(InvalidChannel(number))}
    }
    /// the 1-based channel number
    pub const fn number(self) -> u8 {self.0}
    /// single-bit mask of this channel inside a frame byte
    pub const fn mask(self) -> u8 {1 << (self.0 - 1)}
}

/// one-byte frame packing the eight digital channels, channel 1 in bit 0
#[bitsize(8)]
#[derive(Copy, Clone, Default, FromBits, DebugBits, PartialEq)]
pub struct Frame {
    pub channel1: bool,
    pub channel2: bool,
    pub channel3: bool,
    pub channel4: bool,
    pub channel5: bool,
    pub channel6: bool,
    pub channel7: bool,
    pub channel8: bool,
}
pack_bits!(Frame);

impl Frame {
    /// state of one channel
    pub fn channel(self, channel: Channel) -> bool {
        self.value.value() & channel.mask() != 0
    }
    /// this frame with one channel forced to the given state
    pub fn with(self, channel: Channel, state: bool) -> Self {
        let raw = self.value.value();
        Self::from_be_bytes([if state {raw | channel.mask()} else {raw & !channel.mask()}])
    }
}

/// relay coil command byte
#[bitsize(8)]
#[derive(Copy, Clone, Default, FromBits, Debug, PartialEq)]
pub enum Switch {
    #[default]
    Off = 0x00,
    On = 0x01,
    #[fallback]
    Unknown = 0xff,
}
pack_enum!(Switch);

impl From<bool> for Switch {
    fn from(state: bool) -> Self {
        if state {Self::On} else {Self::Off}
    }
}

/**
    fixed point value with two implied decimal digits

    transmitted as a big-endian unsigned integer counting hundredths, so 2513 on the wire
    reads back as 25.13
*/
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Centi(pub u16);
impl Centi {
    /// the decoded decimal value
    pub fn as_float(self) -> f32 {
        f32::from(self.0) / 100.
    }
    /// the wire integer, in hundredths
    pub const fn raw(self) -> u16 {self.0}
}
impl ToBytes for Centi {
    type Bytes = [u8; 2];

    fn to_le_bytes(self) -> Self::Bytes {self.0.to_le_bytes()}
    fn to_be_bytes(self) -> Self::Bytes {self.0.to_be_bytes()}
}
impl FromBytes for Centi {
    type Bytes = [u8; 2];

    fn from_le_bytes(bytes: Self::Bytes) -> Self {Self(u16::from_le_bytes(bytes))}
    fn from_be_bytes(bytes: Self::Bytes) -> Self {Self(u16::from_be_bytes(bytes))}
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_bounds() {
        assert!(Channel::new(0).is_err());
        for number in 1 ..= 8 {
            assert_eq!(Channel::new(number).unwrap().number(), number);
        }
        assert_eq!(Channel::new(9), Err(InvalidChannel(9)));
        assert_eq!(Channel::new(255), Err(InvalidChannel(255)));
    }

    #[test]
    fn channel_bit_mapping() {
        // channel k is bit k-1, for any byte
        for raw in [0x00u8, 0x01, 0x55, 0xaa, 0xc3, 0xff] {
            let frame = Frame::from_be_bytes([raw]);
            for number in 1 ..= 8 {
                let channel = Channel::new(number).unwrap();
                assert_eq!(frame.channel(channel), (raw >> (number - 1)) & 0x01 != 0);
            }
        }
    }

    #[test]
    fn frame_round_trip() {
        // a frame built channel by channel reads back the same states
        let states = [true, false, false, true, true, false, true, false];
        let mut frame = Frame::default();
        for (index, &state) in states.iter().enumerate() {
            frame = frame.with(Channel::new(index as u8 + 1).unwrap(), state);
        }
        for (index, &state) in states.iter().enumerate() {
            assert_eq!(frame.channel(Channel::new(index as u8 + 1).unwrap()), state);
        }
        assert_eq!(frame.to_be_bytes(), [0b0101_1001]);
    }

    #[test]
    fn frame_default_is_all_off() {
        assert_eq!(Frame::default().to_be_bytes(), [0x00]);
        for number in 1 ..= 8 {
            assert!(!Frame::default().channel(Channel::new(number).unwrap()));
        }
    }

    #[test]
    fn centi_decoding() {
        assert_eq!(Centi::from_be_bytes([0x09, 0xc4]).as_float(), 25.);
        assert_eq!(Centi::from_be_bytes([0x03, 0xe8]).as_float(), 10.);
        assert_eq!(Centi::from_be_bytes([0x00, 0x00]).as_float(), 0.);
        assert_eq!(Centi::from_be_bytes([0x09, 0xd1]).raw(), 2513);
    }

    #[test]
    fn switch_encoding() {
        assert_eq!(Switch::from(true).to_be_bytes(), [0x01]);
        assert_eq!(Switch::from(false).to_be_bytes(), [0x00]);
        assert_eq!(Switch::from_be_bytes([0x01]), Switch::On);
        assert_eq!(Switch::from_be_bytes([0x07]), Switch::Unknown);
    }
}
