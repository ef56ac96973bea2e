/*!
    driver for the XN02 digital output module

    the module takes its eight output channels as one whole byte behind register `0x01`.
    there is no per-channel update and no read-back: a written frame replaces all eight
    states at once, and channels the caller left untouched in the frame end up off.
*/

use embedded_hal::i2c::I2c;
use packbytes::FromBytes;

use crate::{
    bus::{Node, Error},
    registers::{self, Frame},
    };


/// host end of the XN02 digital output module
pub struct DigitalOutputs<B> {
    node: Node<B>,
}

impl<B: I2c> DigitalOutputs<B> {
    /// driver for a module at the factory address
    pub const fn new(bus: B) -> Self {
        Self::at(bus, registers::xn02::ADDRESS)
    }
    /// driver for a module moved to a non-standard address
    pub const fn at(bus: B, address: u8) -> Self {
        Self {node: Node::new(bus, address)}
    }

    /**
        drive all eight output channels in one bus exchange

        the frame is all-or-nothing: start from [Frame::default] (everything off) and
        force on the channels you need with [Frame::with]. there is no way to leave a
        channel unchanged.
    */
    pub fn write_outputs(&mut self, frame: Frame) -> Result<(), Error<B::Error>> {
        self.node.write(registers::xn02::OUTPUTS, frame)
    }

    /// variant of [Self::write_outputs] taking the already packed byte, channel 1 in bit 0
    pub fn write_raw(&mut self, frame: u8) -> Result<(), Error<B::Error>> {
        self.write_outputs(Frame::from_be_bytes([frame]))
    }

    /// bus address this driver exchanges with
    pub const fn address(&self) -> u8 {self.node.address()}
    /// give the transport back
    pub fn release(self) -> B {self.node.release()}
}
