/*!
    driver for the XN01 digital input module

    the module exposes its eight opto-isolated inputs as one byte behind register `0x01`,
    channel 1 in the least significant bit.
*/

use embedded_hal::i2c::I2c;

use crate::{
    bus::{Node, Error},
    registers::{self, Channel, Frame},
    };


/// host end of the XN01 digital input module
pub struct DigitalInputs<B> {
    node: Node<B>,
}

impl<B: I2c> DigitalInputs<B> {
    /// driver for a module at the factory address
    pub const fn new(bus: B) -> Self {
        Self::at(bus, registers::xn01::ADDRESS)
    }
    /// driver for a module moved to a non-standard address
    pub const fn at(bus: B, address: u8) -> Self {
        Self {node: Node::new(bus, address)}
    }

    /**
        current state of one input channel

        every call performs a fresh bus exchange, there is no caching. an out of range
        channel fails with [InvalidChannel](crate::bus::InvalidChannel) before anything
        is sent on the bus.
    */
    pub fn read_input(&mut self, channel: u8) -> Result<bool, Error<B::Error>> {
        let channel = Channel::new(channel)?;
        Ok(self.read_frame()?.channel(channel))
    }

    /**
        snapshot of all eight input channels in one bus exchange

        cheaper than eight [Self::read_input] calls when scanning, and the only way to
        get all channels at one instant.
    */
    pub fn read_frame(&mut self) -> Result<Frame, Error<B::Error>> {
        self.node.read(registers::xn01::INPUTS)
    }

    /// bus address this driver exchanges with
    pub const fn address(&self) -> u8 {self.node.address()}
    /// give the transport back
    pub fn release(self) -> B {self.node.release()}
}
