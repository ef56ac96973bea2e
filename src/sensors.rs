/*!
    driver for the XN04 environmental sensor module

    three measurements behind three registers, each a big-endian u16. temperature and
    humidity travel as hundredths ([Centi](crate::registers::Centi)), luminosity as a raw
    count. the module has no batched read: each measurement is its own bus exchange, so
    three consecutive reads are three instants, not one snapshot.
*/

use embedded_hal::i2c::I2c;

use crate::{
    bus::{Node, Error},
    registers,
    };


/// host end of the XN04 environmental sensor module
pub struct Sensors<B> {
    node: Node<B>,
}

impl<B: I2c> Sensors<B> {
    /// driver for a module at the factory address
    pub const fn new(bus: B) -> Self {
        Self::at(bus, registers::xn04::ADDRESS)
    }
    /// driver for a module moved to a non-standard address
    pub const fn at(bus: B, address: u8) -> Self {
        Self {node: Node::new(bus, address)}
    }

    /// ambient temperature in degrees celsius, two decimal digits of resolution
    pub fn read_temperature(&mut self) -> Result<f32, Error<B::Error>> {
        Ok(self.node.read(registers::xn04::TEMPERATURE)?.as_float())
    }
    /// relative humidity in percent, two decimal digits of resolution
    pub fn read_humidity(&mut self) -> Result<f32, Error<B::Error>> {
        Ok(self.node.read(registers::xn04::HUMIDITY)?.as_float())
    }
    /// luminosity as the sensor's raw count, no scaling applied
    pub fn read_luminosity(&mut self) -> Result<u16, Error<B::Error>> {
        self.node.read(registers::xn04::LUMINOSITY)
    }

    /// bus address this driver exchanges with
    pub const fn address(&self) -> u8 {self.node.address()}
    /// give the transport back
    pub fn release(self) -> B {self.node.release()}
}
