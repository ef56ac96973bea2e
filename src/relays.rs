/*!
    driver for the XN11 relay module

    two coils, one register each: the register index is the relay number and the payload
    is one [Switch](crate::registers::Switch) byte. the module gives no read-back of the
    physical coil state, success only means the transport acknowledged the write.
*/

use embedded_hal::i2c::I2c;

use crate::{
    bus::{Node, Error, InvalidChannel},
    registers::{self, Register, Switch},
    };


/// host end of the XN11 relay module
pub struct Relays<B> {
    node: Node<B>,
}

impl<B: I2c> Relays<B> {
    /// driver for a module at the factory address
    pub const fn new(bus: B) -> Self {
        Self::at(bus, registers::xn11::ADDRESS)
    }
    /// driver for a module moved to a non-standard address
    pub const fn at(bus: B, address: u8) -> Self {
        Self {node: Node::new(bus, address)}
    }

    /**
        energize or release one relay coil, relay number in {1, 2}

        any other relay number fails with [InvalidChannel] and sends nothing on the bus:
        an out of range number must never end up actuating a valid coil.
    */
    pub fn set_relay(&mut self, relay: u8, state: bool) -> Result<(), Error<B::Error>> {
        let register: Register<Switch> = match relay {
            1 => registers::xn11::RELAY1,
            2 => registers::xn11::RELAY2,
            other => return Err(InvalidChannel(other).into()),
        };
        self.node.write(register, Switch::from(state))
    }

    /// release both coils, two bus exchanges in sequence
    pub fn all_off(&mut self) -> Result<(), Error<B::Error>> {
        self.set_relay(1, false)?;
        self.set_relay(2, false)
    }

    /// bus address this driver exchanges with
    pub const fn address(&self) -> u8 {self.node.address()}
    /// give the transport back
    pub fn release(self) -> B {self.node.release()}
}
