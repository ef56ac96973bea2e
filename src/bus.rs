/*!
    addressed register access shared by all module drivers

    a [Node] binds one module's fixed bus address to a borrowed transport. reading a
    register is one addressed write of the register index followed by one addressed read
    of the register's width; writing is one combined write carrying the index and the
    payload. the register index byte always goes first on the wire, for every module kind.

    the node holds no cache and no lock: every call is a fresh bus exchange, and a shared
    transport must be serialized by the caller (one exchange in flight at a time).
*/

use embedded_hal::i2c::{I2c, SevenBitAddress};
use packbytes::{FromBytes, ToBytes, ByteArray};
use log::*;
use thiserror::Error;

use crate::registers::Register;


/// maximum bytes in one combined register-select + payload write
pub const MAX_EXCHANGE: usize = 8;


/// error regarding one exchange with a module
#[derive(Error, Debug, PartialEq)]
pub enum Error<E> {
    /// the caller named a channel the module does not serve, nothing was sent on the bus
    #[error(transparent)]
    Channel(#[from] InvalidChannel),
    /// the transport failed, typically a module not acknowledging its address
    #[error("problem with the two-wire bus")]
    Bus(E),
    /// problem detected on host side before transmitting
    #[error("problem detected on host side: {0}")]
    Host(&'static str),
}

/// channel number outside the range the module serves
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("channel {0} is not provided by the module")]
pub struct InvalidChannel(pub u8);


/// one module's end of the bus: its fixed address over a transport
pub struct Node<B> {
    bus: B,
    address: SevenBitAddress,
}

impl<B> Node<B> {
    /// bind a transport to the module at the given fixed address
    pub const fn new(bus: B, address: SevenBitAddress) -> Self {
        Self{bus, address}
    }
    /// bus address this node exchanges with
    pub const fn address(&self) -> SevenBitAddress {self.address}
    /// give the transport back
    pub fn release(self) -> B {self.bus}
}

impl<B: I2c> Node<B> {
    /// read the register's current value, one select write then one read
    pub fn read<T: FromBytes>(&mut self, register: Register<T>) -> Result<T, Error<B::Error>> {
        let mut buffer = T::Bytes::zeroed();
        self.read_bytes(register.address(), buffer.as_mut())?;
        Ok(T::from_be_bytes(buffer))
    }
    /// set the register's value, one combined write of index and payload
    pub fn write<T: ToBytes>(&mut self, register: Register<T>, value: T) -> Result<(), Error<B::Error>> {
        let payload = value.to_be_bytes();
        self.write_bytes(register.address(), payload.as_ref())
    }

    /// raw variant of [Self::read], `data` gives the width to request
    pub fn read_bytes(&mut self, register: u8, data: &mut [u8]) -> Result<(), Error<B::Error>> {
        trace!("select register {:#04x} on module {}", register, self.address);
        self.bus.write(self.address, &[register]) .map_err(Error::Bus)?;
        self.bus.read(self.address, data) .map_err(Error::Bus)?;
        debug!("module {} register {:#04x} returned {:?}", self.address, register, data);
        Ok(())
    }
    /// raw variant of [Self::write]
    pub fn write_bytes(&mut self, register: u8, data: &[u8]) -> Result<(), Error<B::Error>> {
        let mut exchange = heapless::Vec::<u8, MAX_EXCHANGE>::new();
        exchange.push(register) .map_err(|_| Error::Host("exchange buffer exhausted"))?;
        exchange.extend_from_slice(data) .map_err(|_| Error::Host("payload too long for one exchange"))?;
        debug!("module {} register {:#04x} written {:?}", self.address, register, data);
        self.bus.write(self.address, &exchange) .map_err(Error::Bus)
    }
}
