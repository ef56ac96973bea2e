/*!
    in-memory emulation of a populated XN bus

    [SimBus] implements the same [I2c] transport the real bus does, backed by one register
    file per simulated module. it keeps a journal of every transaction seen on the wire and
    can be told to fail, so tests can assert exact wire bytes, transaction counts and error
    propagation, and demos can run without hardware.

    the emulation follows the module protocol, not any module's physics: a write stores
    `[index, payload..]` into the addressed cell, a read returns the last selected cell.
*/

use std::{
    collections::HashMap,
    vec::Vec,
    };
use embedded_hal::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress};
use packbytes::{FromBytes, ToBytes, ByteArray};
use log::*;
use thiserror::Error;

use crate::registers::{Addresses, Register};


/// transport failure reported by the simulated bus
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SimError {
    /// no module is listening at the requested address
    #[error("no module acknowledged the address")]
    NoAcknowledge,
    /// failure injected with [SimBus::inject_fault]
    #[error("injected bus failure")]
    Injected,
}
impl i2c::Error for SimError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NoAcknowledge => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            Self::Injected => ErrorKind::Other,
        }
    }
}

/// one transaction as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    /// addressed write, first byte is the register index
    Write {address: u8, bytes: Vec<u8>},
    /// addressed read of `size` bytes
    Read {address: u8, size: usize},
}

/// register file of one simulated module
#[derive(Default)]
pub struct SimModule {
    cells: HashMap<u8, Vec<u8>>,
    selected: u8,
}
impl SimModule {
    /// current value of one register, missing or short cells read as zeros
    pub fn get<T: FromBytes>(&self, register: Register<T>) -> T {
        let mut buffer = T::Bytes::zeroed();
        self.fill(register.address(), buffer.as_mut());
        T::from_be_bytes(buffer)
    }
    /// set one register's value
    pub fn set<T: ToBytes>(&mut self, register: Register<T>, value: T) {
        self.cells.insert(register.address(), value.to_be_bytes().as_ref().to_vec());
    }

    /// a write on the wire: select the register, store any payload that follows
    fn write(&mut self, bytes: &[u8]) {
        let Some((&index, payload)) = bytes.split_first()
            else {return};
        self.selected = index;
        if !payload.is_empty() {
            self.cells.insert(index, payload.to_vec());
        }
    }
    /// a read on the wire: return the selected cell
    fn read(&self, buffer: &mut [u8]) {
        buffer.fill(0);
        self.fill(self.selected, buffer);
    }
    fn fill(&self, index: u8, buffer: &mut [u8]) {
        if let Some(cell) = self.cells.get(&index) {
            let size = cell.len().min(buffer.len());
            buffer[.. size].copy_from_slice(&cell[.. size]);
        }
    }
}

/// simulated two-wire bus with one register file per module address
pub struct SimBus {
    modules: HashMap<u8, SimModule>,
    journal: Vec<Transaction>,
    fault: Option<SimError>,
}

impl SimBus {
    /// bus populated with the four standard modules at their factory addresses
    pub fn new() -> Self {
        Self::with_addresses(Addresses::DEFAULT)
    }
    /// bus populated with the four standard modules at the given addresses
    pub fn with_addresses(addresses: Addresses) -> Self {
        let mut modules = HashMap::new();
        for address in [addresses.inputs, addresses.outputs, addresses.sensors, addresses.relays] {
            modules.insert(address, SimModule::default());
        }
        Self {
            modules,
            journal: Vec::new(),
            fault: None,
            }
    }

    /// the simulated module at the given address
    pub fn module(&self, address: u8) -> Option<&SimModule> {
        self.modules.get(&address)
    }
    /// mutable access, for seeding register values from a test or demo
    pub fn module_mut(&mut self, address: u8) -> Option<&mut SimModule> {
        self.modules.get_mut(&address)
    }

    /// every transaction seen since the last [Self::clear_journal]
    pub fn journal(&self) -> &[Transaction] {
        &self.journal
    }
    /// forget the recorded transactions
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }
    /// number of write transactions recorded
    pub fn writes(&self) -> usize {
        self.journal.iter() .filter(|op| matches!(op, Transaction::Write{..})) .count()
    }
    /// number of read transactions recorded
    pub fn reads(&self) -> usize {
        self.journal.iter() .filter(|op| matches!(op, Transaction::Read{..})) .count()
    }

    /// make every following transaction fail with the given error, until [Self::clear_fault]
    pub fn inject_fault(&mut self, fault: SimError) {
        self.fault = Some(fault);
    }
    /// let transactions succeed again
    pub fn clear_fault(&mut self) {
        self.fault = None;
    }
}
impl Default for SimBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorType for SimBus {
    type Error = SimError;
}
impl I2c<SevenBitAddress> for SimBus {
    fn transaction(&mut self, address: SevenBitAddress, operations: &mut [Operation<'_>]) -> Result<(), SimError> {
        if let Some(fault) = self.fault {
            debug!("failing transaction with module {}", address);
            return Err(fault);
        }
        if !self.modules.contains_key(&address) {
            return Err(SimError::NoAcknowledge);
        }
        for operation in operations.iter_mut() {
            match operation {
                Operation::Write(bytes) => {
                    let bytes: &[u8] = bytes;
                    trace!("module {} receives {:?}", address, bytes);
                    self.journal.push(Transaction::Write {address, bytes: bytes.to_vec()});
                    if let Some(module) = self.modules.get_mut(&address) {
                        module.write(bytes);
                    }
                },
                Operation::Read(buffer) => {
                    let buffer: &mut [u8] = buffer;
                    self.journal.push(Transaction::Read {address, size: buffer.len()});
                    if let Some(module) = self.modules.get(&address) {
                        module.read(buffer);
                    }
                    trace!("module {} answers {:?}", address, buffer);
                },
            }
        }
        Ok(())
    }
}
