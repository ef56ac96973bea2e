/*!
    host-side drivers for the XN modular sensor/actuator bus

    XN modules are fixed-address peripherals on a shared two-wire bus. every module exposes
    a set of one-byte register indices with fixed-width payloads, and every exchange is one
    addressed write (selecting a register and optionally carrying a payload) optionally
    followed by one addressed read of the register's width.

    the transport is any [embedded_hal::i2c::I2c] implementation, given to a driver at
    construction and returned by `release()`. the crate performs no locking of its own:
    exchanges are synchronous and the caller serializes access to a shared bus.

    - [registers] declares the module addresses, their register indices and wire value types
    - [bus] implements the addressed register access shared by all drivers
    - [inputs], [outputs], [sensors], [relays] are the per-module drivers
    - [sim] (feature `sim`) emulates a populated bus for tests and demos
*/
#![cfg_attr(not(test), no_std)]
#[cfg(feature = "std")]
extern crate std;

mod utils;

pub mod bus;
pub mod registers;
pub mod inputs;
pub mod outputs;
pub mod sensors;
pub mod relays;
#[cfg(feature = "sim")]
pub mod sim;
