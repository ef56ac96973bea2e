use xnbus::{
    bus::{Error, InvalidChannel},
    inputs::DigitalInputs,
    outputs::DigitalOutputs,
    registers::{self, Centi, Channel, Frame},
    relays::Relays,
    sensors::Sensors,
    sim::{SimBus, SimError, Transaction},
    };
use packbytes::FromBytes;


fn write(address: u8, bytes: &[u8]) -> Transaction {
    Transaction::Write {address, bytes: bytes.to_vec()}
}
fn read(address: u8, size: usize) -> Transaction {
    Transaction::Read {address, size}
}


#[test]
fn input_wire_shape() {
    let mut bus = SimBus::new();
    bus.module_mut(registers::xn01::ADDRESS).unwrap()
        .set(registers::xn01::INPUTS, Frame::from_be_bytes([0b0000_0101]));

    let mut inputs = DigitalInputs::new(&mut bus);
    assert_eq!(inputs.read_input(1), Ok(true));
    assert_eq!(inputs.read_input(2), Ok(false));
    assert_eq!(inputs.read_input(3), Ok(true));
    assert_eq!(inputs.read_input(8), Ok(false));
    drop(inputs);

    // each call is one select write then one 1-byte read, no caching
    assert_eq!(bus.journal().len(), 8);
    assert_eq!(&bus.journal()[.. 2], &[
        write(registers::xn01::ADDRESS, &[0x01]),
        read(registers::xn01::ADDRESS, 1),
        ]);
    assert_eq!(bus.writes(), 4);
    assert_eq!(bus.reads(), 4);
}

#[test]
fn input_frame_snapshot() {
    let mut bus = SimBus::new();
    bus.module_mut(registers::xn01::ADDRESS).unwrap()
        .set(registers::xn01::INPUTS, Frame::from_be_bytes([0xa5]));

    let mut inputs = DigitalInputs::new(&mut bus);
    let frame = inputs.read_frame().unwrap();
    drop(inputs);

    for number in 1 ..= 8 {
        let channel = Channel::new(number).unwrap();
        assert_eq!(frame.channel(channel), 0xa5 >> (number - 1) & 0x01 != 0);
    }
    assert_eq!(bus.journal().len(), 2);
}

#[test]
fn input_invalid_channel_sends_nothing() {
    let mut bus = SimBus::new();
    let mut inputs = DigitalInputs::new(&mut bus);

    assert_eq!(inputs.read_input(0), Err(Error::Channel(InvalidChannel(0))));
    assert_eq!(inputs.read_input(9), Err(Error::Channel(InvalidChannel(9))));
    assert_eq!(inputs.read_input(255), Err(Error::Channel(InvalidChannel(255))));
    drop(inputs);

    assert!(bus.journal().is_empty());
}

#[test]
fn output_wire_shape() {
    let mut bus = SimBus::new();
    let mut outputs = DigitalOutputs::new(&mut bus);

    let frame = Frame::default()
        .with(Channel::new(1).unwrap(), true)
        .with(Channel::new(4).unwrap(), true);
    outputs.write_outputs(frame).unwrap();
    drop(outputs);

    // one combined write, register selector first, no read back
    assert_eq!(bus.journal(), &[write(registers::xn02::ADDRESS, &[0x01, 0b0000_1001])]);
}

#[test]
fn output_unset_channels_are_off() {
    let mut bus = SimBus::new();
    let mut outputs = DigitalOutputs::new(&mut bus);

    // a frame carrying a single channel forces the seven others off
    outputs.write_outputs(Frame::default().with(Channel::new(7).unwrap(), true)).unwrap();
    outputs.write_raw(0x00).unwrap();
    drop(outputs);

    assert_eq!(bus.journal(), &[
        write(registers::xn02::ADDRESS, &[0x01, 0b0100_0000]),
        write(registers::xn02::ADDRESS, &[0x01, 0x00]),
        ]);
}

#[test]
fn sensor_readings() {
    let mut bus = SimBus::new();
    let sensors_address = registers::xn04::ADDRESS;
    {
        let module = bus.module_mut(sensors_address).unwrap();
        module.set(registers::xn04::TEMPERATURE, Centi(1000));
        module.set(registers::xn04::HUMIDITY, Centi(2500));
        module.set(registers::xn04::LUMINOSITY, 1000u16);
    }

    let mut sensors = Sensors::new(&mut bus);
    assert_eq!(sensors.read_temperature(), Ok(10.));
    assert_eq!(sensors.read_humidity(), Ok(25.));
    assert_eq!(sensors.read_luminosity(), Ok(1000));
    drop(sensors);

    // three measurements are three separate exchanges, not one snapshot
    assert_eq!(bus.journal(), &[
        write(sensors_address, &[0x01]), read(sensors_address, 2),
        write(sensors_address, &[0x02]), read(sensors_address, 2),
        write(sensors_address, &[0x03]), read(sensors_address, 2),
        ]);
}

#[test]
fn relay_wire_shape() {
    let mut bus = SimBus::new();
    let mut relays = Relays::new(&mut bus);

    relays.set_relay(1, true).unwrap();
    relays.set_relay(2, false).unwrap();
    drop(relays);

    assert_eq!(bus.journal(), &[
        write(registers::xn11::ADDRESS, &[0x01, 0x01]),
        write(registers::xn11::ADDRESS, &[0x02, 0x00]),
        ]);
}

#[test]
fn relay_invalid_channel_sends_nothing() {
    let mut bus = SimBus::new();
    let mut relays = Relays::new(&mut bus);

    assert_eq!(relays.set_relay(3, true), Err(Error::Channel(InvalidChannel(3))));
    assert_eq!(relays.set_relay(0, false), Err(Error::Channel(InvalidChannel(0))));
    drop(relays);

    // an out of range relay number must never reach a valid coil
    assert!(bus.journal().is_empty());
}

#[test]
fn relay_all_off() {
    let mut bus = SimBus::new();
    let mut relays = Relays::new(&mut bus);

    relays.all_off().unwrap();
    drop(relays);

    assert_eq!(bus.journal(), &[
        write(registers::xn11::ADDRESS, &[0x01, 0x00]),
        write(registers::xn11::ADDRESS, &[0x02, 0x00]),
        ]);
}

#[test]
fn transport_failure_surfaces_on_every_operation() {
    let mut bus = SimBus::new();
    bus.inject_fault(SimError::Injected);

    {
        let mut inputs = DigitalInputs::new(&mut bus);
        assert_eq!(inputs.read_input(1), Err(Error::Bus(SimError::Injected)));
        assert_eq!(inputs.read_frame(), Err(Error::Bus(SimError::Injected)));
    }
    {
        let mut outputs = DigitalOutputs::new(&mut bus);
        assert_eq!(outputs.write_outputs(Frame::default()), Err(Error::Bus(SimError::Injected)));
    }
    {
        let mut sensors = Sensors::new(&mut bus);
        assert_eq!(sensors.read_temperature(), Err(Error::Bus(SimError::Injected)));
        assert_eq!(sensors.read_humidity(), Err(Error::Bus(SimError::Injected)));
        assert_eq!(sensors.read_luminosity(), Err(Error::Bus(SimError::Injected)));
    }
    {
        let mut relays = Relays::new(&mut bus);
        assert_eq!(relays.set_relay(1, true), Err(Error::Bus(SimError::Injected)));
    }

    bus.clear_fault();
    let mut relays = Relays::new(&mut bus);
    assert_eq!(relays.set_relay(1, true), Ok(()));
}

#[test]
fn absent_module_is_a_bus_error() {
    let mut bus = SimBus::new();
    // nothing listens at address 9
    let mut inputs = DigitalInputs::at(&mut bus, 9);
    assert_eq!(inputs.read_input(1), Err(Error::Bus(SimError::NoAcknowledge)));
}

#[test]
fn moved_module_addresses() {
    let addresses = registers::Addresses {inputs: 21, outputs: 22, sensors: 24, relays: 31};
    let mut bus = SimBus::with_addresses(addresses);
    bus.module_mut(21).unwrap()
        .set(registers::xn01::INPUTS, Frame::from_be_bytes([0x01]));

    let mut inputs = DigitalInputs::at(&mut bus, addresses.inputs);
    assert_eq!(inputs.read_input(1), Ok(true));
    drop(inputs);

    let mut relays = Relays::at(&mut bus, addresses.relays);
    relays.set_relay(2, true).unwrap();
    drop(relays);

    assert_eq!(bus.journal().last(), Some(&write(31, &[0x02, 0x01])));
}

#[test]
fn written_outputs_land_in_the_module() {
    let mut bus = SimBus::new();
    let mut outputs = DigitalOutputs::new(&mut bus);
    outputs.write_raw(0x5a).unwrap();
    drop(outputs);

    let stored: Frame = bus.module(registers::xn02::ADDRESS).unwrap().get(registers::xn02::OUTPUTS);
    assert_eq!(stored, Frame::from_be_bytes([0x5a]));
}
