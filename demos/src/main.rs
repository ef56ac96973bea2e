/*!
    tour of the four XN modules on a simulated bus

    reproduces the original demo panel: poll the climate sensors, mirror the input
    channels onto the output module, then cycle the relays.
*/

use std::{thread, time::Duration};
use log::*;
use packbytes::FromBytes;
use xnbus::{
    inputs::DigitalInputs,
    outputs::DigitalOutputs,
    registers::{self, Centi, Channel, Frame},
    relays::Relays,
    sensors::Sensors,
    sim::SimBus,
    };


fn main() {
    env_logger::init();

    // a simulated bus carrying the four standard modules, seeded with plausible readings
    let mut bus = SimBus::new();
    {
        let module = bus.module_mut(registers::xn04::ADDRESS).unwrap();
        module.set(registers::xn04::TEMPERATURE, Centi(2513));
        module.set(registers::xn04::HUMIDITY, Centi(4870));
        module.set(registers::xn04::LUMINOSITY, 812u16);
    }
    bus.module_mut(registers::xn01::ADDRESS).unwrap()
        .set(registers::xn01::INPUTS, Frame::from_be_bytes([0b0011_0101]));

    // poll the environmental sensors, three separate exchanges
    {
        let mut sensors = Sensors::new(&mut bus);
        println!("temperature: {} celsius", sensors.read_temperature().unwrap());
        println!("humidity:    {} %", sensors.read_humidity().unwrap());
        println!("luminosity:  {} counts", sensors.read_luminosity().unwrap());
    }

    // mirror the input channels onto the output module
    {
        let frame = DigitalInputs::new(&mut bus).read_frame().unwrap();
        for number in 1 ..= 8 {
            let channel = Channel::new(number).unwrap();
            info!("input channel {}: {}", number, frame.channel(channel));
        }
        DigitalOutputs::new(&mut bus).write_outputs(frame).unwrap();
        println!("outputs mirrored from inputs");
    }

    // cycle the relays like the original panel sketch
    let mut relays = Relays::new(&mut bus);
    relays.all_off().unwrap();
    for cycle in 0 .. 3 {
        info!("relay cycle {}", cycle);
        relays.set_relay(1, true).unwrap();
        thread::sleep(Duration::from_millis(50));
        relays.set_relay(2, true).unwrap();
        thread::sleep(Duration::from_millis(50));
        relays.all_off().unwrap();
        thread::sleep(Duration::from_millis(50));
    }
    drop(relays);

    println!("wire transactions: {}", bus.journal().len());
}
