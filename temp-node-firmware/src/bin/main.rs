#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those holding buffers for the duration of a data transfer."
)]

use embassy_executor::Spawner;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::spi::master::{Config as SpiConfig, Spi};
use esp_hal::spi::Mode;
use esp_hal::time::Rate;
use esp_hal::timer::systimer::SystemTimer;
use log::{error, info};

use lr11xx_hal_async::conf::TransportConfig;
use lr11xx_hal_async::Lr11xx;
use temp_node::{NodeConfig, TelemetryNode};
use tmp117_async::Tmp117;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    error!("{info}");
    fail_stop("panic")
}

// This creates a default app-descriptor required by the esp-idf bootloader.
esp_bootloader_esp_idf::esp_app_desc!();

/// Halts the node for good: interrupts stay masked and nothing runs again.
fn fail_stop(reason: &str) -> ! {
    error!("fail-stop: {reason}");
    // SAFETY: the section is never released, so there is no restore to pair it with.
    let _cs = unsafe { critical_section::acquire() };
    loop {
        core::hint::spin_loop();
    }
}

#[esp_hal_embassy::main]
async fn main(_spawner: Spawner) {
    esp_println::logger::init_logger(log::LevelFilter::Debug);
    info!("Logger initialized");

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timer0 = SystemTimer::new(peripherals.SYSTIMER);
    esp_hal_embassy::init(timer0.alarm0);
    info!("Peripherals initialized");

    // Radio lines. NSS and NRESET idle high.
    let lora_cs = Output::new(peripherals.GPIO3, Level::High, OutputConfig::default());
    let lora_busy = Input::new(peripherals.GPIO6, InputConfig::default());
    let lora_rst = Output::new(peripherals.GPIO4, Level::High, OutputConfig::default());
    let lora_int = Input::new(peripherals.GPIO5, InputConfig::default());
    // Radio power rail; dropping it would switch the radio off.
    let _lora_en = Output::new(peripherals.GPIO46, Level::High, OutputConfig::default());

    let spi = match Spi::new(
        peripherals.SPI2,
        SpiConfig::default()
            .with_frequency(Rate::from_mhz(8))
            .with_mode(Mode::_0),
    ) {
        Ok(spi) => spi
            .with_sck(peripherals.GPIO36)
            .with_mosi(peripherals.GPIO33)
            .with_miso(peripherals.GPIO47)
            .into_async(),
        Err(err) => fail_stop_with("SPI configuration rejected", err),
    };

    let i2c = match I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(100)),
    ) {
        Ok(i2c) => i2c
            .with_sda(peripherals.GPIO13)
            .with_scl(peripherals.GPIO14)
            .into_async(),
        Err(err) => fail_stop_with("I2C configuration rejected", err),
    };

    let radio = Lr11xx::new(
        spi,
        (lora_cs, lora_busy, lora_rst, lora_int),
        embassy_time::Delay,
        TransportConfig::default(),
    );
    let sensor = Tmp117::new(i2c);

    let mut node = match TelemetryNode::new(radio, sensor, NodeConfig::default()) {
        Ok(node) => node,
        Err(err) => fail_stop_with("invalid node configuration", err),
    };

    if let Err(err) = node.start().await {
        fail_stop_with("node start-up failed", err);
    }

    info!("Entering telemetry loop");
    node.run().await
}

fn fail_stop_with<E: core::fmt::Debug>(reason: &str, err: E) -> ! {
    error!("{reason}: {err:?}");
    fail_stop(reason)
}
