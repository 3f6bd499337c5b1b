//! Play effect demo
//!
//! Demonstrates basic usage of the haptic-driver crate on the Raspberry Pi
//! Pico 2 with an LRA on a DRV2605L breakout. Calibrates the actuator,
//! runs diagnostics, then cycles through a few ROM effects and finishes
//! by firing the external trigger in GPIO mode.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                          |
//! |-----------|------------|--------------------------------|
//! | I2C0 SDA  | GP20       |                                |
//! | I2C0 SCL  | GP21       |                                |
//! | IN/TRIG   | GP18       | Driven high to trigger         |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use haptic_driver::{
    ActuatorConfig, ActuatorType, HapticConfig, HapticDriver, Mode, TriggerConfig,
    TriggerPolarity,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// ROM effects played in turn: strong click, double click, buzz, ramp down.
const EFFECTS: [u8; 4] = [1, 10, 47, 70];

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- I2C bus (GP20 = SDA, GP21 = SCL) ---
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // --- IN/TRIG pin (GP18) ---
    let trigger = Output::new(p.PIN_18, Level::Low);

    // 170 Hz coin LRA, 2.0 V RMS rated, 2.5 V peak
    let config = HapticConfig {
        actuator: ActuatorConfig {
            actuator: ActuatorType::Lra,
            nominal_mv: 2000,
            overdrive_mv: 2500,
            resonant_frequency_hz: 170,
            ..ActuatorConfig::default()
        },
        trigger: TriggerConfig {
            sequence_id: 1,
            polarity: TriggerPolarity::RisingEdge,
            ..TriggerConfig::default()
        },
        completion_timeout: Duration::from_millis(1500),
        ..HapticConfig::default()
    };

    let mut haptic = HapticDriver::with_trigger_pin(i2c, Delay, trigger, config);

    if let Err(e) = haptic.init().await {
        error!("Haptic init failed: {}", e);
        return;
    }

    match haptic.auto_calibrate().await {
        Ok(result) => info!("Calibrated: {}", result),
        Err(e) => warn!("Calibration failed: {}", e),
    }

    match haptic.run_diagnostics().await {
        Ok(()) => info!("Actuator OK"),
        Err(e) => warn!("Diagnostics: {}", e),
    }

    match haptic.supply_voltage_mv().await {
        Ok(mv) => info!("Supply: {} mV", mv),
        Err(e) => error!("VBAT read failed: {}", e),
    }

    for &effect in EFFECTS.iter() {
        info!("Playing effect {}", effect);

        let played = async {
            haptic.write_waveforms(0, &[effect, 0]).await?;
            haptic.go().await?;
            haptic.wait_for_completion(Duration::from_millis(2000)).await
        };
        if let Err(e) = played.await {
            error!("Effect {} failed: {}", effect, e);
        }

        if let Ok(period) = haptic.lra_period_us().await {
            debug!("LRA period: {} us", period);
        }

        Timer::after(Duration::from_millis(500)).await;
    }

    // Hand playback over to the IN/TRIG pin.
    if let Err(e) = haptic.set_mode(Mode::Gpio).await {
        error!("Failed to enter GPIO mode: {}", e);
        return;
    }

    loop {
        if let Err(e) = haptic.fire_trigger().await {
            error!("Trigger failed: {}", e);
        }
        Timer::after(Duration::from_millis(1000)).await;
    }
}
