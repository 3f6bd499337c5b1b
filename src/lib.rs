//! Async driver for the TI DRV2605L haptic motor driver.
//!
//! This crate provides an `embedded-hal-async` I2C driver for the DRV2605L
//! (and register-compatible DRV2605) haptic driver, which drives ERM and
//! LRA actuators from a ROM effect library, a real-time input, PWM or audio.
//!
//! # Architecture
//!
//! The crate is split into two layers:
//!
//! - **`driver`** (crate-private): register primitives for single reads and
//!   writes, masked read-modify-write, and auto-incrementing bulk transfers.
//! - **[`HapticDriver`]** (public): the validated high-level API for modes,
//!   waveform slots, scripts, playback, calibration and the trigger pin.
//!
//! The actuator is described by an explicit [`HapticConfig`] handed over at
//! construction; [`HapticDriver::init`] programs it into the chip.
//!
//! # Quick start
//!
//! ```no_run
//! use haptic_driver::{HapticConfig, HapticDriver, Mode};
//!
//! # async fn example(
//! #     i2c: impl embedded_hal_async::i2c::I2c,
//! #     delay: impl embedded_hal_async::delay::DelayNs,
//! # ) -> Result<(), ()> {
//! // Construct with any `embedded-hal-async` I2C and delay implementation
//! let mut haptic = HapticDriver::new(i2c, delay, HapticConfig::default());
//! haptic.init().await.map_err(|_| ())?;
//!
//! // Play ROM sequence 1 ("strong click")
//! haptic.set_mode(Mode::Register).await.map_err(|_| ())?;
//! haptic.play_script_index(1).await.map_err(|_| ())?;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: Enable [`defmt::Format`] implementations on public types
//!   and log initialisation, mode changes and calibration results.

#![cfg_attr(not(test), no_std)]

pub use calibration::CalibrationResult;
pub use config::{ActuatorConfig, ConfigError, HapticConfig, TriggerConfig};
pub use error::{HapticError, ScriptError};
pub use haptic::{HapticDriver, NoTriggerPin};
pub use registers::{CHIP_ID, DEFAULT_ADDRESS, EFFECT_MAX, SCRIPT_MAX, WAVEFORM_SLOTS};
pub use script::{Script, ScriptStep};
pub use status::DeviceStatus;
pub use types::{ActuatorType, Library, Mode, SlotEntry, TriggerMode, TriggerPolarity};

pub mod calibration;
pub mod registers;

mod config;
mod driver;
mod error;
mod haptic;
mod script;
mod status;
mod types;
