//! Error types for the haptic driver.

use core::fmt;

use crate::config::ConfigError;

/// Errors that can occur when talking to the haptic driver chip.
///
/// Input validation errors are always returned before any I2C traffic is
/// generated. Bus errors abort the current operation immediately: there are
/// no retries and already-applied writes are not rolled back.
#[derive(Debug, PartialEq, Eq)]
pub enum HapticError<E> {
    /// Underlying I2C bus error (NACK, arbitration loss, timeout, ...).
    I2c(E),

    /// Register address beyond the chip's memory map, or a bulk transfer
    /// that would run past the last register.
    InvalidRegister,

    /// Waveform slot index at or beyond the configured slot count.
    InvalidSlot,

    /// Effect index above the configured effect maximum.
    InvalidEffect,

    /// Script index above the configured script maximum.
    InvalidScript,

    /// Operating mode index outside the known set of modes.
    InvalidMode,

    /// Actuator type index outside the known set of actuators.
    InvalidActuatorType,

    /// The status register reported an unexpected device ID.
    WrongDevice { found: u8 },

    /// The actuator configuration is inconsistent.
    Config(ConfigError),

    /// Script construction failed.
    Script(ScriptError),

    /// A trigger-pin operation was requested but no pin was configured.
    NoTriggerPin,

    /// The trigger pin could not be driven.
    Pin,

    /// The chip did not finish an operation within the configured timeout.
    Timeout,

    /// Auto-calibration did not converge.
    CalibrationFailed,

    /// Diagnostics reported a missing, shorted or out-of-range actuator.
    DiagnosticFailed,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for HapticError<E> {
    fn from(error: E) -> Self {
        HapticError::I2c(error)
    }
}

impl<E: fmt::Debug> fmt::Display for HapticError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HapticError::I2c(e) => write!(f, "I2C error: {:?}", e),
            HapticError::InvalidRegister => write!(f, "Register address out of range"),
            HapticError::InvalidSlot => write!(f, "Invalid waveform slot"),
            HapticError::InvalidEffect => write!(f, "Invalid effect index"),
            HapticError::InvalidScript => write!(f, "Invalid script index"),
            HapticError::InvalidMode => write!(f, "Invalid operating mode"),
            HapticError::InvalidActuatorType => write!(f, "Invalid actuator type"),
            HapticError::WrongDevice { found } => {
                write!(f, "Unexpected device ID {:#04x}", found)
            }
            HapticError::Config(e) => write!(f, "Configuration error: {:?}", e),
            HapticError::Script(e) => write!(f, "Script error: {}", e),
            HapticError::NoTriggerPin => write!(f, "No trigger pin configured"),
            HapticError::Pin => write!(f, "Trigger pin error"),
            HapticError::Timeout => write!(f, "Timed out waiting for the device"),
            HapticError::CalibrationFailed => write!(f, "Auto-calibration failed"),
            HapticError::DiagnosticFailed => write!(f, "Actuator diagnostics failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for HapticError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            HapticError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            HapticError::InvalidRegister => defmt::write!(f, "Invalid register"),
            HapticError::InvalidSlot => defmt::write!(f, "Invalid waveform slot"),
            HapticError::InvalidEffect => defmt::write!(f, "Invalid effect index"),
            HapticError::InvalidScript => defmt::write!(f, "Invalid script index"),
            HapticError::InvalidMode => defmt::write!(f, "Invalid operating mode"),
            HapticError::InvalidActuatorType => defmt::write!(f, "Invalid actuator type"),
            HapticError::WrongDevice { found } => {
                defmt::write!(f, "Unexpected device ID {=u8:#x}", found)
            }
            HapticError::Config(e) => defmt::write!(f, "Configuration error: {}", e),
            HapticError::Script(e) => defmt::write!(f, "Script error: {}", e),
            HapticError::NoTriggerPin => defmt::write!(f, "No trigger pin"),
            HapticError::Pin => defmt::write!(f, "Trigger pin error"),
            HapticError::Timeout => defmt::write!(f, "Timeout"),
            HapticError::CalibrationFailed => defmt::write!(f, "Calibration failed"),
            HapticError::DiagnosticFailed => defmt::write!(f, "Diagnostics failed"),
        }
    }
}

/// Errors raised while building a [`Script`](crate::Script).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScriptError {
    /// The script already holds the maximum number of steps.
    Full,
    /// A step addresses a register outside the chip's memory map.
    InvalidRegister(u8),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScriptError::Full => write!(f, "Script is full"),
            ScriptError::InvalidRegister(reg) => {
                write!(f, "Register {:#04x} out of range", reg)
            }
        }
    }
}
