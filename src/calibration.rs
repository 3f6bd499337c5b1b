//! Calibration defaults derived from an [`ActuatorConfig`].
//!
//! Converts the actuator's electrical ratings into the register values the
//! chip expects and builds the start-up script that programs them. The
//! conversions follow the DRV2605L datasheet formulas for closed-loop
//! operation with the default 300 us sample time.

use crate::config::{ActuatorConfig, HapticConfig};
use crate::error::ScriptError;
use crate::registers::*;
use crate::script::Script;

/// Datasheet default ERM drive time (4.8 ms).
const ERM_DRIVE_TIME: u8 = 0x13;

/// Playback interval used for the time offset registers, in ms.
const TIME_OFFSET_STEP_MS: u16 = 5;

/// Default brake factor (4x) and back-EMF gain.
const BRAKE_FACTOR: u8 = 3;
const BEMF_GAIN: u8 = 2;

/// Result of a successful auto-calibration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationResult {
    /// Compensation coefficient (A_CAL_COMP).
    pub compensation: u8,
    /// Back-EMF coefficient (A_CAL_BEMF).
    pub back_emf: u8,
    /// Back-EMF gain chosen by the calibration routine.
    pub bemf_gain: u8,
}

/// Integer square root, rounded down.
fn isqrt(value: u32) -> u32 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

/// `sqrt(1 - period_us * f)` scaled by 1000.
fn frequency_factor(period_us: u32, frequency_hz: u16) -> u64 {
    let ppm = 1_000_000u32.saturating_sub(period_us.saturating_mul(frequency_hz as u32));
    isqrt(ppm).max(1) as u64
}

fn clamp_u8(value: u64) -> u8 {
    value.min(u8::MAX as u64) as u8
}

/// RATED_VOLTAGE register value for the nominal voltage.
///
/// ERM: `V = RATED_VOLTAGE * 5.36 V / 255`.
/// LRA: `V = RATED_VOLTAGE * 20.71 mV / sqrt(1 - (4 * t_sample + 300 us) * f)`.
pub fn rated_voltage(config: &ActuatorConfig) -> u8 {
    let mv = config.nominal_mv as u64;
    if config.actuator.is_lra() {
        let factor = frequency_factor(1500, config.resonant_frequency_hz);
        clamp_u8(mv * factor / 20_710)
    } else {
        clamp_u8(mv * 255 / 5360)
    }
}

/// OD_CLAMP register value for the overdrive voltage.
///
/// ERM: `V = OD_CLAMP * 21.96 mV`.
/// LRA: `V = OD_CLAMP * 21.32 mV * sqrt(1 - f * 800 us)`.
pub fn overdrive_clamp(config: &ActuatorConfig) -> u8 {
    let mv = config.overdrive_mv.min(config.abs_max_mv) as u64;
    if config.actuator.is_lra() {
        let factor = frequency_factor(800, config.resonant_frequency_hz);
        clamp_u8(mv * 100_000 / (2132 * factor))
    } else {
        clamp_u8(mv * 100 / 2196)
    }
}

/// DRIVE_TIME field of CONTROL1.
///
/// For an LRA this is half the resonance period: `0.5 ms + DRIVE_TIME * 0.1 ms`.
pub fn drive_time(config: &ActuatorConfig) -> u8 {
    if !config.actuator.is_lra() || config.resonant_frequency_hz == 0 {
        return ERM_DRIVE_TIME;
    }
    let half_period_us = 500_000 / config.resonant_frequency_hz as u64;
    let steps = half_period_us.saturating_sub(500) / 100;
    clamp_u8(steps).min(CONTROL1_DRIVE_TIME_MASK)
}

/// Time offset register value (overdrive or brake) for a duration in ms.
///
/// The chip reads the offset as two's complement, so positive offsets stop
/// at `i8::MAX` steps.
pub fn time_offset(ms: u16) -> u8 {
    (ms / TIME_OFFSET_STEP_MS).min(i8::MAX as u16) as u8
}

pub fn feedback_control(config: &ActuatorConfig) -> u8 {
    let mut value = (BRAKE_FACTOR << FEEDBACK_BRAKE_FACTOR_SHIFT) | BEMF_GAIN;
    if config.actuator.is_lra() {
        value |= FEEDBACK_N_ERM_LRA;
    }
    let loop_gain = if config.amplitude_pid { 2 } else { 1 };
    value | (loop_gain << FEEDBACK_LOOP_GAIN_SHIFT)
}

pub fn control1(config: &ActuatorConfig) -> u8 {
    let boost = if config.acceleration {
        CONTROL1_STARTUP_BOOST
    } else {
        0
    };
    boost | drive_time(config)
}

pub fn control2(config: &ActuatorConfig) -> u8 {
    let stabilizer = if config.rapid_stop {
        CONTROL2_BRAKE_STABILIZER
    } else {
        0
    };
    CONTROL2_BIDIR_INPUT | stabilizer | CONTROL2_TIMING_DEFAULT
}

pub fn control3(config: &ActuatorConfig) -> u8 {
    let mut value = CONTROL3_NG_THRESH_DEFAULT;
    if config.actuator.is_lra() {
        if !config.frequency_tracking {
            value |= CONTROL3_LRA_OPEN_LOOP;
        }
    } else if !config.bemf_sense {
        value |= CONTROL3_ERM_OPEN_LOOP;
    }
    value
}

/// Start-up script: leave standby, load the default sequence and program
/// the calibration registers for the configured actuator.
///
/// The operating mode is not part of the script; `init` sets it afterwards
/// through `set_mode`.
pub fn startup_script(config: &HapticConfig) -> Result<Script, ScriptError> {
    let actuator = &config.actuator;

    Script::new()
        .write(MODE, 0x00)?
        .write(RTP_INPUT, config.realtime_value)?
        .write(WAVESEQ1, config.default_script)?
        .write(WAVESEQ1 + 1, 0x00)?
        .write(OVERDRIVE_TIME_OFFSET, time_offset(actuator.rise_time_ms))?
        .write(SUSTAIN_TIME_OFFSET_POS, 0x00)?
        .write(SUSTAIN_TIME_OFFSET_NEG, 0x00)?
        .write(BRAKE_TIME_OFFSET, time_offset(actuator.brake_time_ms))?
        .write(LIBRARY_SEL, config.library() as u8)?
        .write(RATED_VOLTAGE, rated_voltage(actuator))?
        .write(OVERDRIVE_CLAMP, overdrive_clamp(actuator))?
        .write(FEEDBACK, feedback_control(actuator))?
        .write(CONTROL1, control1(actuator))?
        .write(CONTROL2, control2(actuator))?
        .write(CONTROL3, control3(actuator))
}
