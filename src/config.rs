//! Driver and actuator configuration.
//!
//! Everything that describes the physical actuator and how the driver
//! should program the chip lives here. [`HapticConfig::default()`]
//! reproduces the reference ERM profile: a 300 mV nominal / 3.3 V overdrive
//! coin motor played from waveform memory.

use embassy_time::Duration;

use crate::registers::{DEFAULT_ADDRESS, EFFECT_MAX, SCRIPT_ID_MAX, WAVEFORM_SLOTS};
use crate::types::{ActuatorType, Library, Mode, TriggerMode, TriggerPolarity};

// ── ActuatorConfig ───────────────────────────────────────────────────────

/// Electrical and mechanical description of the attached actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuatorConfig {
    /// Actuator kind. Default: ERM.
    pub actuator: ActuatorType,

    // ── Feedback features ────────────────────────────────────────────
    /// Closed-loop back-EMF sensing (ERM). Default: enabled.
    pub bemf_sense: bool,
    /// Automatic resonance tracking (LRA). Default: enabled.
    pub frequency_tracking: bool,
    /// Start-up boost for faster acceleration. Default: enabled.
    pub acceleration: bool,
    /// Brake stabilizer for a fast, clean stop. Default: enabled.
    pub rapid_stop: bool,
    /// High loop gain for the amplitude controller. Default: disabled.
    pub amplitude_pid: bool,

    // ── Electrical ratings ───────────────────────────────────────────
    /// Nominal (rated) drive voltage in mV. Default: 300.
    pub nominal_mv: u16,
    /// Overdrive clamp voltage in mV. Default: 3300.
    pub overdrive_mv: u16,
    /// Absolute maximum drive voltage in mV. Default: 5000.
    pub abs_max_mv: u16,
    /// Resonant frequency in Hz (LRA drive time). Default: 180.
    pub resonant_frequency_hz: u16,
    /// Maximum current in mA. Informational; only used by
    /// [`max_current_voltage_mv`](Self::max_current_voltage_mv). Default: 137.
    pub max_current_ma: u16,
    /// Coil impedance in milliohm. Informational, like `max_current_ma`.
    /// Default: 10500.
    pub impedance_mohm: u32,

    // ── Timing ───────────────────────────────────────────────────────
    /// Rise time in ms, programmed as the overdrive time offset. Default: 50.
    pub rise_time_ms: u16,
    /// Brake time in ms, programmed as the brake time offset. Default: 50.
    pub brake_time_ms: u16,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            actuator: ActuatorType::Erm,
            bemf_sense: true,
            frequency_tracking: true,
            acceleration: true,
            rapid_stop: true,
            amplitude_pid: false,
            nominal_mv: 300,
            overdrive_mv: 3300,
            abs_max_mv: 5000,
            resonant_frequency_hz: 180,
            max_current_ma: 137,
            impedance_mohm: 10_500,
            rise_time_ms: 50,
            brake_time_ms: 50,
        }
    }
}

/// Reasons an [`ActuatorConfig`] cannot be programmed safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `nominal_mv` is above `overdrive_mv`.
    NominalAboveOverdrive,
    /// `overdrive_mv` is above `abs_max_mv`.
    OverdriveAboveAbsMax,
    /// `resonant_frequency_hz` is zero.
    ZeroFrequency,
}

impl ActuatorConfig {
    /// Check the voltage ordering and frequency.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nominal_mv > self.overdrive_mv {
            return Err(ConfigError::NominalAboveOverdrive);
        }
        if self.overdrive_mv > self.abs_max_mv {
            return Err(ConfigError::OverdriveAboveAbsMax);
        }
        if self.resonant_frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        Ok(())
    }

    /// Steady-state voltage across the coil at maximum current, in mV.
    ///
    /// Saturates at `u32::MAX` for out-of-range ratings.
    pub fn max_current_voltage_mv(&self) -> u32 {
        let mv = self.max_current_ma as u64 * self.impedance_mohm as u64 / 1000;
        mv.min(u32::MAX as u64) as u32
    }
}

// ── TriggerConfig ────────────────────────────────────────────────────────

/// External trigger (IN/TRIG pin) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TriggerConfig {
    /// Sequence played on a trigger in [`Mode::Gpio`]. Default: 7.
    pub sequence_id: u8,
    /// Informational; the chip only supports single-pattern triggering.
    /// Default: single pattern.
    pub mode: TriggerMode,
    /// Default: both edges.
    pub polarity: TriggerPolarity,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            sequence_id: 7,
            mode: TriggerMode::SinglePattern,
            polarity: TriggerPolarity::BothEdges,
        }
    }
}

// ── HapticConfig ─────────────────────────────────────────────────────────

/// Complete configuration for a [`HapticDriver`](crate::HapticDriver).
///
/// Passed at construction and programmed into the chip by
/// [`init()`](crate::HapticDriver::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticConfig {
    /// 7-bit I2C address. Default: 0x5A.
    pub address: u8,
    pub actuator: ActuatorConfig,
    pub trigger: TriggerConfig,
    /// Mode entered at the end of `init()`. Default: [`Mode::Register`].
    pub op_mode: Mode,
    /// ROM library. `None` picks the actuator's default library.
    pub library: Option<Library>,

    // ── Limits ───────────────────────────────────────────────────────
    /// Number of usable sequencer slots (at most 8). Default: 8.
    pub slot_count: u8,
    /// Highest accepted effect index. Default: 123.
    pub effects_max: u8,
    /// Highest accepted script index. Default: 15.
    pub scripts_max: u8,

    // ── Start-up values ──────────────────────────────────────────────
    /// Script loaded into the sequencer by `init()`. Default: 7.
    pub default_script: u8,
    /// Real-time playback value written by `init()`. Default: 0x59.
    pub realtime_value: u8,

    // ── Timing ───────────────────────────────────────────────────────
    /// Pause inserted by a script delay step. Default: 100 ms.
    pub script_delay: Duration,
    /// Polling interval while waiting for GO or DEV_RESET to clear.
    /// Default: 10 ms.
    pub poll_interval: Duration,
    /// Upper bound for calibration, diagnostics, reset and playback waits.
    /// Default: 1 s.
    pub completion_timeout: Duration,
    /// Width of a trigger pulse on the IN/TRIG pin. Default: 1 ms.
    pub trigger_pulse: Duration,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            actuator: ActuatorConfig::default(),
            trigger: TriggerConfig::default(),
            op_mode: Mode::Register,
            library: None,
            slot_count: WAVEFORM_SLOTS as u8,
            effects_max: EFFECT_MAX,
            scripts_max: SCRIPT_ID_MAX,
            default_script: 7,
            realtime_value: 0x59,
            script_delay: Duration::from_millis(100),
            poll_interval: Duration::from_millis(10),
            completion_timeout: Duration::from_millis(1000),
            trigger_pulse: Duration::from_millis(1),
        }
    }
}

impl HapticConfig {
    /// Library programmed by `init()`.
    pub fn library(&self) -> Library {
        self.library
            .unwrap_or_else(|| self.actuator.actuator.default_library())
    }

    /// Usable slot count, clamped to the chip's eight slots.
    pub fn slot_count(&self) -> u8 {
        self.slot_count.min(WAVEFORM_SLOTS as u8)
    }
}
