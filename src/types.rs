//! Closed enumerations for operating modes, actuators, libraries and the
//! external trigger input.
//!
//! Raw indices from outside the crate are converted with the `from_index`
//! constructors, which return `None` for anything outside the known set.

use crate::registers::{MODE_STANDBY, WAVESEQ_VALUE_MASK, WAVESEQ_WAIT};

/// Driver operating mode.
///
/// The discriminants are the driver's own mode indices, not the values of
/// the chip's MODE field; [`Mode::register_value`] performs that mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Idle; nothing plays until the mode changes.
    Inactive = 0,
    /// Direct register override: the RTP input byte drives the actuator.
    Stream = 1,
    /// Streaming from the PWM input on the IN/TRIG pin.
    Pwm = 2,
    /// Waveform memory playback started by writing GO.
    Register = 3,
    /// Waveform memory playback started by the IN/TRIG pin (or GO).
    Gpio = 4,
    /// Audio input converted to vibration.
    Audio = 5,
    /// Actuator diagnostics.
    Diagnostic = 6,
    /// Auto-calibration.
    Calibrate = 7,
    /// Software standby.
    Sleep = 8,
}

impl Mode {
    /// All modes in index order.
    pub const ALL: [Mode; 9] = [
        Mode::Inactive,
        Mode::Stream,
        Mode::Pwm,
        Mode::Register,
        Mode::Gpio,
        Mode::Audio,
        Mode::Diagnostic,
        Mode::Calibrate,
        Mode::Sleep,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Value written to the MODE register for this mode.
    ///
    /// `trigger` picks between edge (`0x01`) and level (`0x02`) external
    /// triggering for [`Mode::Gpio`].
    pub fn register_value(self, trigger: TriggerPolarity) -> u8 {
        match self {
            Mode::Inactive | Mode::Register => 0x00,
            Mode::Gpio => {
                if trigger.is_level() {
                    0x02
                } else {
                    0x01
                }
            }
            Mode::Pwm => 0x03,
            Mode::Audio => 0x04,
            Mode::Stream => 0x05,
            Mode::Diagnostic => 0x06,
            Mode::Calibrate => 0x07,
            Mode::Sleep => MODE_STANDBY,
        }
    }
}

/// Actuator attached to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorType {
    /// Linear resonant actuator.
    Lra = 0,
    /// Eccentric rotating mass.
    Erm = 1,
    /// Coin-style ERM.
    ErmCoin = 2,
    /// ERM with a direct-mount adapter.
    ErmDma = 3,
    /// LRA with a direct-mount adapter.
    LraDma = 4,
}

impl ActuatorType {
    pub const ALL: [ActuatorType; 5] = [
        ActuatorType::Lra,
        ActuatorType::Erm,
        ActuatorType::ErmCoin,
        ActuatorType::ErmDma,
        ActuatorType::LraDma,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// `true` for resonant actuators, which need the LRA feedback loop.
    pub fn is_lra(self) -> bool {
        matches!(self, ActuatorType::Lra | ActuatorType::LraDma)
    }

    /// ROM library that best matches this actuator.
    pub fn default_library(self) -> Library {
        if self.is_lra() {
            Library::Lra
        } else {
            Library::A
        }
    }
}

/// ROM waveform library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Library {
    Empty = 0,
    /// TS2200 library A (ERM, 1.3 V rated).
    A = 1,
    B = 2,
    C = 3,
    D = 4,
    E = 5,
    /// LRA library.
    Lra = 6,
    /// TS2200 library F (ERM, 4.5 V rated).
    F = 7,
}

impl Library {
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Library::Empty),
            1 => Some(Library::A),
            2 => Some(Library::B),
            3 => Some(Library::C),
            4 => Some(Library::D),
            5 => Some(Library::E),
            6 => Some(Library::Lra),
            7 => Some(Library::F),
            _ => None,
        }
    }
}

/// How a trigger on the IN/TRIG pin selects what to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerMode {
    /// Each trigger plays the configured single sequence.
    #[default]
    SinglePattern,
}

/// Active edge or level of the IN/TRIG pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerPolarity {
    RisingEdge,
    FallingEdge,
    #[default]
    BothEdges,
    LevelHigh,
    LevelLow,
}

impl TriggerPolarity {
    /// Level-sensitive polarities select the chip's external level mode.
    pub fn is_level(self) -> bool {
        matches!(self, TriggerPolarity::LevelHigh | TriggerPolarity::LevelLow)
    }

    /// Pin level that asserts the trigger.
    pub fn active_high(self) -> bool {
        !matches!(self, TriggerPolarity::FallingEdge | TriggerPolarity::LevelLow)
    }
}

/// One waveform sequencer slot entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotEntry {
    /// End of the sequence.
    Stop,
    /// Play a library effect.
    Effect(u8),
    /// Pause for the given number of 10 ms ticks.
    Wait(u8),
}

impl SlotEntry {
    pub fn from_register(value: u8) -> Self {
        if value & WAVESEQ_WAIT != 0 {
            SlotEntry::Wait(value & WAVESEQ_VALUE_MASK)
        } else if value == 0 {
            SlotEntry::Stop
        } else {
            SlotEntry::Effect(value)
        }
    }
}
