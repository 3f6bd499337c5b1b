//! DRV2605L register map and protocol constants.
//!
//! The chip exposes a flat 8-bit register file. Every address below is a
//! single byte; multi-byte transfers auto-increment the register pointer.
//! Bit masks are listed next to the register they belong to.

// ---------------------------------------------------------------------------
// Status / control
// ---------------------------------------------------------------------------

/// Status register (read-only). Device ID in bits 7:5, flags in 3:0.
pub const STATUS: u8 = 0x00;

/// Device identifier field of [`STATUS`].
pub const STATUS_DEVICE_ID_MASK: u8 = 0xE0;
pub const STATUS_DEVICE_ID_SHIFT: u8 = 5;
/// Auto-calibration / diagnostic result. Clears on read.
pub const STATUS_DIAG_RESULT: u8 = 1 << 3;
/// Feedback controller timed out. Clears on read.
pub const STATUS_FB_STS: u8 = 1 << 2;
pub const STATUS_OVER_TEMP: u8 = 1 << 1;
pub const STATUS_OC_DETECT: u8 = 1 << 0;

/// Mode register.
pub const MODE: u8 = 0x01;

/// Software reset. Self-clears once the reset completes.
pub const MODE_DEV_RESET: u8 = 1 << 7;
/// Software standby (lowest-power state).
pub const MODE_STANDBY: u8 = 1 << 6;
/// Operating mode field.
pub const MODE_MASK: u8 = 0x07;

/// Real-time playback input.
pub const RTP_INPUT: u8 = 0x02;

/// Library selection register.
pub const LIBRARY_SEL: u8 = 0x03;
pub const LIBRARY_SEL_MASK: u8 = 0x07;
pub const LIBRARY_HI_Z: u8 = 1 << 4;

// ---------------------------------------------------------------------------
// Waveform sequencer
// ---------------------------------------------------------------------------

/// First waveform sequencer slot. Slots are contiguous: `WAVESEQ1 + slot`.
pub const WAVESEQ1: u8 = 0x04;

/// Wait flag in a sequencer slot: the lower 7 bits are a delay in 10 ms units.
pub const WAVESEQ_WAIT: u8 = 1 << 7;
pub const WAVESEQ_VALUE_MASK: u8 = 0x7F;

/// GO register. Bit 0 starts playback and self-clears when it ends.
pub const GO: u8 = 0x0C;
pub const GO_BIT: u8 = 1 << 0;

// ---------------------------------------------------------------------------
// Time offsets
// ---------------------------------------------------------------------------

pub const OVERDRIVE_TIME_OFFSET: u8 = 0x0D;
pub const SUSTAIN_TIME_OFFSET_POS: u8 = 0x0E;
pub const SUSTAIN_TIME_OFFSET_NEG: u8 = 0x0F;
pub const BRAKE_TIME_OFFSET: u8 = 0x10;

// ---------------------------------------------------------------------------
// Audio-to-vibe
// ---------------------------------------------------------------------------

pub const ATV_CONTROL: u8 = 0x11;
pub const ATV_MIN_INPUT: u8 = 0x12;
pub const ATV_MAX_INPUT: u8 = 0x13;
pub const ATV_MIN_OUTPUT: u8 = 0x14;
pub const ATV_MAX_OUTPUT: u8 = 0x15;

// ---------------------------------------------------------------------------
// Calibration
// ---------------------------------------------------------------------------

pub const RATED_VOLTAGE: u8 = 0x16;
pub const OVERDRIVE_CLAMP: u8 = 0x17;
/// Auto-calibration compensation result.
pub const A_CAL_COMP: u8 = 0x18;
/// Auto-calibration back-EMF result.
pub const A_CAL_BEMF: u8 = 0x19;

/// Feedback control register.
pub const FEEDBACK: u8 = 0x1A;
/// Actuator type: set for LRA, clear for ERM.
pub const FEEDBACK_N_ERM_LRA: u8 = 1 << 7;
pub const FEEDBACK_BRAKE_FACTOR_SHIFT: u8 = 4;
pub const FEEDBACK_LOOP_GAIN_SHIFT: u8 = 2;
pub const FEEDBACK_BEMF_GAIN_MASK: u8 = 0x03;

pub const CONTROL1: u8 = 0x1B;
pub const CONTROL1_STARTUP_BOOST: u8 = 1 << 7;
pub const CONTROL1_AC_COUPLE: u8 = 1 << 5;
pub const CONTROL1_DRIVE_TIME_MASK: u8 = 0x1F;

pub const CONTROL2: u8 = 0x1C;
pub const CONTROL2_BIDIR_INPUT: u8 = 1 << 7;
pub const CONTROL2_BRAKE_STABILIZER: u8 = 1 << 6;
/// SAMPLE_TIME = 300 us, BLANKING_TIME = 1, IDISS_TIME = 1 (datasheet defaults).
pub const CONTROL2_TIMING_DEFAULT: u8 = 0x35;

pub const CONTROL3: u8 = 0x1D;
/// Noise-gate threshold of 4% (datasheet default).
pub const CONTROL3_NG_THRESH_DEFAULT: u8 = 0x80;
pub const CONTROL3_ERM_OPEN_LOOP: u8 = 1 << 5;
pub const CONTROL3_N_PWM_ANALOG: u8 = 1 << 1;
pub const CONTROL3_LRA_OPEN_LOOP: u8 = 1 << 0;

pub const CONTROL4: u8 = 0x1E;
pub const CONTROL5: u8 = 0x1F;

pub const LRA_OPEN_LOOP_PERIOD: u8 = 0x20;
/// Supply voltage monitor: `VBAT * 5.6 V / 255`.
pub const VBAT: u8 = 0x21;
/// LRA resonance period: `LRA_PERIOD * 98.46 us`.
pub const LRA_PERIOD: u8 = 0x22;

/// Highest valid register address.
pub const LAST_REGISTER: u8 = LRA_PERIOD;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address of the DRV2605/DRV2605L.
pub const DEFAULT_ADDRESS: u8 = 0x5A;

/// Device ID reported by the DRV2605L in [`STATUS`] bits 7:5.
pub const CHIP_ID: u8 = 0x07;

/// Number of waveform sequencer slots on the chip.
pub const WAVEFORM_SLOTS: usize = 8;

/// Highest effect index in the ROM libraries.
pub const EFFECT_MAX: u8 = 123;

/// Highest pre-programmed sequence ID that may be selected as a script.
pub const SCRIPT_ID_MAX: u8 = 15;

/// Maximum number of steps in a [`Script`](crate::Script).
pub const SCRIPT_MAX: usize = 16;

/// Register marker for a delay step in a sentinel-terminated script table.
pub const SCRIPT_DELAY: u8 = 0xFE;

/// Register marker for the end of a sentinel-terminated script table.
pub const SCRIPT_END: u8 = 0xFF;
