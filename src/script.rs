//! Register-write scripts.
//!
//! A [`Script`] is a bounded, ordered list of register writes that
//! [`HapticDriver::apply_script`](crate::HapticDriver::apply_script) replays
//! in order. Scripts are validated while they are built, so applying one
//! only ever fails on the bus.
//!
//! Tables in the classic `(register, value)` form with `0xFE` (delay) and
//! `0xFF` (end) markers can be converted with [`Script::from_table`].

use heapless::Vec;

use crate::error::ScriptError;
use crate::registers::{LAST_REGISTER, SCRIPT_DELAY, SCRIPT_END, SCRIPT_MAX};

/// One script step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScriptStep {
    /// Write `value` to `register`.
    Write { register: u8, value: u8 },
    /// Read-modify-write: replace the bits selected by `mask` with `value & mask`.
    Update { register: u8, mask: u8, value: u8 },
    /// Pause for the configured script delay.
    Delay,
    /// Stop; later steps are not applied.
    End,
}

impl ScriptStep {
    fn register(&self) -> Option<u8> {
        match self {
            ScriptStep::Write { register, .. } | ScriptStep::Update { register, .. } => {
                Some(*register)
            }
            ScriptStep::Delay | ScriptStep::End => None,
        }
    }
}

/// Ordered register writes, at most [`SCRIPT_MAX`] steps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<ScriptStep, SCRIPT_MAX>,
}

impl Script {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step.
    ///
    /// # Errors
    /// * [`ScriptError::InvalidRegister`] if the step targets a register
    ///   outside the chip's memory map
    /// * [`ScriptError::Full`] if the script already has [`SCRIPT_MAX`] steps
    pub fn push(&mut self, step: ScriptStep) -> Result<(), ScriptError> {
        if let Some(register) = step.register() {
            if register > LAST_REGISTER {
                return Err(ScriptError::InvalidRegister(register));
            }
        }
        self.steps.push(step).map_err(|_| ScriptError::Full)
    }

    /// Builder-style [`push`](Self::push) of a [`ScriptStep::Write`].
    pub fn write(mut self, register: u8, value: u8) -> Result<Self, ScriptError> {
        self.push(ScriptStep::Write { register, value })?;
        Ok(self)
    }

    /// Builder-style [`push`](Self::push) of a [`ScriptStep::Update`].
    pub fn update(mut self, register: u8, mask: u8, value: u8) -> Result<Self, ScriptError> {
        self.push(ScriptStep::Update {
            register,
            mask,
            value,
        })?;
        Ok(self)
    }

    /// Builder-style [`push`](Self::push) of a [`ScriptStep::Delay`].
    pub fn delay(mut self) -> Result<Self, ScriptError> {
        self.push(ScriptStep::Delay)?;
        Ok(self)
    }

    /// Convert a sentinel-terminated `(register, value)` table.
    ///
    /// A `0xFE` register is a delay step and a `0xFF` register ends the
    /// table. The end marker is not stored and anything after it is
    /// ignored, so a full table of [`SCRIPT_MAX`] entries may still carry
    /// its marker. A table without an end marker is converted in full.
    ///
    /// # Example
    /// ```
    /// use haptic_driver::{Script, ScriptStep};
    ///
    /// let script = Script::from_table(&[(0x01, 0x00), (0xFE, 0), (0x0C, 0x01), (0xFF, 0)]).unwrap();
    /// assert_eq!(script.len(), 3);
    /// assert_eq!(script.steps()[1], ScriptStep::Delay);
    /// ```
    pub fn from_table(table: &[(u8, u8)]) -> Result<Self, ScriptError> {
        let mut script = Script::new();
        for &(register, value) in table {
            match register {
                SCRIPT_DELAY => script.push(ScriptStep::Delay)?,
                SCRIPT_END => break,
                _ => script.push(ScriptStep::Write { register, value })?,
            }
        }
        Ok(script)
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
