//! Decoded status register.

use crate::registers::{
    STATUS_DEVICE_ID_MASK, STATUS_DEVICE_ID_SHIFT, STATUS_DIAG_RESULT, STATUS_FB_STS,
    STATUS_OC_DETECT, STATUS_OVER_TEMP,
};

/// Snapshot of the STATUS register.
///
/// Reading STATUS clears the diagnostic, feedback and over-temperature
/// flags, so a snapshot is the only record of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    /// Part number (7 for the DRV2605L).
    pub device_id: u8,
    /// Last auto-calibration or diagnostic run failed.
    pub diag_failed: bool,
    /// Feedback controller lost back-EMF (ERM) or frequency lock (LRA).
    pub feedback_timeout: bool,
    pub over_temperature: bool,
    pub over_current: bool,
}

impl DeviceStatus {
    pub fn from_register(value: u8) -> Self {
        Self {
            device_id: device_id(value),
            diag_failed: value & STATUS_DIAG_RESULT != 0,
            feedback_timeout: value & STATUS_FB_STS != 0,
            over_temperature: value & STATUS_OVER_TEMP != 0,
            over_current: value & STATUS_OC_DETECT != 0,
        }
    }

    /// `true` when any fault flag is set.
    pub fn has_fault(&self) -> bool {
        self.over_temperature || self.over_current
    }
}

/// Extract the device ID field from a raw STATUS value.
pub(crate) fn device_id(status: u8) -> u8 {
    (status & STATUS_DEVICE_ID_MASK) >> STATUS_DEVICE_ID_SHIFT
}
