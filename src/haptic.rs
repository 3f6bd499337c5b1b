//! High-level interface for the DRV2605L haptic driver.
//!
//! [`HapticDriver`] wraps the low-level register driver with input
//! validation, mode handling, waveform and script helpers, and a small
//! cache of the device state so that common queries need no bus traffic.

use core::convert::Infallible;

use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::calibration::{self, CalibrationResult};
use crate::config::HapticConfig;
use crate::driver::RegisterDriver;
use crate::error::HapticError;
use crate::registers::*;
use crate::script::{Script, ScriptStep};
use crate::status::{self, DeviceStatus};
use crate::types::{ActuatorType, Library, Mode, SlotEntry};

/// Placeholder trigger pin for drivers constructed without one.
///
/// Trigger operations on a driver using this pin fail with
/// [`HapticError::NoTriggerPin`].
pub struct NoTriggerPin;

impl ErrorType for NoTriggerPin {
    type Error = Infallible;
}

impl OutputPin for NoTriggerPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// High-level interface for a DRV2605L haptic driver.
///
/// Owns the I2C bus, a delay provider and an optional IN/TRIG pin. Every
/// method awaits its bus transactions to completion before returning;
/// there are no retries, and a failed multi-step operation is not rolled
/// back.
///
/// # Example
///
/// ```no_run
/// use haptic_driver::{HapticConfig, HapticDriver};
///
/// # async fn example(
/// #     i2c: impl embedded_hal_async::i2c::I2c,
/// #     delay: impl embedded_hal_async::delay::DelayNs,
/// # ) -> Result<(), ()> {
/// let mut haptic = HapticDriver::new(i2c, delay, HapticConfig::default());
/// haptic.init().await.map_err(|_| ())?;
///
/// // Strong click, then stop
/// haptic.set_waveform(0, 1).await.map_err(|_| ())?;
/// haptic.set_waveform(1, 0).await.map_err(|_| ())?;
/// haptic.go().await.map_err(|_| ())?;
/// # Ok(())
/// # }
/// ```
pub struct HapticDriver<I2C, D, P = NoTriggerPin> {
    driver: RegisterDriver<I2C>,
    delay: D,
    trigger_pin: Option<P>,
    config: HapticConfig,

    // Cached device state
    mode: Mode,
    effect: u8,
    script: u8,
    playing: bool,
}

impl<I2C, D> HapticDriver<I2C, D, NoTriggerPin>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver without a trigger pin.
    ///
    /// No I2C traffic is generated; call [`init()`](Self::init) to program
    /// the chip.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `delay`: delay provider for script delays and polling
    /// * `config`: actuator profile and driver limits
    pub fn new(i2c: I2C, delay: D, config: HapticConfig) -> Self {
        Self::build(i2c, delay, None, config)
    }
}

impl<I2C, D, P> HapticDriver<I2C, D, P>
where
    I2C: I2c,
    D: DelayNs,
    P: OutputPin,
{
    /// Create a driver that also controls the chip's IN/TRIG pin.
    pub fn with_trigger_pin(i2c: I2C, delay: D, pin: P, config: HapticConfig) -> Self {
        Self::build(i2c, delay, Some(pin), config)
    }

    fn build(i2c: I2C, delay: D, trigger_pin: Option<P>, config: HapticConfig) -> Self {
        Self {
            driver: RegisterDriver::new(i2c, config.address),
            delay,
            trigger_pin,
            mode: config.op_mode,
            effect: 0,
            script: config.default_script,
            playing: false,
            config,
        }
    }

    /// Consume the driver and return its resources.
    pub fn release(self) -> (I2C, D, Option<P>) {
        (self.driver.release(), self.delay, self.trigger_pin)
    }

    // -----------------------------------------------------------------------
    // Cached state
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &HapticConfig {
        &self.config
    }

    pub fn address(&self) -> u8 {
        self.driver.address()
    }

    /// Mode last set through this driver.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn actuator_type(&self) -> ActuatorType {
        self.config.actuator.actuator
    }

    /// Effect most recently written with [`set_waveform`](Self::set_waveform).
    pub fn effect(&self) -> u8 {
        self.effect
    }

    pub fn effects_max(&self) -> u8 {
        self.config.effects_max
    }

    /// Script most recently selected.
    pub fn script(&self) -> u8 {
        self.script
    }

    /// Highest selectable script index.
    pub fn scripts_max(&self) -> u8 {
        self.config.scripts_max
    }

    pub fn slot_count(&self) -> u8 {
        self.config.slot_count()
    }

    /// `true` between [`go()`](Self::go) and [`stop()`](Self::stop).
    ///
    /// This only reflects the last command sent; use
    /// [`is_playing()`](Self::is_playing) to ask the chip.
    pub fn is_started(&self) -> bool {
        self.playing
    }

    // -----------------------------------------------------------------------
    // Initialisation
    // -----------------------------------------------------------------------

    /// Identify the chip and program it from the configuration.
    ///
    /// Sequence:
    /// 1. Validate the actuator profile (no bus traffic on failure).
    /// 2. Check the device ID.
    /// 3. Apply the start-up script (leave standby, load the default
    ///    script, program time offsets, library and calibration registers).
    /// 4. Enter the configured operating mode.
    ///
    /// # Errors
    /// * [`HapticError::Config`] if the actuator profile is inconsistent
    /// * [`HapticError::WrongDevice`] if the chip is not a DRV2605L
    /// * [`HapticError::I2c`] on communication failure
    pub async fn init(&mut self) -> Result<(), HapticError<I2C::Error>> {
        self.config
            .actuator
            .validate()
            .map_err(HapticError::Config)?;

        self.identify().await?;

        let script = calibration::startup_script(&self.config).map_err(HapticError::Script)?;
        self.apply_script(&script).await?;
        self.script = self.config.default_script;
        self.playing = false;

        self.set_mode(self.config.op_mode).await?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "haptic driver ready: {} in {}, library {}, coil limit {} mV",
            self.config.actuator.actuator,
            self.mode,
            self.config.library(),
            self.config.actuator.max_current_voltage_mv()
        );

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Raw register access
    // -----------------------------------------------------------------------

    /// Read one register.
    ///
    /// # Errors
    /// * [`HapticError::InvalidRegister`] if `register > 0x22`
    /// * [`HapticError::I2c`] on communication failure
    pub async fn read(&mut self, register: u8) -> Result<u8, HapticError<I2C::Error>> {
        self.driver.read_u8(register).await
    }

    /// Write one register.
    ///
    /// Raw writes bypass the cached state: writing MODE here does not
    /// update [`mode()`](Self::mode).
    pub async fn write(&mut self, register: u8, value: u8) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_u8(register, value).await
    }

    /// Read-modify-write the bits of `register` selected by `mask`.
    ///
    /// Bits outside `mask` are preserved; bits inside become `value & mask`.
    pub async fn write_bits(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_bits(register, mask, value).await
    }

    /// Write a run of consecutive registers in one transaction.
    ///
    /// # Errors
    /// * [`HapticError::InvalidRegister`] if `data` is empty or the run
    ///   extends past the last register
    /// * [`HapticError::I2c`] on communication failure
    pub async fn write_bulk(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_bulk(register, data).await
    }

    /// Read a run of consecutive registers in one transaction.
    pub async fn read_bulk(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), HapticError<I2C::Error>> {
        self.driver.read_bulk(register, buffer).await
    }

    /// Apply a script step by step.
    ///
    /// [`ScriptStep::Delay`] pauses for `config.script_delay`;
    /// [`ScriptStep::End`] stops early. The first failing write aborts the
    /// script; steps already applied stay applied.
    ///
    /// # Example
    /// ```no_run
    /// # use haptic_driver::Script;
    /// # async fn example(haptic: &mut haptic_driver::HapticDriver<impl embedded_hal_async::i2c::I2c, impl embedded_hal_async::delay::DelayNs>) {
    /// let script = Script::new().write(0x01, 0x00).unwrap().delay().unwrap();
    /// haptic.apply_script(&script).await.ok();
    /// # }
    /// ```
    pub async fn apply_script(&mut self, script: &Script) -> Result<(), HapticError<I2C::Error>> {
        for (_index, step) in script.steps().iter().enumerate() {
            let result = match *step {
                ScriptStep::Write { register, value } => {
                    self.driver.write_u8(register, value).await
                }
                ScriptStep::Update {
                    register,
                    mask,
                    value,
                } => self.driver.write_bits(register, mask, value).await,
                ScriptStep::Delay => {
                    pause(&mut self.delay, self.config.script_delay).await;
                    Ok(())
                }
                ScriptStep::End => break,
            };

            if let Err(e) = result {
                #[cfg(feature = "defmt")]
                defmt::warn!("script aborted at step {}", _index);
                return Err(e);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Identification and status
    // -----------------------------------------------------------------------

    /// Read the device ID from the status register.
    pub async fn device_id(&mut self) -> Result<u8, HapticError<I2C::Error>> {
        let value = self.driver.read_u8(STATUS).await?;
        Ok(status::device_id(value))
    }

    /// Check that the chip answers with the DRV2605L device ID.
    ///
    /// # Errors
    /// * [`HapticError::WrongDevice`] with the ID actually read
    /// * [`HapticError::I2c`] on communication failure
    pub async fn identify(&mut self) -> Result<u8, HapticError<I2C::Error>> {
        let found = self.device_id().await?;
        if found != CHIP_ID {
            #[cfg(feature = "defmt")]
            defmt::warn!("unexpected device ID {=u8}", found);
            return Err(HapticError::WrongDevice { found });
        }
        Ok(found)
    }

    /// Read and decode the status register. Reading clears the latched flags.
    pub async fn status(&mut self) -> Result<DeviceStatus, HapticError<I2C::Error>> {
        let value = self.driver.read_u8(STATUS).await?;
        Ok(DeviceStatus::from_register(value))
    }

    /// Supply voltage in mV, from the VBAT monitor.
    pub async fn supply_voltage_mv(&mut self) -> Result<u16, HapticError<I2C::Error>> {
        let value = self.driver.read_u8(VBAT).await?;
        Ok((value as u32 * 5600 / 255) as u16)
    }

    /// Measured LRA resonance period in microseconds.
    ///
    /// Only meaningful while an LRA is being driven.
    pub async fn lra_period_us(&mut self) -> Result<u16, HapticError<I2C::Error>> {
        let value = self.driver.read_u8(LRA_PERIOD).await?;
        Ok((value as u32 * 9846 / 100) as u16)
    }

    // -----------------------------------------------------------------------
    // Mode and actuator
    // -----------------------------------------------------------------------

    /// Switch the operating mode.
    ///
    /// Besides writing MODE, some modes adjust related control bits first:
    /// - [`Mode::Pwm`] selects the PWM input and DC coupling
    /// - [`Mode::Audio`] selects the analog input and AC coupling
    /// - [`Mode::Gpio`] loads the trigger sequence into the sequencer
    pub async fn set_mode(&mut self, mode: Mode) -> Result<(), HapticError<I2C::Error>> {
        match mode {
            Mode::Pwm => {
                self.driver
                    .write_bits(CONTROL3, CONTROL3_N_PWM_ANALOG, 0)
                    .await?;
                self.driver
                    .write_bits(CONTROL1, CONTROL1_AC_COUPLE, 0)
                    .await?;
            }
            Mode::Audio => {
                self.driver
                    .write_bits(CONTROL3, CONTROL3_N_PWM_ANALOG, CONTROL3_N_PWM_ANALOG)
                    .await?;
                self.driver
                    .write_bits(CONTROL1, CONTROL1_AC_COUPLE, CONTROL1_AC_COUPLE)
                    .await?;
            }
            Mode::Gpio => {
                let sequence = self.config.trigger.sequence_id;
                self.load_sequence(sequence).await?;
                self.script = sequence;
            }
            _ => {}
        }

        let value = mode.register_value(self.config.trigger.polarity);
        self.driver.write_u8(MODE, value).await?;
        self.mode = mode;

        #[cfg(feature = "defmt")]
        defmt::debug!("mode -> {} ({=u8:#x})", mode, value);

        Ok(())
    }

    /// [`set_mode`](Self::set_mode) from a raw mode index.
    ///
    /// # Errors
    /// * [`HapticError::InvalidMode`] for indices above 8, before any bus traffic
    pub async fn set_mode_index(&mut self, index: u8) -> Result<(), HapticError<I2C::Error>> {
        let mode = Mode::from_index(index).ok_or(HapticError::InvalidMode)?;
        self.set_mode(mode).await
    }

    /// Change the actuator type.
    ///
    /// Updates the actuator bit of the feedback control register and the
    /// cached configuration. Calibration registers are not reprogrammed;
    /// call [`init()`](Self::init) again for a full re-configuration.
    pub async fn set_actuator_type(
        &mut self,
        actuator: ActuatorType,
    ) -> Result<(), HapticError<I2C::Error>> {
        let bit = if actuator.is_lra() {
            FEEDBACK_N_ERM_LRA
        } else {
            0
        };
        self.driver
            .write_bits(FEEDBACK, FEEDBACK_N_ERM_LRA, bit)
            .await?;
        self.config.actuator.actuator = actuator;
        Ok(())
    }

    /// [`set_actuator_type`](Self::set_actuator_type) from a raw index.
    ///
    /// # Errors
    /// * [`HapticError::InvalidActuatorType`] for indices above 4, before any bus traffic
    pub async fn set_actuator_type_index(
        &mut self,
        index: u8,
    ) -> Result<(), HapticError<I2C::Error>> {
        let actuator = ActuatorType::from_index(index).ok_or(HapticError::InvalidActuatorType)?;
        self.set_actuator_type(actuator).await
    }

    /// Set the real-time playback value (used in [`Mode::Stream`]).
    pub async fn set_realtime_value(&mut self, value: u8) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_u8(RTP_INPUT, value).await
    }

    /// Select the ROM waveform library.
    pub async fn set_library(&mut self, library: Library) -> Result<(), HapticError<I2C::Error>> {
        self.driver
            .write_bits(LIBRARY_SEL, LIBRARY_SEL_MASK, library as u8)
            .await?;
        self.config.library = Some(library);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Waveform sequencer
    // -----------------------------------------------------------------------

    fn check_slots(&self, slot: u8, count: usize) -> Result<(), HapticError<I2C::Error>> {
        if count == 0 || slot as usize + count > self.config.slot_count() as usize {
            return Err(HapticError::InvalidSlot);
        }
        Ok(())
    }

    fn check_entry(&self, value: u8) -> Result<(), HapticError<I2C::Error>> {
        if value & WAVESEQ_WAIT == 0 && value > self.config.effects_max {
            return Err(HapticError::InvalidEffect);
        }
        Ok(())
    }

    /// Write an effect index into a sequencer slot.
    ///
    /// `effect == 0` terminates the sequence at this slot.
    ///
    /// # Errors
    /// * [`HapticError::InvalidSlot`] if `slot >= slot_count`
    /// * [`HapticError::InvalidEffect`] if `effect > effects_max`
    /// * [`HapticError::I2c`] on communication failure
    pub async fn set_waveform(&mut self, slot: u8, effect: u8) -> Result<(), HapticError<I2C::Error>> {
        self.check_slots(slot, 1)?;
        if effect > self.config.effects_max {
            return Err(HapticError::InvalidEffect);
        }

        self.driver.write_u8(WAVESEQ1 + slot, effect).await?;
        self.effect = effect;
        Ok(())
    }

    /// Put a pause of `tens_of_ms * 10` ms into a sequencer slot.
    ///
    /// # Errors
    /// * [`HapticError::InvalidSlot`] if `slot >= slot_count`
    /// * [`HapticError::InvalidEffect`] if `tens_of_ms > 127`
    pub async fn set_wait(&mut self, slot: u8, tens_of_ms: u8) -> Result<(), HapticError<I2C::Error>> {
        self.check_slots(slot, 1)?;
        if tens_of_ms > WAVESEQ_VALUE_MASK {
            return Err(HapticError::InvalidEffect);
        }
        self.driver
            .write_u8(WAVESEQ1 + slot, WAVESEQ_WAIT | tens_of_ms)
            .await
    }

    /// Read the raw entry of a sequencer slot.
    pub async fn waveform(&mut self, slot: u8) -> Result<u8, HapticError<I2C::Error>> {
        self.check_slots(slot, 1)?;
        self.driver.read_u8(WAVESEQ1 + slot).await
    }

    /// Read and decode a sequencer slot.
    pub async fn waveform_entry(&mut self, slot: u8) -> Result<SlotEntry, HapticError<I2C::Error>> {
        let value = self.waveform(slot).await?;
        Ok(SlotEntry::from_register(value))
    }

    /// Write consecutive sequencer slots starting at `start_slot` in one
    /// transaction. Entries may be effects, wait entries or terminators.
    pub async fn write_waveforms(
        &mut self,
        start_slot: u8,
        entries: &[u8],
    ) -> Result<(), HapticError<I2C::Error>> {
        self.check_slots(start_slot, entries.len())?;
        for &entry in entries {
            self.check_entry(entry)?;
        }
        self.driver.write_bulk(WAVESEQ1 + start_slot, entries).await
    }

    /// Read consecutive sequencer slots starting at `start_slot`.
    pub async fn read_waveforms(
        &mut self,
        start_slot: u8,
        entries: &mut [u8],
    ) -> Result<(), HapticError<I2C::Error>> {
        self.check_slots(start_slot, entries.len())?;
        self.driver.read_bulk(WAVESEQ1 + start_slot, entries).await
    }

    /// Load a single-entry sequence: `id` in the first slot, a terminator
    /// in the second.
    async fn load_sequence(&mut self, id: u8) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_bulk(WAVESEQ1, &[id, 0]).await
    }

    // -----------------------------------------------------------------------
    // Scripts and playback
    // -----------------------------------------------------------------------

    /// Select a pre-programmed sequence for the next [`play_script()`](Self::play_script).
    ///
    /// # Errors
    /// * [`HapticError::InvalidScript`] if `index > scripts_max`
    /// * [`HapticError::I2c`] on communication failure
    pub async fn select_script(&mut self, index: u8) -> Result<(), HapticError<I2C::Error>> {
        if index > self.config.scripts_max {
            return Err(HapticError::InvalidScript);
        }
        self.load_sequence(index).await?;
        self.script = index;
        Ok(())
    }

    /// Start playback of the selected sequence.
    ///
    /// Playback runs on the chip; poll [`is_playing()`](Self::is_playing)
    /// or [`wait_for_completion()`](Self::wait_for_completion) to find out
    /// when it ends.
    pub async fn play_script(&mut self) -> Result<(), HapticError<I2C::Error>> {
        self.go().await
    }

    /// Select a sequence and start it.
    pub async fn play_script_index(&mut self, index: u8) -> Result<(), HapticError<I2C::Error>> {
        self.select_script(index).await?;
        self.play_script().await
    }

    /// Set the GO bit. One write transaction.
    pub async fn go(&mut self) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_u8(GO, GO_BIT).await?;
        self.playing = true;
        Ok(())
    }

    /// Clear the GO bit, cancelling playback. One write transaction.
    pub async fn stop(&mut self) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_u8(GO, 0).await?;
        self.playing = false;
        Ok(())
    }

    /// Ask the chip whether playback (or calibration/diagnostics) is running.
    pub async fn is_playing(&mut self) -> Result<bool, HapticError<I2C::Error>> {
        let value = self.driver.read_u8(GO).await?;
        Ok(value & GO_BIT != 0)
    }

    /// Poll the GO bit every `config.poll_interval` until it clears.
    ///
    /// # Errors
    /// * [`HapticError::Timeout`] if GO is still set after `timeout`
    /// * [`HapticError::I2c`] on communication failure
    pub async fn wait_for_completion(
        &mut self,
        timeout: Duration,
    ) -> Result<(), HapticError<I2C::Error>> {
        self.poll_until_clear(GO, GO_BIT, timeout).await?;
        self.playing = false;
        Ok(())
    }

    async fn poll_until_clear(
        &mut self,
        register: u8,
        mask: u8,
        timeout: Duration,
    ) -> Result<(), HapticError<I2C::Error>> {
        // A zero interval would never advance `waited`.
        let interval = self.config.poll_interval.max(Duration::from_micros(1));
        let mut waited = Duration::from_ticks(0);
        loop {
            if self.driver.read_u8(register).await? & mask == 0 {
                return Ok(());
            }
            if waited >= timeout {
                return Err(HapticError::Timeout);
            }
            pause(&mut self.delay, interval).await;
            waited += interval;
        }
    }

    // -----------------------------------------------------------------------
    // Calibration and diagnostics
    // -----------------------------------------------------------------------

    /// Run a self-timed routine (calibration or diagnostics) and return the
    /// decoded status it left behind. The previous mode is restored.
    async fn run_routine(&mut self, mode: Mode) -> Result<DeviceStatus, HapticError<I2C::Error>> {
        let previous = self.mode;
        self.set_mode(mode).await?;
        self.go().await?;
        self.wait_for_completion(self.config.completion_timeout)
            .await?;
        let status = self.status().await?;
        self.set_mode(previous).await?;
        Ok(status)
    }

    /// Run the chip's auto-calibration for the configured actuator.
    ///
    /// Calibration takes 0.5–1.2 s depending on CONTROL4; size
    /// `config.completion_timeout` accordingly.
    ///
    /// # Errors
    /// * [`HapticError::CalibrationFailed`] if the routine did not converge
    /// * [`HapticError::Timeout`] if GO did not clear in time
    /// * [`HapticError::I2c`] on communication failure
    pub async fn auto_calibrate(&mut self) -> Result<CalibrationResult, HapticError<I2C::Error>> {
        let status = self.run_routine(Mode::Calibrate).await?;
        if status.diag_failed {
            #[cfg(feature = "defmt")]
            defmt::warn!("auto-calibration failed");
            return Err(HapticError::CalibrationFailed);
        }

        let result = CalibrationResult {
            compensation: self.driver.read_u8(A_CAL_COMP).await?,
            back_emf: self.driver.read_u8(A_CAL_BEMF).await?,
            bemf_gain: self.driver.read_u8(FEEDBACK).await? & FEEDBACK_BEMF_GAIN_MASK,
        };

        #[cfg(feature = "defmt")]
        defmt::info!("auto-calibration done: {}", result);

        Ok(result)
    }

    /// Run the actuator diagnostics.
    ///
    /// # Errors
    /// * [`HapticError::DiagnosticFailed`] if the actuator is missing,
    ///   shorted or out of range
    pub async fn run_diagnostics(&mut self) -> Result<(), HapticError<I2C::Error>> {
        let status = self.run_routine(Mode::Diagnostic).await?;
        if status.diag_failed {
            return Err(HapticError::DiagnosticFailed);
        }
        Ok(())
    }

    /// Software reset. The chip comes back in standby with default
    /// registers; call [`init()`](Self::init) afterwards.
    pub async fn reset(&mut self) -> Result<(), HapticError<I2C::Error>> {
        self.driver.write_u8(MODE, MODE_DEV_RESET).await?;
        self.poll_until_clear(MODE, MODE_DEV_RESET, self.config.completion_timeout)
            .await?;
        self.mode = Mode::Sleep;
        self.playing = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Trigger pin
    // -----------------------------------------------------------------------

    /// Drive the IN/TRIG pin to its asserted (`true`) or idle level, as
    /// defined by the configured trigger polarity.
    ///
    /// # Errors
    /// * [`HapticError::NoTriggerPin`] if the driver has no trigger pin
    /// * [`HapticError::Pin`] if the pin could not be driven
    pub fn set_trigger(&mut self, asserted: bool) -> Result<(), HapticError<I2C::Error>> {
        let high = asserted == self.config.trigger.polarity.active_high();
        let pin = self
            .trigger_pin
            .as_mut()
            .ok_or(HapticError::NoTriggerPin)?;
        let result = if high { pin.set_high() } else { pin.set_low() };
        result.map_err(|_| HapticError::Pin)
    }

    /// Pulse the IN/TRIG pin for `config.trigger_pulse`.
    pub async fn fire_trigger(&mut self) -> Result<(), HapticError<I2C::Error>> {
        self.set_trigger(true)?;
        pause(&mut self.delay, self.config.trigger_pulse).await;
        self.set_trigger(false)
    }
}

/// Wait for `duration`, saturating at the delay provider's u32 range.
async fn pause<D: DelayNs>(delay: &mut D, duration: Duration) {
    let us = duration.as_micros().min(u32::MAX as u64) as u32;
    delay.delay_us(us).await;
}
