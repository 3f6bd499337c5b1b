//! Simulated DRV2605L for integration tests.
//!
//! [`FakeChip`] implements the async I2C trait on top of an in-memory
//! register file and records every transaction, so tests can check both
//! the resulting register state and the exact bus traffic.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use haptic_driver::registers::*;
use haptic_driver::{HapticConfig, HapticDriver};

pub const REGISTER_FILE_LEN: usize = LAST_REGISTER as usize + 1;

/// One recorded bus transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { register: u8, data: Vec<u8> },
    Read { register: u8, len: usize },
}

impl Transaction {
    pub fn write(register: u8, value: u8) -> Self {
        Transaction::Write {
            register,
            data: vec![value],
        }
    }

    pub fn read(register: u8) -> Self {
        Transaction::Read { register, len: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError;

impl i2c::Error for FakeBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)
    }
}

/// Shared chip state, inspectable while the driver owns the bus.
#[derive(Debug)]
pub struct ChipState {
    pub address: u8,
    pub registers: [u8; REGISTER_FILE_LEN],
    pub log: Vec<Transaction>,
    /// Number of transactions attempted so far, including failed ones.
    pub attempts: usize,
    /// Fail the transaction with this attempt index.
    pub fail_at: Option<usize>,
    /// Reads of GO that still report busy before it self-clears.
    /// `None` keeps GO set until it is written back to zero.
    pub go_busy_reads: Option<u32>,
    /// Reads of MODE that still report DEV_RESET before it clears.
    pub reset_busy_reads: u32,
    /// Outcome of a calibration or diagnostic routine.
    pub routine_fails: bool,
    /// A_CAL_COMP / A_CAL_BEMF / back-EMF gain left by auto-calibration.
    pub calibration: (u8, u8, u8),
}

impl ChipState {
    fn power_on() -> Self {
        let mut registers = [0u8; REGISTER_FILE_LEN];
        registers[STATUS as usize] = CHIP_ID << 5;
        registers[MODE as usize] = MODE_STANDBY;
        registers[LIBRARY_SEL as usize] = 0x01;
        registers[FEEDBACK as usize] = 0x36;
        registers[CONTROL1 as usize] = 0x93;
        registers[CONTROL2 as usize] = 0xF5;
        registers[CONTROL3 as usize] = 0xA0;
        registers[CONTROL4 as usize] = 0x20;
        registers[CONTROL5 as usize] = 0x80;
        registers[LRA_OPEN_LOOP_PERIOD as usize] = 0x33;

        Self {
            address: DEFAULT_ADDRESS,
            registers,
            log: Vec::new(),
            attempts: 0,
            fail_at: None,
            go_busy_reads: None,
            reset_busy_reads: 0,
            routine_fails: false,
            calibration: (0x0D, 0x6D, 0x02),
        }
    }

    fn store(&mut self, register: u8, value: u8) {
        match register {
            // Read-only
            STATUS | VBAT | LRA_PERIOD => {}
            _ => self.registers[register as usize] = value,
        }
    }

    fn load(&mut self, register: u8) -> u8 {
        match register {
            STATUS => {
                let value = self.registers[STATUS as usize];
                // Diagnostic, feedback and over-temperature flags clear on read.
                self.registers[STATUS as usize] &= !0x0E;
                value
            }
            GO => {
                if self.registers[GO as usize] & GO_BIT != 0 {
                    self.tick_go();
                }
                self.registers[GO as usize]
            }
            MODE => {
                if self.registers[MODE as usize] & MODE_DEV_RESET != 0 {
                    if self.reset_busy_reads == 0 {
                        self.registers[MODE as usize] = MODE_STANDBY;
                    } else {
                        self.reset_busy_reads -= 1;
                    }
                }
                self.registers[MODE as usize]
            }
            _ => self.registers[register as usize],
        }
    }

    fn tick_go(&mut self) {
        match self.go_busy_reads {
            Some(0) => {
                self.registers[GO as usize] = 0;
                self.finish_routine();
            }
            Some(n) => self.go_busy_reads = Some(n - 1),
            None => {}
        }
    }

    fn finish_routine(&mut self) {
        let mode = self.registers[MODE as usize] & MODE_MASK;
        if mode != 0x06 && mode != 0x07 {
            return;
        }
        if self.routine_fails {
            self.registers[STATUS as usize] |= STATUS_DIAG_RESULT;
        }
        if mode == 0x07 && !self.routine_fails {
            let (comp, bemf, gain) = self.calibration;
            self.registers[A_CAL_COMP as usize] = comp;
            self.registers[A_CAL_BEMF as usize] = bemf;
            let feedback = self.registers[FEEDBACK as usize];
            self.registers[FEEDBACK as usize] = (feedback & !FEEDBACK_BEMF_GAIN_MASK) | gain;
        }
    }
}

/// Simulated chip, handed to the driver as its I2C bus.
#[derive(Clone)]
pub struct FakeChip {
    pub state: Rc<RefCell<ChipState>>,
}

impl FakeChip {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ChipState::power_on())),
        }
    }

    pub fn reg(&self, register: u8) -> u8 {
        self.state.borrow().registers[register as usize]
    }

    pub fn set_reg(&self, register: u8, value: u8) {
        self.state.borrow_mut().registers[register as usize] = value;
    }

    pub fn log(&self) -> Vec<Transaction> {
        self.state.borrow().log.clone()
    }

    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    /// Fail the `n`-th transaction from now (0 = the next one).
    pub fn fail_after(&self, n: usize) {
        let mut state = self.state.borrow_mut();
        state.fail_at = Some(state.attempts + n);
    }
}

impl ErrorType for FakeChip {
    type Error = FakeBusError;
}

impl I2c for FakeChip {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        let attempt = state.attempts;
        state.attempts += 1;
        if address != state.address || state.fail_at == Some(attempt) {
            return Err(FakeBusError);
        }

        match operations {
            [Operation::Write(bytes)] => {
                let register = bytes[0];
                let data = bytes[1..].to_vec();
                for (offset, &value) in data.iter().enumerate() {
                    state.store(register + offset as u8, value);
                }
                state.log.push(Transaction::Write { register, data });
            }
            [Operation::Write(bytes), Operation::Read(buffer)] => {
                let register = bytes[0];
                for (offset, slot) in buffer.iter_mut().enumerate() {
                    *slot = state.load(register + offset as u8);
                }
                let len = buffer.len();
                state.log.push(Transaction::Read { register, len });
            }
            other => panic!("unexpected I2C operation sequence ({} ops)", other.len()),
        }
        Ok(())
    }
}

/// Delay provider that records requested delays instead of sleeping.
#[derive(Clone, Default)]
pub struct FakeDelay {
    pub calls: Rc<RefCell<Vec<u32>>>,
}

impl FakeDelay {
    pub fn total_us(&self) -> u64 {
        self.calls.borrow().iter().map(|&ns| ns as u64 / 1000).sum()
    }

    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls.borrow_mut().push(ns);
    }
}

/// Output pin that records every level it is driven to.
#[derive(Clone, Default)]
pub struct FakePin {
    pub levels: Rc<RefCell<Vec<bool>>>,
}

impl FakePin {
    pub fn history(&self) -> Vec<bool> {
        self.levels.borrow().clone()
    }
}

impl PinErrorType for FakePin {
    type Error = core::convert::Infallible;
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.borrow_mut().push(true);
        Ok(())
    }
}

pub type TestDriver = HapticDriver<FakeChip, FakeDelay>;

/// Driver with the default configuration on a fresh simulated chip.
pub fn setup() -> (TestDriver, FakeChip, FakeDelay) {
    setup_with(HapticConfig::default())
}

pub fn setup_with(config: HapticConfig) -> (TestDriver, FakeChip, FakeDelay) {
    let chip = FakeChip::new();
    let delay = FakeDelay::default();
    let driver = HapticDriver::new(chip.clone(), delay.clone(), config);
    (driver, chip, delay)
}
