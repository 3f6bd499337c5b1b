//! Low-level register access for the DRV2605L.
//!
//! Implements the I2C primitives the chip understands: a write transaction
//! carries the register address followed by one or more data bytes, and a
//! read is a write of the register address followed by a repeated-start read.
//! The register pointer auto-increments, which the bulk helpers rely on.
//!
//! This module is crate-private; consumers interact with
//! [`HapticDriver`](crate::HapticDriver) instead.

use embedded_hal_async::i2c::I2c;

use crate::error::HapticError;
use crate::registers::LAST_REGISTER;

/// Length of the register file, `0x00..=LAST_REGISTER`.
const REGISTER_FILE_LEN: usize = LAST_REGISTER as usize + 1;

/// Low-level register driver.
///
/// Owns an I2C peripheral and the chip's 7-bit address. No state is cached
/// here; every call is exactly the bus traffic it describes.
pub(crate) struct RegisterDriver<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> RegisterDriver<I2C>
where
    I2C: I2c,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c`: I2C peripheral (takes ownership for exclusive access)
    /// * `address`: 7-bit I2C device address (typically 0x5A)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the I2C peripheral back to the caller.
    pub fn release(self) -> I2C {
        self.i2c
    }

    // -----------------------------------------------------------------------
    // Single-register primitives
    // -----------------------------------------------------------------------

    /// Read one register.
    pub async fn read_u8(&mut self, register: u8) -> Result<u8, HapticError<I2C::Error>> {
        check_range(register, 1)?;

        let mut buf = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .await?;
        Ok(buf[0])
    }

    /// Write one register in a single two-byte transaction.
    pub async fn write_u8(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), HapticError<I2C::Error>> {
        check_range(register, 1)?;

        self.i2c.write(self.address, &[register, value]).await?;
        Ok(())
    }

    /// Read-modify-write of the bits selected by `mask`.
    ///
    /// Bits outside `mask` keep their current value; bits inside become
    /// `value & mask`. The read and the write are two separate transactions,
    /// so a concurrent writer on the same register can lose its update.
    pub async fn write_bits(
        &mut self,
        register: u8,
        mask: u8,
        value: u8,
    ) -> Result<(), HapticError<I2C::Error>> {
        let current = self.read_u8(register).await?;
        let updated = (current & !mask) | (value & mask);
        self.write_u8(register, updated).await
    }

    // -----------------------------------------------------------------------
    // Bulk primitives
    // -----------------------------------------------------------------------

    /// Write a contiguous run of registers starting at `register`.
    ///
    /// The whole run goes out in one write transaction:
    /// `[register, data[0], data[1], ...]`.
    pub async fn write_bulk(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), HapticError<I2C::Error>> {
        check_range(register, data.len())?;

        // Full write buffer: [register, d0, d1, ...]
        let mut buf = [0u8; REGISTER_FILE_LEN + 1];
        buf[0] = register;
        buf[1..=data.len()].copy_from_slice(data);

        self.i2c
            .write(self.address, &buf[..=data.len()])
            .await?;
        Ok(())
    }

    /// Read a contiguous run of registers starting at `register`.
    pub async fn read_bulk(
        &mut self,
        register: u8,
        buffer: &mut [u8],
    ) -> Result<(), HapticError<I2C::Error>> {
        check_range(register, buffer.len())?;

        self.i2c
            .write_read(self.address, &[register], buffer)
            .await?;
        Ok(())
    }
}

/// Reject accesses that start or end outside the register file.
///
/// Zero-length runs are rejected too; they would be an address-only write
/// that the chip treats as a pointer update.
fn check_range<E>(register: u8, len: usize) -> Result<(), HapticError<E>> {
    let start = register as usize;
    if len == 0 || start + len > REGISTER_FILE_LEN {
        return Err(HapticError::InvalidRegister);
    }
    Ok(())
}
