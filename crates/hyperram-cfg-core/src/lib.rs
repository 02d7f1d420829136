//! This is the backend library logic for hyperram-cfg.
//!
//! It turns a HyperRAM memory geometry into the list of `mww` register writes
//! that configure a HyperBus controller. Nothing here touches the filesystem,
//! so the result can be written anywhere that implements [`std::io::Write`].

use crate::{
    address_range::{address_ranges, range_instructions},
    geometry::Geometry,
    instruction::Instruction,
    registers::ConfigRegisters,
};
use std::io::Write;

use log::*;
use thiserror::Error;

pub mod address_range;
pub mod geometry;
pub mod instruction;
pub mod registers;

/// Everything needed to configure one HyperBus controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HyperRamParams {
    /// Total size in bytes across all chips
    pub hyperram_size: u64,
    pub which_phy: u64,
    /// Either 1 or 2
    pub phys_in_use: u64,
    pub address_space: u64,
    pub cfg_base_addr: u64,
    pub memory_base_addr: u64,
    pub chip_count: u64,
    /// Initial access latency in clock cycles
    pub t_latency_access: u64,
}

impl HyperRamParams {
    /// Rejects parameters the controller cannot be configured from.
    ///
    /// Geometries that truncate (a size that doesn't divide evenly, or an odd
    /// chip count) are accepted with a warning, the truncated result is what
    /// existing boards have been configured with.
    pub fn validate(&self) -> Result<(), HyperRamCfgError> {
        if self.chip_count == 0 {
            return Err(HyperRamCfgError::InvalidParameter(
                "the number of chips must be at least 1".to_string(),
            ));
        }

        if !matches!(self.phys_in_use, 1 | 2) {
            return Err(HyperRamCfgError::InvalidParameter(format!(
                "phys in use must be 1 or 2 (not {})",
                self.phys_in_use
            )));
        }

        if self.hyperram_size % self.chip_count != 0 {
            warn!(
                "HyperRAM size {:#x} is not divisible by {} chips, chip size is truncated to {:#x}",
                self.hyperram_size,
                self.chip_count,
                self.hyperram_size / self.chip_count
            );
        }

        if self.chip_count % 2 != 0 {
            warn!(
                "Odd number of chips ({}), the last chip is not covered by an address range",
                self.chip_count
            );
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum HyperRamCfgError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Register address or value does not fit in 64 bits")]
    AddressOverflow,
    #[error("Failed to write to output")]
    FailedToWrite(std::io::Error),
}

/// Computes every register write for `params`.
///
/// Config registers come first in field order, then the address range table
/// in index order.
pub fn generate(params: &HyperRamParams) -> Result<Vec<Instruction>, HyperRamCfgError> {
    params.validate()?;

    let geometry = Geometry::compute(params)?;

    debug!(
        "Chip size {:#x}, effective size {:#x}, stride {:#x}, address mask msb {}",
        geometry.single_chip_size,
        geometry.effective_size,
        geometry.memory_stride,
        geometry.address_mask_msb
    );

    let registers = ConfigRegisters::new()
        .t_latency_access(params.t_latency_access)
        .address_mask_msb(geometry.address_mask_msb)
        .address_space(params.address_space)
        .phys_in_use(params.phys_in_use)
        .which_phy(params.which_phy);

    let mut instructions = registers.instructions(params.cfg_base_addr)?;

    let ranges = address_ranges(
        params.chip_count,
        params.memory_base_addr,
        geometry.memory_stride,
    )?;
    instructions.extend(range_instructions(params.cfg_base_addr, &ranges)?);

    Ok(instructions)
}

/// Writes one instruction per line, each terminated by `\n`.
pub fn write_output(
    instructions: &[Instruction],
    mut output: impl Write,
) -> Result<(), HyperRamCfgError> {
    for instruction in instructions {
        debug!("{}", instruction);

        writeln!(output, "{}", instruction).map_err(HyperRamCfgError::FailedToWrite)?;
    }

    output.flush().map_err(HyperRamCfgError::FailedToWrite)
}
