use crate::{HyperRamCfgError, HyperRamParams};

/// How the chips of a HyperRAM are laid out behind the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub single_chip_size: u64,
    /// Size addressed through one PHY
    pub effective_size: u64,
    /// Distance between the starts of two consecutive address ranges
    pub memory_stride: u64,
    pub address_mask_msb: u64,
}

impl Geometry {
    pub fn compute(params: &HyperRamParams) -> Result<Self, HyperRamCfgError> {
        let single_chip_size = params
            .hyperram_size
            .checked_div(params.chip_count)
            .ok_or_else(|| {
                HyperRamCfgError::InvalidParameter(
                    "the number of chips must be at least 1".to_string(),
                )
            })?;

        // With a single PHY both chips of a pair sit behind it, so every range
        // spans two chips.
        let (effective_size, memory_stride) = if params.phys_in_use == 1 {
            let stride = single_chip_size
                .checked_mul(2)
                .ok_or(HyperRamCfgError::AddressOverflow)?;
            (params.hyperram_size, stride)
        } else {
            (params.hyperram_size / 2, single_chip_size)
        };

        let address_mask_msb = match clog2(effective_size) {
            Some(bits) if bits >= 1 => u64::from(bits - 1),
            _ => {
                return Err(HyperRamCfgError::InvalidParameter(format!(
                    "effective HyperRAM size must be at least 2 bytes (got {:#x})",
                    effective_size
                )))
            }
        };

        Ok(Self {
            single_chip_size,
            effective_size,
            memory_stride,
            address_mask_msb,
        })
    }
}

/// Ceiling of the base 2 logarithm, `None` for zero.
pub fn clog2(x: u64) -> Option<u32> {
    match x {
        0 => None,
        1 => Some(0),
        _ => Some(u64::BITS - (x - 1).leading_zeros()),
    }
}
