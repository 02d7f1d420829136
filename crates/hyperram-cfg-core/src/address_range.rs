use crate::{instruction::Instruction, registers::ADDRESS_RANGE_TABLE_OFFSET, HyperRamCfgError};

/// Size of one entry (start and end register) in the address range table
pub const ADDRESS_RANGE_ENTRY_SIZE: u64 = 8;

/// The memory window served by one interleaved pair of chips.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AddressRange {
    pub from: u64,
    pub to: u64,
}

impl AddressRange {
    pub const fn new(from: u64, to: u64) -> Self {
        Self { from, to }
    }
}

/// One range per pair of chips, laid out back to back from `memory_base_addr`.
///
/// With an odd chip count the last chip gets no range.
pub fn address_ranges(
    chip_count: u64,
    memory_base_addr: u64,
    memory_stride: u64,
) -> Result<Vec<AddressRange>, HyperRamCfgError> {
    let boundary = |idx: u64| {
        memory_stride
            .checked_mul(idx)
            .and_then(|offset| memory_base_addr.checked_add(offset))
            .ok_or(HyperRamCfgError::AddressOverflow)
    };

    (0..chip_count / 2)
        .map(|idx| Ok(AddressRange::new(boundary(idx)?, boundary(idx + 1)?)))
        .collect()
}

/// Start and end register writes for every range, in table order.
pub fn range_instructions(
    cfg_base_addr: u64,
    ranges: &[AddressRange],
) -> Result<Vec<Instruction>, HyperRamCfgError> {
    let mut instructions = Vec::with_capacity(ranges.len() * 2);

    for (idx, range) in ranges.iter().enumerate() {
        let start_reg = (idx as u64)
            .checked_mul(ADDRESS_RANGE_ENTRY_SIZE)
            .and_then(|offset| offset.checked_add(ADDRESS_RANGE_TABLE_OFFSET))
            .and_then(|offset| cfg_base_addr.checked_add(offset))
            .ok_or(HyperRamCfgError::AddressOverflow)?;
        let end_reg = start_reg
            .checked_add(4)
            .ok_or(HyperRamCfgError::AddressOverflow)?;

        instructions.push(Instruction::new(start_reg, range.from));
        instructions.push(Instruction::new(end_reg, range.to));
    }

    Ok(instructions)
}
