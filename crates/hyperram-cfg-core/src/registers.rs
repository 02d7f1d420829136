use crate::{instruction::Instruction, HyperRamCfgError};

use static_assertions::const_assert_eq;

/// HyperBus controller configuration registers, in register order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    TLatencyAccess,
    EnLatencyAdditional,
    TBurstMax,
    TReadWriteRecovery,
    TRxClkDelay,
    TTxClkDelay,
    AddressMaskMsb,
    AddressSpace,
    PhysInUse,
    WhichPhy,
    TCshCycles,
}

/// Size of one configuration register in bytes
pub const REGISTER_SIZE: u64 = 4;

/// The address range table follows directly after the configuration registers
pub const ADDRESS_RANGE_TABLE_OFFSET: u64 = 0x2C;

const_assert_eq!(ConfigField::ALL.len(), 11);
const_assert_eq!(
    ConfigField::ALL.len() as u64 * REGISTER_SIZE,
    ADDRESS_RANGE_TABLE_OFFSET
);

impl ConfigField {
    pub const ALL: [ConfigField; 11] = [
        ConfigField::TLatencyAccess,
        ConfigField::EnLatencyAdditional,
        ConfigField::TBurstMax,
        ConfigField::TReadWriteRecovery,
        ConfigField::TRxClkDelay,
        ConfigField::TTxClkDelay,
        ConfigField::AddressMaskMsb,
        ConfigField::AddressSpace,
        ConfigField::PhysInUse,
        ConfigField::WhichPhy,
        ConfigField::TCshCycles,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Byte offset from the controller's config base address
    pub const fn offset(self) -> u64 {
        self.index() as u64 * REGISTER_SIZE
    }

    pub const fn name(self) -> &'static str {
        match self {
            ConfigField::TLatencyAccess => "t_latency_access",
            ConfigField::EnLatencyAdditional => "en_latency_additional",
            ConfigField::TBurstMax => "t_burst_max",
            ConfigField::TReadWriteRecovery => "t_read_write_recovery",
            ConfigField::TRxClkDelay => "t_rx_clk_delay",
            ConfigField::TTxClkDelay => "t_tx_clk_delay",
            ConfigField::AddressMaskMsb => "address_mask_msb",
            ConfigField::AddressSpace => "address_space",
            ConfigField::PhysInUse => "phys_in_use",
            ConfigField::WhichPhy => "which_phy",
            ConfigField::TCshCycles => "t_csh_cycles",
        }
    }
}

/// Values for the configuration registers. Registers that are never set keep
/// their reset value on the device and get no write.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigRegisters {
    values: [Option<u64>; 11],
}

impl ConfigRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: ConfigField, value: u64) -> Self {
        self.values[field.index()] = Some(value);
        self
    }

    pub fn get(&self, field: ConfigField) -> Option<u64> {
        self.values[field.index()]
    }

    pub fn t_latency_access(self, value: u64) -> Self {
        self.set(ConfigField::TLatencyAccess, value)
    }

    pub fn address_mask_msb(self, value: u64) -> Self {
        self.set(ConfigField::AddressMaskMsb, value)
    }

    pub fn address_space(self, value: u64) -> Self {
        self.set(ConfigField::AddressSpace, value)
    }

    pub fn phys_in_use(self, value: u64) -> Self {
        self.set(ConfigField::PhysInUse, value)
    }

    pub fn which_phy(self, value: u64) -> Self {
        self.set(ConfigField::WhichPhy, value)
    }

    /// One write per populated register, in register order.
    pub fn instructions(&self, base_addr: u64) -> Result<Vec<Instruction>, HyperRamCfgError> {
        ConfigField::ALL
            .iter()
            .filter_map(|&field| self.get(field).map(|value| (field, value)))
            .map(|(field, value)| {
                let address = base_addr
                    .checked_add(field.offset())
                    .ok_or(HyperRamCfgError::AddressOverflow)?;

                log::trace!("{} = {:#x} at {:#x}", field.name(), value, address);

                Ok(Instruction::new(address, value))
            })
            .collect()
    }
}
