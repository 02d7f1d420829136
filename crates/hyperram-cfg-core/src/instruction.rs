use std::fmt;

/// A single `mww` (memory write word) command for the debugger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub address: u64,
    pub value: u64,
}

impl Instruction {
    pub const fn new(address: u64, value: u64) -> Self {
        Self { address, value }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mww 0x{:X} 0x{:X}", self.address, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_uppercase_without_padding() {
        assert_eq!(
            Instruction::new(0x1a10_402c, 0x10).to_string(),
            "mww 0x1A10402C 0x10"
        );
        assert_eq!(Instruction::new(0, 0).to_string(), "mww 0x0 0x0");
    }
}
