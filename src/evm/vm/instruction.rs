use std::fmt::{Display, Formatter};

/// One decoded instruction. The decoder builds a fresh one per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub offset: usize,
    pub opcode: u8,
    pub mnemonic: String,
    /// Immediate bytes this opcode declares, whether or not they were present.
    pub operand_width: usize,
    pub is_push: bool,
    /// Immediate bytes actually read. Shorter than `operand_width` only at end of buffer.
    pub operand: Vec<u8>,
}

impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.operand.is_empty() {
            write!(f, "{}", self.mnemonic)
        } else {
            write!(f, "{} 0x{}", self.mnemonic, hex::encode(&self.operand))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insn(mnemonic: &str, opcode: u8, width: usize, operand: &[u8]) -> Instruction {
        Instruction {
            offset: 0,
            opcode,
            mnemonic: mnemonic.to_string(),
            operand_width: width,
            is_push: width > 0 || mnemonic == "PUSH0",
            operand: operand.to_vec(),
        }
    }

    #[test]
    fn test_display_plain() {
        assert_eq!(insn("STOP", 0x00, 0, &[]).to_string(), "STOP");
        assert_eq!(insn("PUSH0", 0x5f, 0, &[]).to_string(), "PUSH0");
    }

    #[test]
    fn test_display_keeps_leading_zeros() {
        assert_eq!(insn("PUSH2", 0x61, 2, &[0x00, 0x01]).to_string(), "PUSH2 0x0001");
    }
}
