use std::fmt::{Display, Formatter};

/// A run of bytes that cannot be assumed reachable, rendered as one opaque line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRegion {
    pub start: usize,
    pub bytes: Vec<u8>,
}

impl DataRegion {
    pub fn new(start: usize) -> DataRegion {
        DataRegion { start, bytes: vec![] }
    }

    /// Appends one instruction-shaped step: its opcode byte, then any operand bytes.
    pub fn absorb(&mut self, opcode: u8, operand: &[u8]) {
        self.bytes.push(opcode);
        self.bytes.extend_from_slice(operand);
    }
}

impl Display for DataRegion {
    // hex::encode keeps leading zero bytes, so the payload is always 2 digits per byte
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04x}: DATA 0x{}", self.start, hex::encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_keeps_byte_order() {
        let mut region = DataRegion::new(3);
        region.absorb(0xde, &[]);
        region.absorb(0x61, &[0xad, 0xbe]);
        assert_eq!(region.bytes, vec![0xde, 0x61, 0xad, 0xbe]);
    }

    #[test]
    fn test_render_pads_leading_zeros() {
        let mut region = DataRegion::new(0x1f);
        region.absorb(0x00, &[]);
        region.absorb(0x00, &[]);
        region.absorb(0x01, &[]);
        assert_eq!(region.to_string(), "001f: DATA 0x000001");
    }
}
