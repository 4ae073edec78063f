/// Read position over a borrowed bytecode buffer.
///
/// Reads never go past the end of the buffer: `next` yields `None` and `take`
/// hands back however many bytes were left.
pub struct Cursor<'a> {
    pub pc: usize,
    code: &'a [u8],
}

impl<'a> Cursor<'a> {
    pub fn new(code: &'a [u8]) -> Cursor<'a> {
        Cursor { pc: 0, code }
    }

    pub fn next(&mut self) -> Option<u8> {
        let byte = self.code.get(self.pc).copied()?;
        self.pc += 1;
        Some(byte)
    }

    /// Reads up to `n` bytes, stopping early at the end of the buffer.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let start = self.pc.min(self.code.len());
        let end = start.saturating_add(n).min(self.code.len());
        self.pc = end;
        &self.code[start..end]
    }

    pub fn is_at_end(&self) -> bool {
        self.pc >= self.code.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_advances() {
        let code = [0x60, 0x01];
        let mut cursor = Cursor::new(&code);
        assert_eq!(cursor.next(), Some(0x60));
        assert_eq!(cursor.pc, 1);
        assert_eq!(cursor.next(), Some(0x01));
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.pc, 2);
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_take_clamps() {
        let code = [1, 2, 3];
        let mut cursor = Cursor::new(&code);
        cursor.next();
        assert_eq!(cursor.take(32), &[2, 3]);
        assert_eq!(cursor.pc, 3);
        assert_eq!(cursor.take(4), &[] as &[u8]);
        assert_eq!(cursor.pc, 3);
    }

    #[test]
    fn test_empty_buffer() {
        let mut cursor = Cursor::new(&[]);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.next(), None);
        assert!(cursor.take(1).is_empty());
    }
}
