use crate::evm::vm::instruction::Instruction;
use crate::evm::vm::instruction_pointer::Cursor;

/// Decodes one instruction at the cursor and moves the cursor past it,
/// including whatever part of its operand the buffer still holds.
///
/// Callers only invoke this while the cursor has bytes left, and every byte
/// value must decode to something. The returned `offset` must be the cursor
/// position before the call; debug builds of the disassembler check it.
pub trait Decode {
    fn decode(&self, cursor: &mut Cursor) -> Instruction;
}
