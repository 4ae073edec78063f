pub(crate) mod instruction;
pub(crate) mod instruction_pointer;
pub(crate) mod opcode;
pub(crate) mod traits;
