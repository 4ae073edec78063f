pub(crate) mod disasm;
pub(crate) mod input;
pub(crate) mod logging;
pub(crate) mod shell;
pub(crate) mod vm;

pub use disasm::disassemble;
pub use input::resolve_code;
