mod data_region;
mod disassembler;

pub use disassembler::disassemble;
