use crate::evm::disasm::data_region::DataRegion;
use crate::evm::vm::instruction::Instruction;
use crate::evm::vm::instruction_pointer::Cursor;
use crate::evm::vm::opcode::{self, EvmOpcodes, JUMPDEST};
use crate::evm::vm::traits::decode::Decode;
use crate::log_debug;

/// Whether the pass currently treats bytes as reachable code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Data,
}

/// Single forward pass over a bytecode buffer that splits it into code lines
/// and opaque `DATA` regions.
///
/// Code after a terminating instruction (see [`opcode::TERMINATING`]) is not
/// assumed reachable, so it is collected as data until a `JUMPDEST` opens a
/// new code region. Data is still scanned instruction by instruction so that
/// a `JUMPDEST` byte sitting inside a push operand never counts as a target.
pub struct Disassembler<D: Decode> {
    decoder: D,
}

impl<D: Decode> Disassembler<D> {
    pub fn new(decoder: D) -> Disassembler<D> {
        Disassembler { decoder }
    }

    pub fn disassemble(&self, code: &[u8]) -> Vec<String> {
        let mut output = vec![];
        let mut mode = Mode::Code;
        let mut region: Option<DataRegion> = None;
        let mut regions = 0usize;

        let mut cursor = Cursor::new(code);
        while !cursor.is_at_end() {
            let original_offset = cursor.pc;
            let insn = self.decoder.decode(&mut cursor);
            debug_assert_eq!(insn.offset, original_offset);

            let push_data: &[u8] = if insn.is_push {
                let start = (original_offset + 1).min(code.len());
                let end = (start + insn.operand_width).min(code.len());
                &code[start..end]
            } else {
                &[]
            };

            if insn.opcode == JUMPDEST {
                mode = Mode::Code;
            }

            match mode {
                Mode::Code => {
                    if let Some(closed) = region.take() {
                        output.push(closed.to_string());
                        regions += 1;
                    }
                    output.push(render_code(original_offset, &insn, push_data));

                    if opcode::is_terminating(insn.opcode) {
                        mode = Mode::Data;
                    }
                }
                Mode::Data => {
                    region
                        .get_or_insert_with(|| DataRegion::new(original_offset))
                        .absorb(insn.opcode, push_data);
                }
            }
        }

        if let Some(closed) = region.take() {
            output.push(closed.to_string());
            regions += 1;
        }

        log_debug!(
            "Disassembled bytecode",
            bytes = code.len(),
            lines = output.len(),
            data_regions = regions
        );
        output
    }
}

/// Disassembles `code` with the EVM opcode table.
pub fn disassemble(code: &[u8]) -> Vec<String> {
    Disassembler::new(EvmOpcodes).disassemble(code)
}

fn render_code(offset: usize, insn: &Instruction, push_data: &[u8]) -> String {
    if insn.is_push && push_data.len() < insn.operand_width {
        format!(
            "{:04x}: PUSH{} 0x{} # truncated",
            offset,
            insn.operand_width,
            hex::encode(push_data)
        )
    } else {
        format!("{:04x}: {}", offset, insn)
    }
}
