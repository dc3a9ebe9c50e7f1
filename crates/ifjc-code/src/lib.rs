//! The instruction program and IFJ-code emission layer (§3, "Instruction
//! program"; §4.5A).

pub mod emit;
pub mod labels;
pub mod operand;
pub mod program;

pub use labels::LabelGen;
pub use operand::{Frame, Operand};
pub use program::{InstrId, Program};
