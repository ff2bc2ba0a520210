/*!
  A register configuration is a list of `Size`/`Offset`/`Data` triples, one per write to the
  device, in the order the writes must happen. The instructions are immutable once parsed and
  are consumed once by the encoder. The encoder sees only the parsed fields, never the text.

  Sizes are the only interpreted field. Offsets and data stay as the hex text they were
  written as, since emission reproduces that text digit for digit.
*/

mod descriptor;
mod grammar;
pub(crate) mod instruction;

pub use descriptor::{encode_instruction, validate_descriptor, ByteToken, WriteDescriptor};
pub use grammar::parse;
pub use instruction::{FieldKey, RegisterInstruction};
