/*!
  Reads a register configuration written as `Size`/`Offset`/`Data` triples and turns it into
  the write sequence a device-programming routine issues, one descriptor per instruction:

  ```text
  # Output divider
  Size: 0x3, Offset: 10, Data: AABBCC      =>      {4, {10, CC, BB, AA}},
  ```

  The pipeline is parse, then encode, then (optionally) validate. Parsing is all-or-nothing:
  a document with any unrecognized line produces no instructions at all, and nothing is
  encoded until the whole document has been read.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod config;
pub mod error;
pub mod hex;
pub mod listing;
pub mod register;

use log::{info, trace, warn};

pub use config::{EmitOptions, GrammarVariant, OffsetStyle, Options, Strictness};
pub use error::{Error, SyntaxError};
pub use hex::HexLiteral;
pub use register::{
  encode_instruction, parse, validate_descriptor,
  ByteToken, FieldKey, RegisterInstruction, WriteDescriptor
};

/// Encodes already parsed instructions in order, validating each per `options.strictness`.
pub fn encode_all(
    instructions: &[RegisterInstruction],
    options     : &Options
  ) -> Result<Vec<WriteDescriptor>, Error>
{
  let mut descriptors = Vec::with_capacity(instructions.len());

  for instruction in instructions {
    let descriptor = encode_instruction(instruction);

    if descriptor.padded {
      warn!(
        "line {}: data `{}` has an odd number of digits, last byte padded to {}",
        instruction.line,
        instruction.data,
        descriptor.payload.first().map_or("", ByteToken::digits)
      );
    }
    validate_descriptor(&descriptor, options)?;

    #[cfg(feature = "trace_encoding")]
    trace!("{} => {}", instruction, listing::initializer(&descriptor, &options.emit));

    descriptors.push(descriptor);
  }
  Ok(descriptors)
}

/// Parses `text` and encodes every instruction in it.
pub fn convert(text: &str, options: &Options) -> Result<Vec<WriteDescriptor>, Error> {
  let instructions = parse(text, options.grammar)?;
  info!("read {} register instruction(s)", instructions.len());
  trace!("encoding with {:?}", options);
  encode_all(&instructions, options)
}
