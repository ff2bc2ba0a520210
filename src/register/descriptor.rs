/*!
  This module is responsible for turning instructions into write descriptors.

  A descriptor is the register address followed by the payload bytes, least significant
  first, under a length that counts the address byte:

  ```text
  Size: 3, Offset: 10, Data: AABBCC   =>   {4, {10, CC, BB, AA}}
  ```

  The payload is split into two-digit groups from the left. An odd final digit is completed
  with a `0` digit on its right, so `F` becomes the byte `F0`. The declared size is never
  reconciled with the data; `validate_descriptor` reports disagreements on request.
*/

use log::warn;

use crate::config::{EmitOptions, OffsetStyle, Options, Strictness};
use crate::error::Error;
use crate::hex::HexLiteral;
use crate::register::RegisterInstruction;

/// Two hex digits of payload, in the case they were written.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ByteToken {
  digits: String
}

impl ByteToken {
  fn from_group(group: &[char]) -> ByteToken {
    let mut digits: String = group.iter().collect();
    if group.len() == 1 {
      digits.push('0');
    }
    ByteToken{ digits }
  }

  pub fn digits(&self) -> &str {
    &self.digits
  }

  pub fn value(&self) -> u8 {
    self.digits
        .chars()
        .fold(0u8, |acc, c| (acc << 4) | c.to_digit(16).unwrap_or(0) as u8)
  }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct WriteDescriptor {
  /// Source line of the instruction this was encoded from.
  pub line   : usize,
  /// Declared size plus one for the address byte.
  pub length : u64,
  /// The instruction's offset, emitted as the first byte.
  pub address: HexLiteral,
  /// Payload bytes in emission order, i.e. reversed from the source text.
  pub payload: Vec<ByteToken>,
  /// Whether the final payload digit was padded.
  pub padded : bool,
}

impl WriteDescriptor {
  /// Number of bytes actually present, address included.
  pub fn byte_count(&self) -> usize {
    1 + self.payload.len()
  }

  /// Whether `length` agrees with the bytes actually present.
  pub fn is_consistent(&self) -> bool {
    self.byte_count() as u64 == self.length
  }

  /// The address token followed by the payload tokens, formatted for emission.
  pub fn tokens(&self, emit: &EmitOptions) -> Vec<String> {
    let address = match emit.offset_style {
      OffsetStyle::Verbatim => self.address.to_string(),
      OffsetStyle::Prefixed => self.address.prefixed()
    };

    let payload = self.payload.iter().map(|byte| {
      match emit.byte_prefix {
        true  => format!("0x{}", byte.digits()),
        false => byte.digits().to_string()
      }
    });

    std::iter::once(address).chain(payload).collect()
  }
}

/// Encodes one instruction. This is a pure function of the instruction.
pub fn encode_instruction(instruction: &RegisterInstruction) -> WriteDescriptor {
  let digits: Vec<char> = instruction.data.digits().chars().collect();

  let mut payload = Vec::with_capacity(instruction.payload_len());
  payload.extend(digits.chunks(2).map(ByteToken::from_group));
  payload.reverse();

  WriteDescriptor {
    line   : instruction.line,
    length : instruction.size as u64 + 1,
    address: instruction.offset.clone(),
    payload,
    padded : instruction.has_odd_data(),
  }
}

/**
  Checks a descriptor against its declared length and, if configured, the consumer's buffer
  capacity. With `Strictness::Off` nothing is checked. With `Warn` every problem is logged and
  the descriptor is accepted. With `Deny` the first problem is returned.
*/
pub fn validate_descriptor(descriptor: &WriteDescriptor, options: &Options) -> Result<(), Error> {
  if options.strictness == Strictness::Off {
    return Ok(());
  }

  let mut problems = Vec::new();

  if !descriptor.is_consistent() {
    problems.push(Error::FieldInconsistency {
      line: descriptor.line,
      declared: descriptor.length - 1,
      actual: descriptor.payload.len()
    });
  }

  if let Some(max) = options.max_length {
    let needed = descriptor.length.max(descriptor.byte_count() as u64);
    if needed > max {
      problems.push(Error::CapacityExceeded {
        line: descriptor.line,
        length: needed,
        max
      });
    }
  }

  for problem in problems {
    match options.strictness {
      Strictness::Deny => return Err(problem),
      _                => warn!("{}", problem)
    }
  }
  Ok(())
}
