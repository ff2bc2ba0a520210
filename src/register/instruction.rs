use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumString, IntoStaticStr};

use crate::hex::HexLiteral;

/**
  The three clause keys of an instruction, in the order they must appear. Keys are matched
  case-sensitively, so the strum serializations double as the grammar's literals.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString,
Clone,        Copy,          Eq, PartialEq, Debug, Hash
)]
pub enum FieldKey {
  Size,
  Offset,
  Data,
}

impl FieldKey {
  pub fn keyword(&self) -> &'static str {
    (*self).into()
  }
}

/// One parsed `Size: .., Offset: .., Data: ..` triple. The offset and data are kept as the
/// text they were written as; only the size is interpreted.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct RegisterInstruction {
  /// 1-based line on which the `Size` key starts.
  pub line        : usize,
  /// Number of payload bytes the source declares.
  pub size        : u32,
  /// The size as written.
  pub size_literal: HexLiteral,
  /// Register base address.
  pub offset      : HexLiteral,
  /// Payload, big-endian, most significant byte first.
  pub data        : HexLiteral,
}

impl RegisterInstruction {
  /// Number of payload bytes `data` actually holds once an odd final digit is padded.
  pub fn payload_len(&self) -> usize {
    (self.data.digit_count() + 1) / 2
  }

  /// Whether encoding this instruction needs the right-pad quirk.
  pub fn has_odd_data(&self) -> bool {
    self.data.digit_count() % 2 == 1
  }
}

impl Display for RegisterInstruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{}: {}, {}: {}, {}: {}",
      FieldKey::Size,   self.size_literal,
      FieldKey::Offset, self.offset,
      FieldKey::Data,   self.data
    )
  }
}
