//! A hexadecimal literal that is kept as the text it was written as, with some convenience
//! functions for getting at its prefix and digits.

use std::fmt::{Display, Formatter};

/// The two spellings of the hex prefix the grammar accepts.
pub const HEX_PREFIXES: [&str; 2] = ["0x", "0X"];

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct HexLiteral {
  text: String
}

impl HexLiteral {
  /// Wraps source text. The grammar guarantees the text is an optional prefix followed by at
  /// least one hex digit; nothing is checked here.
  pub fn new(text: &str) -> HexLiteral {
    HexLiteral{ text: text.to_string() }
  }

  /// The literal exactly as written, prefix included.
  pub fn as_str(&self) -> &str {
    &self.text
  }

  pub fn has_prefix(&self) -> bool {
    HEX_PREFIXES.iter().any(|prefix| self.text.starts_with(prefix))
  }

  /// The literal with any `0x`/`0X` prefix removed.
  pub fn digits(&self) -> &str {
    match self.has_prefix() {
      true  => &self.text[2..],
      false => &self.text
    }
  }

  /// Number of hex digits, prefix excluded.
  pub fn digit_count(&self) -> usize {
    self.digits().len()
  }

  /// The literal with a uniform lowercase `0x` prefix, whatever the source used.
  pub fn prefixed(&self) -> String {
    format!("0x{}", self.digits())
  }

  /// Numeric value as a `u32`, or `None` if it does not fit.
  pub fn to_u32(&self) -> Option<u32> {
    u32::from_str_radix(self.digits(), 16).ok()
  }
}

impl Display for HexLiteral {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.text)
  }
}
