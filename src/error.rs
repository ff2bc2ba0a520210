/*!
  Errors raised while reading a register configuration and turning it into write descriptors.

  A syntax error rejects the whole document. The consistency checks only produce errors under
  `Strictness::Deny`; the default configuration never rejects a document that parses.
*/

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Where in the document the parse stopped, and what was found there.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SyntaxError {
  /// 1-based line number.
  pub line: usize,
  /// 1-based column, counted in characters.
  pub column: usize,
  /// 0-based byte offset from the start of the document.
  pub offset: usize,
  /// The text of the offending line, without its line ending.
  pub text: String,
  /// The innermost clause that was being matched when the instruction alternative failed.
  pub expected: Option<&'static str>
}

impl SyntaxError {
  /// Locates `offset` within `document`.
  pub fn at(document: &str, offset: usize, expected: Option<&'static str>) -> SyntaxError {
    let before     = &document[..offset];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line       = before.matches('\n').count() + 1;
    let column     = before[line_start..].chars().count() + 1;
    let text       = document[line_start..]
                        .lines()
                        .next()
                        .unwrap_or("")
                        .to_string();

    SyntaxError{ line, column, offset, text, expected }
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "line {}, column {}: expected an instruction, a blank line, or a comment",
      self.line, self.column
    )?;
    if let Some(clause) = self.expected {
      write!(f, " (instruction failed in its {})", clause)?;
    }
    write!(f, "\n  | {}", self.text)
  }
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("syntax error on {0}")]
  Syntax(SyntaxError),

  #[error("line {line}: size `{text}` does not fit in 32 bits")]
  SizeOutOfRange {
    line: usize,
    text: String
  },

  #[error("line {line}: declared size {declared} but data holds {actual} byte(s)")]
  FieldInconsistency {
    line: usize,
    declared: u64,
    actual: usize
  },

  #[error("line {line}: write of {length} byte(s) exceeds the {max} byte buffer")]
  CapacityExceeded {
    line: usize,
    length: u64,
    max: u64
  },

  #[error("invalid options file: {0}")]
  Config(#[from] toml::de::Error)
}

impl From<SyntaxError> for Error {
  fn from(error: SyntaxError) -> Error {
    Error::Syntax(error)
  }
}
