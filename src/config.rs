/*!
  Options that control parsing, emission, and validation. Everything the pipeline needs is
  passed in explicitly as an `Options` value. Options can be read from a TOML file, in which
  every key is optional:

  ```toml
  grammar = "commented"       # or "bare"
  strictness = "warn"         # "off", "warn", or "deny"
  max_length = 128

  [emit]
  offset_style = "prefixed"   # or "verbatim"
  byte_prefix = true
  ```
*/

use serde::Deserialize;
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::error::Error;

/// Which productions the document grammar accepts besides instructions and blank lines.
#[derive(StrumDisplay, EnumString, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GrammarVariant {
  /// Instructions, blank lines, and `#` comment lines.
  Commented,
  /// Instructions and blank lines only.
  Bare
}

impl Default for GrammarVariant {
  fn default() -> Self {
    GrammarVariant::Commented
  }
}

/// How the offset token is written at the front of each descriptor.
#[derive(StrumDisplay, EnumString, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OffsetStyle {
  /// Exactly as written in the source, prefix or not.
  Verbatim,
  /// `0x` followed by the source digits.
  Prefixed
}

impl Default for OffsetStyle {
  fn default() -> Self {
    OffsetStyle::Verbatim
  }
}

/// What to do when a descriptor disagrees with its declared size or the buffer capacity.
#[derive(StrumDisplay, EnumString, Deserialize, Clone, Copy, Eq, PartialEq, Debug, Hash)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
  /// No checks at all.
  Off,
  /// Log a warning and emit anyway.
  Warn,
  /// Reject the document.
  Deny
}

impl Default for Strictness {
  fn default() -> Self {
    Strictness::Off
  }
}

#[derive(Deserialize, Clone, Copy, Eq, PartialEq, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
  pub offset_style: OffsetStyle,
  /// Write payload bytes as `0xCC` instead of `CC`.
  pub byte_prefix: bool
}

#[derive(Deserialize, Clone, Copy, Eq, PartialEq, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
  pub grammar: GrammarVariant,
  pub emit: EmitOptions,
  pub strictness: Strictness,
  /// Capacity in bytes of the consumer's write buffer, address byte included.
  pub max_length: Option<u64>
}

impl Options {
  pub fn from_toml_str(text: &str) -> Result<Options, Error> {
    Ok(toml::from_str::<Options>(text)?)
  }
}
