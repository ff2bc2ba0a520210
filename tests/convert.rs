use std::io::Write;

use regseq::{
  convert, encode_all, listing, parse, EmitOptions, Error, GrammarVariant, OffsetStyle,
  Options, Strictness
};

const CLOCK_CONFIG: &str = "\
# Renesas 8A34001 clock generator
# Page select, then output divider (OUT0)
Size: 0x1, Offset: FC, Data: 00

Size: 0x3, Offset: 10, Data: AABBCC
Size: 2, Offset: 0x24, Data: 0X1234
    # odd digit count below
Size: 1, Offset: 30, Data: F
";

fn initializers(text: &str, options: &Options) -> String {
  let descriptors = convert(text, options).unwrap();
  listing::initializer_list(&descriptors, &options.emit)
}

#[test]
fn end_to_end_default_emission() {
  assert_eq!(
    initializers(CLOCK_CONFIG, &Options::default()),
    "{2, {FC, 00}},\n{4, {10, CC, BB, AA}},\n{3, {0x24, 34, 12}},\n{2, {30, F0}},\n"
  );
}

#[test]
fn end_to_end_c_ready_emission() {
  let options = Options {
    emit: EmitOptions { offset_style: OffsetStyle::Prefixed, byte_prefix: true },
    ..Options::default()
  };
  assert_eq!(
    initializers(CLOCK_CONFIG, &options),
    "{2, {0xFC, 0x00}},\n{4, {0x10, 0xCC, 0xBB, 0xAA}},\n\
     {3, {0x24, 0x34, 0x12}},\n{2, {0x30, 0xF0}},\n"
  );
}

#[test]
fn order_is_preserved_end_to_end() {
  let text: String = (0..40)
    .map(|i| format!("Size: 1, Offset: {:02X}, Data: {:02X}\n", i, 255 - i))
    .collect();

  let instructions = parse(&text, GrammarVariant::Commented).unwrap();
  let descriptors = encode_all(&instructions, &Options::default()).unwrap();
  assert_eq!(descriptors.len(), 40);

  for (i, (instruction, descriptor)) in instructions.iter().zip(&descriptors).enumerate() {
    assert_eq!(instruction.offset.as_str(), format!("{:02X}", i));
    assert_eq!(descriptor.address, instruction.offset);
    assert_eq!(descriptor.line, i + 1);
  }
}

#[test]
fn comments_and_blanks_only() {
  let text = "# nothing to write here\n\n   \n## still nothing (really)\n";
  assert!(convert(text, &Options::default()).unwrap().is_empty());
}

#[test]
fn all_or_nothing() {
  let text = "Size: 1, Offset: 10, Data: FF\nSize: 1, Data: FF\n";
  match convert(text, &Options::default()) {
    Err(Error::Syntax(e)) => {
      assert_eq!(e.line, 2);
      assert_eq!(e.expected, Some("offset clause"));
    }
    other => panic!("expected a syntax error, got {:?}", other)
  }
}

#[test]
fn bare_variant_from_options() {
  let options = Options { grammar: GrammarVariant::Bare, ..Options::default() };
  assert!(convert(CLOCK_CONFIG, &options).is_err());
  assert_eq!(convert("Size: 1, Offset: 1, Data: 1\n", &options).unwrap().len(), 1);
}

#[test]
fn unchecked_size_by_default() {
  let text = "Size: 4, Offset: 10, Data: FF\n";
  let descriptors = convert(text, &Options::default()).unwrap();
  assert_eq!(descriptors[0].length, 5);
  assert_eq!(descriptors[0].byte_count(), 2);
  assert_eq!(
    listing::initializer_list(&descriptors, &EmitOptions::default()),
    "{5, {10, FF}},\n"
  );
}

#[test]
fn strict_mode_rejects_inconsistent_size() {
  let text = "Size: 1, Offset: 10, Data: FF\nSize: 4, Offset: 11, Data: FF\n";

  let warn = Options { strictness: Strictness::Warn, ..Options::default() };
  assert_eq!(convert(text, &warn).unwrap().len(), 2);

  let deny = Options { strictness: Strictness::Deny, ..Options::default() };
  match convert(text, &deny) {
    Err(Error::FieldInconsistency { line, declared, actual }) => {
      assert_eq!((line, declared, actual), (2, 4, 1));
    }
    other => panic!("expected FieldInconsistency, got {:?}", other)
  }
}

#[test]
fn options_from_toml_file() {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  write!(
    file,
    "strictness = \"deny\"\nmax_length = 3\n\n[emit]\noffset_style = \"prefixed\"\n"
  ).unwrap();

  let text = std::fs::read_to_string(file.path()).unwrap();
  let options = Options::from_toml_str(&text).unwrap();
  assert_eq!(options.emit.offset_style, OffsetStyle::Prefixed);
  assert!(!options.emit.byte_prefix);

  match convert(CLOCK_CONFIG, &options) {
    Err(Error::CapacityExceeded { line, length, max }) => {
      assert_eq!((line, length, max), (5, 4, 3));
    }
    other => panic!("expected CapacityExceeded, got {:?}", other)
  }
}

#[test]
fn encoding_twice_is_identical() {
  let first = convert(CLOCK_CONFIG, &Options::default()).unwrap();
  let second = convert(CLOCK_CONFIG, &Options::default()).unwrap();
  assert_eq!(first, second);
}
