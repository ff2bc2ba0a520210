use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

use regseq::{encode_all, listing, parse, GrammarVariant, OffsetStyle, Options, Strictness};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
  /// C brace initializers, one write per line
  Initializer,
  /// The parsed instructions, unencoded
  Records,
  /// Instructions and their encodings as a table
  Table,
}

#[derive(Parser, Debug)]
#[command(
  name = "regseq",
  version,
  about = "Convert a register configuration file into device write descriptors"
)]
struct Cli {
  /// Register configuration file
  #[arg(short = 'f', long = "file", value_name = "FILE")]
  file: PathBuf,

  /// Output form
  #[arg(long, value_enum, default_value_t = Format::Initializer)]
  format: Format,

  /// Write to FILE instead of standard output
  #[arg(short = 'o', long = "output", value_name = "FILE")]
  output: Option<PathBuf>,

  /// TOML options file; flags below override it
  #[arg(short = 'c', long = "config", value_name = "FILE")]
  config: Option<PathBuf>,

  /// Reject `#` comment lines
  #[arg(long)]
  bare: bool,

  /// Emit the offset as `0x` followed by its digits
  #[arg(long)]
  prefix_offset: bool,

  /// Emit payload bytes with a `0x` prefix
  #[arg(long)]
  prefix_bytes: bool,

  /// Size and capacity checking: off, warn, or deny
  #[arg(long, value_name = "LEVEL", value_parser = Strictness::from_str)]
  strict: Option<Strictness>,

  /// Largest write, in bytes, the consumer can hold
  #[arg(long, value_name = "BYTES")]
  max_length: Option<u64>,

  /// More logging; repeat for more
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,

  /// Only log errors
  #[arg(short, long, conflicts_with = "verbose")]
  quiet: bool,
}

impl Cli {
  fn log_level(&self) -> LevelFilter {
    if self.quiet {
      return LevelFilter::Error;
    }
    match self.verbose {
      0 => LevelFilter::Warn,
      1 => LevelFilter::Info,
      2 => LevelFilter::Debug,
      _ => LevelFilter::Trace,
    }
  }

  fn options(&self) -> Result<Options> {
    let mut options = match &self.config {
      Some(path) => {
        let text = fs::read_to_string(path)
          .with_context(|| format!("failed to read options file '{}'", path.display()))?;
        Options::from_toml_str(&text)
          .with_context(|| format!("failed to load options file '{}'", path.display()))?
      }
      None => Options::default(),
    };

    if self.bare {
      options.grammar = GrammarVariant::Bare;
    }
    if self.prefix_offset {
      options.emit.offset_style = OffsetStyle::Prefixed;
    }
    if self.prefix_bytes {
      options.emit.byte_prefix = true;
    }
    if let Some(strictness) = self.strict {
      options.strictness = strictness;
    }
    if self.max_length.is_some() {
      options.max_length = self.max_length;
    }
    Ok(options)
  }
}

fn run(cli: &Cli) -> Result<()> {
  let options = cli.options()?;
  debug!("options: {:?}", options);

  let text = fs::read_to_string(&cli.file)
    .with_context(|| format!("failed to read register file '{}'", cli.file.display()))?;

  // Nothing is written unless the whole document parses and encodes.
  let instructions = parse(&text, options.grammar)
    .with_context(|| format!("'{}' is not a valid register file", cli.file.display()))?;

  let rendered = match cli.format {
    Format::Records => listing::record_list(&instructions),
    Format::Initializer => {
      let descriptors = encode_all(&instructions, &options)?;
      listing::initializer_list(&descriptors, &options.emit)
    }
    Format::Table => {
      let descriptors = encode_all(&instructions, &options)?;
      listing::descriptor_table(&instructions, &descriptors, &options.emit).to_string()
    }
  };

  match &cli.output {
    Some(path) => fs::write(path, rendered)
      .with_context(|| format!("failed to write '{}'", path.display()))?,
    None => print!("{}", rendered),
  }
  Ok(())
}

fn main() {
  let cli = Cli::parse();

  if let Err(e) = SimpleLogger::new().with_level(cli.log_level()).init() {
    eprintln!("Failed to initialize logging: {}", e);
  }

  if let Err(e) = run(&cli) {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn options_file(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
  }

  fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("regseq").chain(args.iter().copied())).unwrap()
  }

  #[test]
  fn flags_override_options_file(){
    let file = options_file("strictness = \"deny\"\nmax_length = 128\n");
    let path = file.path().to_str().unwrap();

    let options = cli(&["-f", "regs.txt", "-c", path, "--strict", "warn", "--prefix-offset"])
      .options()
      .unwrap();
    assert_eq!(options.strictness, Strictness::Warn);
    assert_eq!(options.emit.offset_style, OffsetStyle::Prefixed);
    assert!(!options.emit.byte_prefix);
    // Not given on the command line, so the file's value stands.
    assert_eq!(options.max_length, Some(128));

    let options = cli(&[
      "-f", "regs.txt", "-c", path, "--max-length", "64", "--bare", "--prefix-bytes"
    ]).options().unwrap();
    assert_eq!(options.strictness, Strictness::Deny);
    assert_eq!(options.max_length, Some(64));
    assert_eq!(options.grammar, GrammarVariant::Bare);
    assert!(options.emit.byte_prefix);
  }

  #[test]
  fn defaults_without_options_file(){
    let options = cli(&["-f", "regs.txt"]).options().unwrap();
    assert_eq!(options, Options::default());
  }

  #[test]
  fn unreadable_options_file(){
    assert!(cli(&["-f", "regs.txt", "-c", "/nonexistent/regseq.toml"]).options().is_err());
  }

  #[test]
  fn bad_strictness_is_rejected(){
    let args = ["regseq", "-f", "regs.txt", "--strict", "loud"];
    assert!(Cli::try_parse_from(args).is_err());
  }

  #[test]
  fn verbosity_levels(){
    assert_eq!(cli(&["-f", "r"]).log_level(), LevelFilter::Warn);
    assert_eq!(cli(&["-f", "r", "-v"]).log_level(), LevelFilter::Info);
    assert_eq!(cli(&["-f", "r", "-vv"]).log_level(), LevelFilter::Debug);
    assert_eq!(cli(&["-f", "r", "-vvv"]).log_level(), LevelFilter::Trace);
    assert_eq!(cli(&["-f", "r", "-q"]).log_level(), LevelFilter::Error);
    assert!(Cli::try_parse_from(["regseq", "-f", "r", "-q", "-v"]).is_err());
  }

  #[test]
  fn output_formats_write_files(){
    let input = options_file("# two writes\nSize: 1, Offset: FC, Data: 00\nSize: 2, Offset: 10, Data: ABC\n");
    let input_path = input.path().to_str().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let out = dir.path().join("writes.h");
    let out_path = out.to_str().unwrap();
    run(&cli(&["-f", input_path, "-o", out_path, "--prefix-bytes"])).unwrap();
    assert_eq!(
      fs::read_to_string(&out).unwrap(),
      "{2, {FC, 0x00}},\n{3, {10, 0xC0, 0xAB}},\n"
    );

    run(&cli(&["-f", input_path, "-o", out_path, "--format", "records"])).unwrap();
    assert_eq!(
      fs::read_to_string(&out).unwrap(),
      "Size: 1, Offset: FC, Data: 00\nSize: 2, Offset: 10, Data: ABC\n"
    );

    run(&cli(&["-f", input_path, "-o", out_path, "--format", "table"])).unwrap();
    let table = fs::read_to_string(&out).unwrap();
    assert!(table.contains("Padded"));
    assert!(table.contains("10 C0 AB"));
  }

  #[test]
  fn failed_parse_writes_nothing(){
    let input = options_file("Size: 1, Offset: FC, Data: 00\nSize: 1, Data: 00\n");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("writes.h");

    let args = ["-f", input.path().to_str().unwrap(), "-o", out.to_str().unwrap()];
    assert!(run(&cli(&args)).is_err());
    assert!(!out.exists());
  }
}
