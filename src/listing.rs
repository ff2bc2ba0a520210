/*!
  Textual forms of a parsed configuration: the C brace-initializer list the firmware includes,
  the parsed records themselves, and a table for reading at a terminal.
*/

use prettytable::{format as TableFormat, Table};

use crate::config::EmitOptions;
use crate::register::{RegisterInstruction, WriteDescriptor};

/// `{<length>, {<addr>, <byte>, ..., <byte>}},`
pub fn initializer(descriptor: &WriteDescriptor, emit: &EmitOptions) -> String {
  format!("{{{}, {{{}}}}},", descriptor.length, descriptor.tokens(emit).join(", "))
}

/// One initializer per line, in order, each line terminated.
pub fn initializer_list(descriptors: &[WriteDescriptor], emit: &EmitOptions) -> String {
  descriptors
    .iter()
    .map(|descriptor| initializer(descriptor, emit) + "\n")
    .collect()
}

/// One `Size: .., Offset: .., Data: ..` record per line.
pub fn record_list(instructions: &[RegisterInstruction]) -> String {
  instructions
    .iter()
    .map(|instruction| format!("{}\n", instruction))
    .collect()
}

/// Instructions side by side with their encodings. Both slices are in source order.
pub fn descriptor_table(
    instructions: &[RegisterInstruction],
    descriptors : &[WriteDescriptor],
    emit        : &EmitOptions
  ) -> Table
{
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![
    ubr->"#", ubr->"Line", ubr->"Size", ubl->"Offset", ubl->"Data",
    ubr->"Length", ubl->"Bytes", ubl->"Padded"
  ]);

  for (i, (instruction, descriptor)) in instructions.iter().zip(descriptors).enumerate() {
    let padded = match descriptor.padded {
      true  => "yes",
      false => ""
    };
    table.add_row(row![
      r->i,
      r->instruction.line,
      r->instruction.size,
      instruction.offset,
      instruction.data,
      r->descriptor.length,
      descriptor.tokens(emit).join(" "),
      padded
    ]);
  }
  table
}

lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}
