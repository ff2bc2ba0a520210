/*!
  Reads the textual register configuration into `RegisterInstruction`s. The document grammar is

  ```text
  document     := (instruction / blank_line / comment_line)*
  instruction  := size_clause comma offset_clause comma data_clause
  size_clause  := "Size" colon hex
  offset_clause:= "Offset" colon hex
  data_clause  := "Data" colon hex
  hex          := ("0x" / "0X")? hex_digit+
  colon        := ws? ":" ws?
  comma        := ws? "," ws?
  comment_line := "#"+ comment_char* ws
  blank_line   := ws+
  ws           := <exactly one whitespace character>
  ```

  Alternatives are tried in the order written and an optional never gives back what it
  matched, so `0x` not followed by a hex digit is not a literal. `comment_char` is an ASCII
  letter or digit, a space, or one of `- , ( ) : / .`; the character after the comment body
  must be whitespace. The `Bare` grammar variant has no `comment_line` production.

  The whole document must match. Otherwise nothing is returned and the error points at the
  place where the repetition stopped.
*/

use log::{debug, trace};
use nom::{
  branch::alt,
  bytes::complete::{tag, take_while, take_while1},
  character::complete::{char as one_char, hex_digit1, satisfy},
  combinator::{map, opt, recognize, value},
  error::{context, ErrorKind, ParseError, VerboseError, VerboseErrorKind},
  multi::many0,
  sequence::{delimited, pair, preceded, tuple},
  IResult
};

use crate::config::GrammarVariant;
use crate::error::{Error, SyntaxError};
use crate::hex::HexLiteral;
use crate::register::{FieldKey, RegisterInstruction};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// The `size`, `offset`, and `data` literals of one instruction, as written.
type Clauses<'a> = (&'a str, &'a str, &'a str);

/// Whitespace in the regex `\s` sense, which includes the ASCII separator characters.
fn is_ws(c: char) -> bool {
  c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn is_comment_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || " -,():/.".contains(c)
}

fn whitespace(input: &str) -> ParseResult<'_, char> {
  satisfy(is_ws)(input)
}

fn separator<'a>(symbol: char) -> impl FnMut(&'a str) -> ParseResult<'a, char> {
  delimited(opt(whitespace), one_char(symbol), opt(whitespace))
}

fn hex_number(input: &str) -> ParseResult<'_, &str> {
  recognize(
    pair(
      opt(alt((tag("0x"), tag("0X")))),
      hex_digit1
    )
  )(input)
}

fn clause<'a>(key: FieldKey) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
  preceded(pair(tag(key.keyword()), separator(':')), hex_number)
}

fn instruction(input: &str) -> ParseResult<'_, Clauses<'_>> {
  tuple((
    context("size clause", clause(FieldKey::Size)),
    context("offset clause", preceded(separator(','), clause(FieldKey::Offset))),
    context("data clause", preceded(separator(','), clause(FieldKey::Data)))
  ))(input)
}

fn blank_line(input: &str) -> ParseResult<'_, &str> {
  take_while1(is_ws)(input)
}

fn comment_line(input: &str) -> ParseResult<'_, &str> {
  recognize(
    tuple((
      take_while1(|c: char| c == '#'),
      take_while(is_comment_char),
      whitespace
    ))
  )(input)
}

/// `comment_line` when comments are enabled, a parser that never matches otherwise.
fn comment_line_if<'a>(enabled: bool) -> impl FnMut(&'a str) -> ParseResult<'a, &'a str> {
  move |input: &'a str| match enabled {
    true  => comment_line(input),
    false => Err(nom::Err::Error(VerboseError::from_error_kind(input, ErrorKind::Tag)))
  }
}

/// Tags each instruction with the byte offset of its `Size` key within `text`.
fn positioned_instruction<'a>(
  text: &'a str
) -> impl FnMut(&'a str) -> ParseResult<'a, (usize, Clauses<'a>)> {
  move |input: &'a str| {
    let start = text.len() - input.len();
    let (rest, clauses) = instruction(input)?;
    trace!("instruction at byte {}: {:?}", start, clauses);
    Ok((rest, (start, clauses)))
  }
}

/// For text that starts like an instruction, the innermost clause that failed to match.
fn failed_clause(input: &str) -> Option<&'static str> {
  if !input.starts_with(FieldKey::Size.keyword()) {
    return None;
  }
  match instruction(input) {
    Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
      e.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(label) => Some(*label),
        _ => None
      })
    }
    _ => None
  }
}

/// Byte offset of the input a nom error was raised on. `Incomplete` cannot come from the
/// complete parsers used here; it is placed at the end of the document.
fn stopped_at(text: &str, error: &nom::Err<VerboseError<&str>>) -> usize {
  match error {
    nom::Err::Error(e) | nom::Err::Failure(e) => {
      e.errors.first().map_or(0, |(input, _)| text.len() - input.len())
    }
    nom::Err::Incomplete(_) => text.len()
  }
}

/**
  Parses the whole document into instructions in source order. Blank and comment lines
  contribute nothing. Any text that none of the productions accept fails the entire parse.
*/
pub fn parse(text: &str, grammar: GrammarVariant) -> Result<Vec<RegisterInstruction>, Error> {
  let comments = grammar == GrammarVariant::Commented;

  let production = alt((
    map(positioned_instruction(text), Some),
    value(None, blank_line),
    value(None, comment_line_if(comments))
  ));

  let (rest, found) = many0(production)(text)
    .map_err(|e| SyntaxError::at(text, stopped_at(text, &e), None))?;

  if !rest.is_empty() {
    let offset = text.len() - rest.len();
    return Err(SyntaxError::at(text, offset, failed_clause(rest)).into());
  }

  // Line numbers are counted incrementally; instructions arrive in offset order.
  let mut line     = 1;
  let mut counted  = 0;
  let mut instructions = Vec::new();

  for (start, (size, offset, data)) in found.into_iter().flatten() {
    line   += text[counted..start].matches('\n').count();
    counted = start;

    let size_literal = HexLiteral::new(size);
    let size_value   = size_literal.to_u32().ok_or_else(|| Error::SizeOutOfRange {
      line,
      text: size.to_string()
    })?;

    instructions.push(RegisterInstruction {
      line,
      size: size_value,
      size_literal,
      offset: HexLiteral::new(offset),
      data: HexLiteral::new(data)
    });
  }

  debug!("parsed {} instruction(s) with the {} grammar", instructions.len(), grammar);
  Ok(instructions)
}
