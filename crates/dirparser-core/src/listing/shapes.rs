//! Token-shape matchers for listing lines
//!
//! Directory record:
//! `2025-01-17 13:29:18.927  <DIR>   D---- ---A  f   Some_dir 1\`
//!
//! File record:
//! `2025-01-17 13:29:18.927  4096   ----- ---A  f   Some_dir 1\file.txt`
//!
//! The two flag columns are positional filler. Everything after them is the
//! optional category token followed by the path, which may itself contain
//! spaces and flag-like text. Lines are expected with trailing ASCII
//! whitespace already trimmed; other Unicode spaces belong to the path.

use nom::{
    bytes::complete::{tag, take_till1, take_while, take_while1, take_while_m_n},
    character::complete::{char, digit1},
    combinator::{recognize, rest, verify},
    sequence::{pair, preceded, tuple},
    IResult,
};

/// Fields captured from a file record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRecord<'a> {
    /// Decimal size digits, unparsed
    pub size: &'a str,
    /// Category token (if any) plus path
    pub path: &'a str,
}

fn is_blank(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// One or more ASCII whitespace characters
pub fn gap(input: &str) -> IResult<&str, &str> {
    take_while1(is_blank)(input)
}

/// A run of non-whitespace characters
pub fn token(input: &str) -> IResult<&str, &str> {
    take_till1(is_blank)(input)
}

/// The two whitespace-separated flag columns preceding the path
pub fn flag_columns(input: &str) -> IResult<&str, (&str, &str)> {
    pair(preceded(gap, token), preceded(gap, token))(input)
}

fn two_digits(input: &str) -> IResult<&str, &str> {
    take_while_m_n(2, 2, is_digit)(input)
}

fn four_digits(input: &str) -> IResult<&str, &str> {
    take_while_m_n(4, 4, is_digit)(input)
}

/// `YYYY-MM-DD`
pub fn date(input: &str) -> IResult<&str, &str> {
    recognize(tuple((four_digits, char('-'), two_digits, char('-'), two_digits)))(input)
}

/// `HH:MM:SS.fraction`
pub fn time(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        two_digits,
        char(':'),
        two_digits,
        char(':'),
        two_digits,
        char('.'),
        digit1,
    )))(input)
}

/// Remainder of the line, which must end in a path separator
pub fn directory_path(input: &str) -> IResult<&str, &str> {
    verify(rest, |path: &str| path.ends_with(is_separator))(input)
}

/// Remainder of the line, non-empty
pub fn file_path(input: &str) -> IResult<&str, &str> {
    verify(rest, |path: &str| !path.is_empty())(input)
}

/// Match a directory record starting at the marker
///
/// Returns the category-prefixed path including its trailing separator.
pub fn directory_record<'a>(input: &'a str, marker: &str) -> IResult<&'a str, &'a str> {
    let (input, _) = tag(marker)(input)?;
    let (input, _) = flag_columns(input)?;
    let (input, _) = gap(input)?;
    directory_path(input)
}

/// Match a file record from the start of the line
pub fn file_record(input: &str) -> IResult<&str, FileRecord<'_>> {
    let (input, (_, _, _, _, size, _, _, path)) = tuple((
        date,
        gap,
        time,
        gap,
        digit1,
        flag_columns,
        gap,
        file_path,
    ))(input)?;
    Ok((input, FileRecord { size, path }))
}

/// Match `label` followed by optional whitespace and a decimal count
pub fn counted_label<'a>(input: &'a str, label: &str) -> IResult<&'a str, &'a str> {
    preceded(tag(label), preceded(take_while(is_blank), digit1))(input)
}

/// Find the first position of `marker` in `line` at which `matcher` succeeds
pub fn find_at_marker<'a, T>(
    line: &'a str,
    marker: &str,
    mut matcher: impl FnMut(&'a str) -> IResult<&'a str, T>,
) -> Option<T> {
    if marker.is_empty() {
        return None;
    }
    line.match_indices(marker)
        .find_map(|(offset, _)| matcher(&line[offset..]).ok().map(|(_, value)| value))
}
