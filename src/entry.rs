use std::error::Error;
use std::fmt::{self, Display, Formatter};

use nom::{
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::map_res,
    multi::separated_list1,
    sequence::separated_pair,
    IResult,
};

use crate::pattern::Pattern;

/// One line of puzzle input: the ten observed patterns (all digits,
/// scrambled with the entry's own wiring) and the four output patterns
/// to decode with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    observed: [Pattern; 10],
    output: [Pattern; 4],
}

impl Entry {
    pub fn observed(&self) -> &[Pattern; 10] {
        &self.observed
    }

    pub fn output(&self) -> &[Pattern; 4] {
        &self.output
    }
}

fn pattern_token(input: &str) -> IResult<&str, Pattern> {
    map_res(
        take_while1(|ch: char| ('a'..='g').contains(&ch)),
        Pattern::try_from,
    )(input)
}

fn pattern_list(input: &str) -> IResult<&str, Vec<Pattern>> {
    separated_list1(char(' '), pattern_token)(input)
}

fn parse_entry(input: &str) -> IResult<&str, (Vec<Pattern>, Vec<Pattern>)> {
    separated_pair(pattern_list, tag(" | "), pattern_list)(input)
}

/// The observed half of an entry does not describe ten distinct digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedEntry {
    Duplicate(Pattern),
    LengthProfile(Vec<usize>),
}

impl Display for MalformedEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MalformedEntry::Duplicate(pattern) => {
                write!(
                    f,
                    "the pattern {} appears more than once among the observed ten",
                    pattern
                )
            }
            MalformedEntry::LengthProfile(lengths) => {
                write!(
                    f,
                    "observed pattern sizes {:?} do not match one each of 2, 3, 4 and 7 \
                     plus three each of 5 and 6",
                    lengths
                )
            }
        }
    }
}

impl Error for MalformedEntry {}

/// Ten observed patterns can only cover the digits 0 to 9 once each if
/// they are pairwise distinct and their sizes are one each of 2, 3, 4
/// and 7 plus three each of 5 and 6.  Checked before any deduction is
/// attempted.
pub fn check_observed(observed: &[Pattern; 10]) -> Result<(), MalformedEntry> {
    for (i, pattern) in observed.iter().enumerate() {
        if observed[..i].contains(pattern) {
            return Err(MalformedEntry::Duplicate(*pattern));
        }
    }
    let mut lengths: Vec<usize> = observed.iter().map(|p| p.len()).collect();
    lengths.sort_unstable();
    if lengths != [2, 3, 4, 5, 5, 5, 6, 6, 6, 7] {
        return Err(MalformedEntry::LengthProfile(lengths));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    Syntax(String),
    ObservedCount(usize),
    OutputCount(usize),
    Malformed(MalformedEntry),
}

impl Display for EntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntryError::Syntax(detail) => f.write_str(detail),
            EntryError::ObservedCount(n) => {
                write!(f, "expected 10 observed patterns, got {}", n)
            }
            EntryError::OutputCount(n) => {
                write!(f, "expected 4 output patterns, got {}", n)
            }
            EntryError::Malformed(e) => write!(f, "{}", e),
        }
    }
}

impl Error for EntryError {}

impl From<MalformedEntry> for EntryError {
    fn from(e: MalformedEntry) -> EntryError {
        EntryError::Malformed(e)
    }
}

impl TryFrom<&str> for Entry {
    type Error = EntryError;
    fn try_from(line: &str) -> Result<Entry, EntryError> {
        match parse_entry(line) {
            Ok((unparsed, (observed, output))) => {
                if !unparsed.is_empty() {
                    return Err(EntryError::Syntax(format!(
                        "unexpected trailing junk: '{}'",
                        unparsed
                    )));
                }
                let observed: [Pattern; 10] = match observed.try_into() {
                    Ok(ten) => ten,
                    Err(tokens) => return Err(EntryError::ObservedCount(tokens.len())),
                };
                let output: [Pattern; 4] = match output.try_into() {
                    Ok(four) => four,
                    Err(tokens) => return Err(EntryError::OutputCount(tokens.len())),
                };
                check_observed(&observed)?;
                Ok(Entry { observed, output })
            }
            Err(e) => Err(EntryError::Syntax(format!(
                "failed to parse '{}': {}",
                line, e
            ))),
        }
    }
}

#[cfg(test)]
const EXAMPLE: &str =
    "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

#[cfg(test)]
fn pat(token: &str) -> Pattern {
    Pattern::try_from(token).expect("test pattern should be valid")
}

#[test]
fn test_parses_the_example_line() {
    let entry = Entry::try_from(EXAMPLE).expect("example line should parse");
    assert_eq!(entry.observed()[0], pat("acedgfb"));
    assert_eq!(entry.observed()[9], pat("ab"));
    assert_eq!(
        entry.output(),
        &[pat("cdfeb"), pat("fcadb"), pat("cdfeb"), pat("cdbaf")]
    );
}

#[test]
fn test_output_patterns_are_canonical() {
    let entry = Entry::try_from(EXAMPLE).expect("example line should parse");
    // Same wires, different scramble order.
    assert_eq!(entry.output()[0], pat("befdc"));
}

#[test]
fn test_rejects_trailing_junk() {
    let line = format!("{} x", EXAMPLE);
    assert!(matches!(
        Entry::try_from(line.as_str()),
        Err(EntryError::Syntax(_))
    ));
}

#[test]
fn test_rejects_missing_separator() {
    let line = EXAMPLE.replace(" | ", " ");
    assert!(matches!(
        Entry::try_from(line.as_str()),
        Err(EntryError::Syntax(_))
    ));
}

#[test]
fn test_rejects_wrong_observed_arity() {
    let line = EXAMPLE.replacen("acedgfb ", "", 1);
    assert_eq!(
        Entry::try_from(line.as_str()),
        Err(EntryError::ObservedCount(9))
    );
}

#[test]
fn test_rejects_wrong_output_arity() {
    let line = EXAMPLE.replacen(" cdbaf", "", 1);
    assert_eq!(
        Entry::try_from(line.as_str()),
        Err(EntryError::OutputCount(3))
    );
}

#[test]
fn test_rejects_duplicate_observed_pattern() {
    // Nine distinct patterns instead of ten; the length profile still
    // looks right.
    let line = EXAMPLE.replacen("gcdfa", "cdfbe", 1);
    assert_eq!(
        Entry::try_from(line.as_str()),
        Err(EntryError::Malformed(MalformedEntry::Duplicate(pat(
            "cdfbe"
        ))))
    );
}

#[test]
fn test_rejects_bad_length_profile() {
    let line = EXAMPLE.replacen(" ab |", " abcde |", 1);
    assert_eq!(
        Entry::try_from(line.as_str()),
        Err(EntryError::Malformed(MalformedEntry::LengthProfile(vec![
            3, 4, 5, 5, 5, 5, 6, 6, 6, 7
        ])))
    );
}

#[test]
fn test_check_observed_accepts_the_example() {
    let entry = Entry::try_from(EXAMPLE).expect("example line should parse");
    assert_eq!(check_observed(entry.observed()), Ok(()));
}
