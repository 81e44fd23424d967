use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::deduce::Solution;
use crate::pattern::Pattern;

/// An output pattern matched none of the ten solved digit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPattern(pub Pattern);

impl Display for UnknownPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "the output pattern {} is not any solved digit", self.0)
    }
}

impl Error for UnknownPattern {}

/// Read the four output patterns as one number, most significant digit
/// first.
pub fn output_value(solution: &Solution, output: &[Pattern; 4]) -> Result<u32, UnknownPattern> {
    let mut number: u32 = 0;
    for pattern in output {
        match solution.digit(*pattern) {
            Some(digit) => {
                number = number * 10 + u32::from(digit);
            }
            None => {
                return Err(UnknownPattern(*pattern));
            }
        }
    }
    Ok(number)
}

/// Count the output patterns whose number of lit wires alone gives the
/// digit away: only 1, 7, 4 and 8 light 2, 3, 4 and 7 wires.  Works on
/// a raw entry, no solving needed.
pub fn count_unambiguous(output: &[Pattern; 4]) -> usize {
    output
        .iter()
        .filter(|p| matches!(p.len(), 2 | 3 | 4 | 7))
        .count()
}

#[cfg(test)]
use crate::{deduce::solve, entry::Entry};

#[cfg(test)]
const EXAMPLE: &str =
    "acedgfb cdfbe gcdfa fbcad dab cefabd cdfgeb eafb cagedb ab | cdfeb fcadb cdfeb cdbaf";

// First line of the longer published example; two of its output
// patterns (lengths 7 and 4) are identifiable without solving.
#[cfg(test)]
const SECOND_EXAMPLE: &str =
    "be cfbegad cbdgef fgaecd cgeb fdcge agebfd fecdb fabcd edb | fdgacbe cefdb cefbgd gcbe";

#[cfg(test)]
fn pat(token: &str) -> Pattern {
    Pattern::try_from(token).expect("test pattern should be valid")
}

#[cfg(test)]
fn decode(line: &str) -> (u32, usize) {
    let entry = Entry::try_from(line).expect("test line should parse");
    let solution = solve(entry.observed()).expect("test line should solve");
    let value = output_value(&solution, entry.output()).expect("test output should decode");
    (value, count_unambiguous(entry.output()))
}

#[test]
fn test_example_decodes_to_5353() {
    assert_eq!(decode(EXAMPLE).0, 5353);
}

#[test]
fn test_example_has_no_unambiguous_outputs() {
    // All four of its output patterns have 5 or 6 wires lit.
    assert_eq!(decode(EXAMPLE).1, 0);
}

#[test]
fn test_second_example_decodes_to_8394() {
    assert_eq!(decode(SECOND_EXAMPLE), (8394, 2));
}

#[test]
fn test_totals_over_both_examples() {
    let decoded: Vec<(u32, usize)> = [EXAMPLE, SECOND_EXAMPLE]
        .iter()
        .map(|line| decode(line))
        .collect();
    let value_total: u32 = decoded.iter().map(|(value, _)| value).sum();
    let count_total: usize = decoded.iter().map(|(_, count)| count).sum();
    assert_eq!(value_total, 5353 + 8394);
    assert_eq!(count_total, 2);
}

#[test]
fn test_unknown_output_pattern_is_an_error() {
    let entry = Entry::try_from(EXAMPLE).expect("example line should parse");
    let solution = solve(entry.observed()).expect("example entry should solve");
    let output = [pat("abc"), pat("ab"), pat("ab"), pat("ab")];
    assert_eq!(
        output_value(&solution, &output),
        Err(UnknownPattern(pat("abc")))
    );
}

#[test]
fn test_count_unambiguous_needs_no_solution() {
    // One of each decisive length, in scrambled letters.
    assert_eq!(
        count_unambiguous(&[pat("gc"), pat("cbg"), pat("gcbe"), pat("gcadebf")]),
        4
    );
    // The ambiguous lengths never count.
    assert_eq!(
        count_unambiguous(&[pat("fecdb"), pat("fabcd"), pat("cbdgef"), pat("agebfd")]),
        0
    );
}

#[test]
fn test_leading_zero_outputs_stay_in_range() {
    let entry = Entry::try_from(EXAMPLE).expect("example line should parse");
    let solution = solve(entry.observed()).expect("example entry should solve");
    // 0 0 0 1 reads as the number 1.
    let output = [pat("cagedb"), pat("cagedb"), pat("cagedb"), pat("ab")];
    assert_eq!(output_value(&solution, &output), Ok(1));
}
