use std::error::Error;
use std::fmt::{self, Display, Formatter};

use tracing::{event, Level};

use crate::pattern::{segments_of, Pattern, Segment};

/// One piece of knowledge established by a deduction rule: either
/// "this pattern is that digit" or "this wire drives that segment".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fact {
    Digit(u8, Pattern),
    Wire(Segment, char),
}

impl Display for Fact {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Digit(digit, pattern) => write!(f, "digit {} is {}", digit, pattern),
            Fact::Wire(segment, wire) => {
                write!(f, "the {} segment is driven by wire '{}'", segment, wire)
            }
        }
    }
}

/// A deduction rule could not nail down its fact: the candidate set it
/// examined was empty or still ambiguous.  The entry cannot describe a
/// real display, and no partial answer is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompletePuzzle {
    pub step: &'static str,
    pub found: usize,
}

impl Display for IncompletePuzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "deduction stalled at step \"{}\": expected exactly one candidate, found {}",
            self.step, self.found
        )
    }
}

impl Error for IncompletePuzzle {}

/// The facts established so far while solving one entry: the patterns
/// not yet assigned to a digit, plus the two partial maps.  Rules read
/// it, `record` grows it.  Only a complete set of facts ever leaves,
/// as a [`Solution`].
struct FactBase {
    pool: Vec<Pattern>,
    digits: [Option<Pattern>; 10],
    wires: [Option<char>; 7],
}

impl FactBase {
    fn new(observed: &[Pattern; 10]) -> FactBase {
        FactBase {
            pool: observed.to_vec(),
            digits: [None; 10],
            wires: [None; 7],
        }
    }

    fn digit(&self, digit: u8) -> Pattern {
        match self.digits[usize::from(digit)] {
            Some(pattern) => pattern,
            None => {
                panic!(
                    "rule ordering is broken: digit {} has not been identified yet",
                    digit
                );
            }
        }
    }

    fn wire(&self, segment: Segment) -> char {
        match self.wires[segment as usize] {
            Some(wire) => wire,
            None => {
                panic!(
                    "rule ordering is broken: the {} segment has not been identified yet",
                    segment
                );
            }
        }
    }

    /// The one still-unassigned pattern with `len` lit wires that also
    /// satisfies `wanted`, or the number of candidates actually seen.
    fn sole_candidate<F>(&self, len: usize, wanted: F) -> Result<Pattern, usize>
    where
        F: Fn(Pattern) -> bool,
    {
        let candidates: Vec<Pattern> = self
            .pool
            .iter()
            .copied()
            .filter(|p| p.len() == len && wanted(*p))
            .collect();
        match candidates.as_slice() {
            [only] => Ok(*only),
            _ => Err(candidates.len()),
        }
    }

    fn record(&mut self, fact: Fact) {
        match fact {
            Fact::Digit(digit, pattern) => {
                match self.pool.iter().position(|p| *p == pattern) {
                    Some(i) => {
                        self.pool.swap_remove(i);
                    }
                    None => {
                        panic!(
                            "digit {} was identified as {}, which is not in the unassigned pool",
                            digit, pattern
                        );
                    }
                }
                let slot = &mut self.digits[usize::from(digit)];
                assert!(slot.is_none(), "digit {} has been identified twice", digit);
                *slot = Some(pattern);
            }
            Fact::Wire(segment, wire) => {
                assert!(
                    !self.wires.iter().flatten().any(|w| *w == wire),
                    "wire '{}' has been assigned to more than one segment",
                    wire
                );
                let slot = &mut self.wires[segment as usize];
                assert!(
                    slot.is_none(),
                    "the {} segment has been identified twice",
                    segment
                );
                *slot = Some(wire);
            }
        }
    }

    fn into_solution(self) -> Solution {
        assert!(
            self.pool.is_empty(),
            "deduction finished with unassigned patterns: {:?}",
            self.pool
        );
        let digits = self.digits.map(|slot| match slot {
            Some(pattern) => pattern,
            None => panic!("deduction finished with an unidentified digit"),
        });
        let wires = self.wires.map(|slot| match slot {
            Some(wire) => wire,
            None => panic!("deduction finished with an unidentified segment"),
        });
        Solution { digits, wires }
    }
}

fn lone_wire_of(pattern: Pattern) -> Result<char, usize> {
    pattern.lone_wire().ok_or(pattern.len())
}

fn digit_one(facts: &FactBase) -> Result<Fact, usize> {
    facts.sole_candidate(2, |_| true).map(|p| Fact::Digit(1, p))
}

fn digit_seven(facts: &FactBase) -> Result<Fact, usize> {
    facts.sole_candidate(3, |_| true).map(|p| Fact::Digit(7, p))
}

fn digit_four(facts: &FactBase) -> Result<Fact, usize> {
    facts.sole_candidate(4, |_| true).map(|p| Fact::Digit(4, p))
}

fn digit_eight(facts: &FactBase) -> Result<Fact, usize> {
    facts.sole_candidate(7, |_| true).map(|p| Fact::Digit(8, p))
}

// 9 is the only six-wire digit that lights everything 4 lights.
fn digit_nine(facts: &FactBase) -> Result<Fact, usize> {
    let four = facts.digit(4);
    facts
        .sole_candidate(6, |p| p.contains_all(four))
        .map(|p| Fact::Digit(9, p))
}

// 9 is 8 with exactly the bottom-left segment dark.
fn wire_bottom_left(facts: &FactBase) -> Result<Fact, usize> {
    lone_wire_of(facts.digit(8) - facts.digit(9))
        .map(|w| Fact::Wire(Segment::BottomLeft, w))
}

// 2 is the only five-wire digit with bottom-left lit.
fn digit_two(facts: &FactBase) -> Result<Fact, usize> {
    let bottom_left = facts.wire(Segment::BottomLeft);
    facts
        .sole_candidate(5, |p| p.has(bottom_left))
        .map(|p| Fact::Digit(2, p))
}

// Of the five-wire digits, only 3 lights both wires of 1.
fn digit_three(facts: &FactBase) -> Result<Fact, usize> {
    let one = facts.digit(1);
    facts
        .sole_candidate(5, |p| p.contains_all(one))
        .map(|p| Fact::Digit(3, p))
}

fn digit_five(facts: &FactBase) -> Result<Fact, usize> {
    facts.sole_candidate(5, |_| true).map(|p| Fact::Digit(5, p))
}

// 6 is 5 with the bottom-left segment lit as well.
fn digit_six(facts: &FactBase) -> Result<Fact, usize> {
    let five_plus = facts.digit(5).with(facts.wire(Segment::BottomLeft));
    facts
        .sole_candidate(6, |p| p.contains_all(five_plus))
        .map(|p| Fact::Digit(6, p))
}

fn digit_zero(facts: &FactBase) -> Result<Fact, usize> {
    facts.sole_candidate(6, |_| true).map(|p| Fact::Digit(0, p))
}

// 7 is 1 plus the top segment.
fn wire_top(facts: &FactBase) -> Result<Fact, usize> {
    lone_wire_of(facts.digit(7) - facts.digit(1)).map(|w| Fact::Wire(Segment::Top, w))
}

// 0 is 8 minus the middle segment.
fn wire_middle(facts: &FactBase) -> Result<Fact, usize> {
    lone_wire_of(facts.digit(8) - facts.digit(0)).map(|w| Fact::Wire(Segment::Middle, w))
}

// The one segment 3 has beyond 7-plus-middle.  The difference must be
// taken in this direction; the other way round it is never a single
// wire.
fn wire_bottom(facts: &FactBase) -> Result<Fact, usize> {
    let seven_plus = facts.digit(7).with(facts.wire(Segment::Middle));
    lone_wire_of(facts.digit(3) - seven_plus).map(|w| Fact::Wire(Segment::Bottom, w))
}

// 6 is 8 with exactly the top-right segment dark.
fn wire_top_right(facts: &FactBase) -> Result<Fact, usize> {
    lone_wire_of(facts.digit(8) - facts.digit(6)).map(|w| Fact::Wire(Segment::TopRight, w))
}

// The one segment 8 has beyond 3-plus-bottom-left.  Direction matters
// here too.
fn wire_top_left(facts: &FactBase) -> Result<Fact, usize> {
    let three_plus = facts.digit(3).with(facts.wire(Segment::BottomLeft));
    lone_wire_of(facts.digit(8) - three_plus).map(|w| Fact::Wire(Segment::TopLeft, w))
}

// 1 lights top-right and bottom-right only, and top-right is already
// known.
fn wire_bottom_right(facts: &FactBase) -> Result<Fact, usize> {
    let top_right = Pattern::EMPTY.with(facts.wire(Segment::TopRight));
    lone_wire_of(facts.digit(1) - top_right).map(|w| Fact::Wire(Segment::BottomRight, w))
}

type Rule = fn(&FactBase) -> Result<Fact, usize>;

/// The deduction chain.  Order matters: every rule may read only facts
/// established by the rules before it.
const RULES: [(&str, Rule); 17] = [
    ("digit 1", digit_one),
    ("digit 7", digit_seven),
    ("digit 4", digit_four),
    ("digit 8", digit_eight),
    ("digit 9", digit_nine),
    ("bottom-left segment", wire_bottom_left),
    ("digit 2", digit_two),
    ("digit 3", digit_three),
    ("digit 5", digit_five),
    ("digit 6", digit_six),
    ("digit 0", digit_zero),
    ("top segment", wire_top),
    ("middle segment", wire_middle),
    ("bottom segment", wire_bottom),
    ("top-right segment", wire_top_right),
    ("top-left segment", wire_top_left),
    ("bottom-right segment", wire_bottom_right),
];

/// Work out which scrambled pattern is which digit, and which
/// scrambled wire drives which segment.
///
/// Four digits give themselves away by the number of lit wires alone:
///
/// | lit wires | digit |
/// | --------- | ----- |
/// | 2         | 1     |
/// | 3         | 7     |
/// | 4         | 4     |
/// | 7         | 8     |
///
/// Everything else falls to set comparisons against facts already in
/// hand:
///
/// * 9 is the six-wire pattern containing all of 4; bottom-left is the
///   wire 8 has and 9 lacks.
/// * 2 is the five-wire pattern with bottom-left lit, 3 is the
///   five-wire pattern containing all of 1, and 5 is the five-wire
///   pattern left over.
/// * 6 is the six-wire pattern containing all of 5 plus bottom-left,
///   and 0 is the six-wire pattern left over.
/// * top is 7 minus 1, middle is 8 minus 0, bottom is 3 minus
///   7-plus-middle, top-right is 8 minus 6, top-left is 8 minus
///   3-plus-bottom-left, and bottom-right is the wire of 1 that is not
///   top-right.
///
/// Each step must see exactly one candidate.  Anything else means the
/// ten patterns cannot describe a real display, and solving stops with
/// an [`IncompletePuzzle`] naming the step that stalled.
pub fn solve(observed: &[Pattern; 10]) -> Result<Solution, IncompletePuzzle> {
    let mut facts = FactBase::new(observed);
    for (step, rule) in RULES {
        match rule(&facts) {
            Ok(fact) => {
                event!(Level::TRACE, "{}: {}", step, fact);
                facts.record(fact);
            }
            Err(found) => {
                return Err(IncompletePuzzle { step, found });
            }
        }
    }
    Ok(facts.into_solution())
}

/// A fully solved entry: the scrambled pattern of every digit and the
/// scrambled wire of every segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    digits: [Pattern; 10],
    wires: [char; 7],
}

impl Solution {
    /// The digit a pattern stands for, if it is one of the ten.
    pub fn digit(&self, pattern: Pattern) -> Option<u8> {
        self.digits
            .iter()
            .position(|p| *p == pattern)
            .map(|i| i as u8)
    }

    /// The scrambled wire that drives `segment`.
    pub fn wire(&self, segment: Segment) -> char {
        self.wires[segment as usize]
    }

    /// Push the reference glyph of `digit` through the wire map.  For
    /// a correct solution this reproduces the observed pattern of that
    /// digit, which makes it a useful diagnostic.
    pub fn render(&self, digit: u8) -> Pattern {
        segments_of(digit)
            .iter()
            .fold(Pattern::EMPTY, |p, segment| p.with(self.wire(*segment)))
    }
}

#[cfg(test)]
fn pat(token: &str) -> Pattern {
    Pattern::try_from(token).expect("test pattern should be valid")
}

#[cfg(test)]
fn example_observed() -> [Pattern; 10] {
    [
        "acedgfb", "cdfbe", "gcdfa", "fbcad", "dab", "cefabd", "cdfgeb", "eafb", "cagedb", "ab",
    ]
    .map(|token| pat(token))
}

#[test]
fn test_solve_identifies_every_digit() {
    let solution = solve(&example_observed()).expect("example entry should solve");
    assert_eq!(solution.digit(pat("cagedb")), Some(0));
    assert_eq!(solution.digit(pat("ab")), Some(1));
    assert_eq!(solution.digit(pat("gcdfa")), Some(2));
    assert_eq!(solution.digit(pat("fbcad")), Some(3));
    assert_eq!(solution.digit(pat("eafb")), Some(4));
    assert_eq!(solution.digit(pat("cdfbe")), Some(5));
    assert_eq!(solution.digit(pat("cdfgeb")), Some(6));
    assert_eq!(solution.digit(pat("dab")), Some(7));
    assert_eq!(solution.digit(pat("acedgfb")), Some(8));
    assert_eq!(solution.digit(pat("cefabd")), Some(9));
}

#[test]
fn test_solve_pins_every_wire() {
    let solution = solve(&example_observed()).expect("example entry should solve");
    assert_eq!(solution.wire(Segment::Top), 'd');
    assert_eq!(solution.wire(Segment::TopLeft), 'e');
    assert_eq!(solution.wire(Segment::TopRight), 'a');
    assert_eq!(solution.wire(Segment::Middle), 'f');
    assert_eq!(solution.wire(Segment::BottomLeft), 'g');
    assert_eq!(solution.wire(Segment::BottomRight), 'b');
    assert_eq!(solution.wire(Segment::Bottom), 'c');
}

#[test]
fn test_assignments_are_distinct() {
    let observed = example_observed();
    let solution = solve(&observed).expect("example entry should solve");
    let digits: std::collections::HashSet<u8> = observed
        .iter()
        .map(|p| solution.digit(*p).expect("every observed pattern is a digit"))
        .collect();
    assert_eq!(digits.len(), 10);
}

#[test]
fn test_render_round_trips_every_digit() {
    let solution = solve(&example_observed()).expect("example entry should solve");
    for digit in 0..=9 {
        assert_eq!(solution.digit(solution.render(digit)), Some(digit));
    }
}

#[test]
fn test_solve_is_pure() {
    let observed = example_observed();
    assert_eq!(solve(&observed), solve(&observed));
}

#[test]
fn test_missing_unique_length_stalls_cleanly() {
    // No three-wire pattern at all.
    let mut observed = example_observed();
    observed[4] = pat("abcdfg");
    assert_eq!(
        solve(&observed),
        Err(IncompletePuzzle {
            step: "digit 7",
            found: 0,
        })
    );
}

#[test]
fn test_ambiguous_length_stalls_cleanly() {
    // Two two-wire patterns.
    let mut observed = example_observed();
    observed[4] = pat("ac");
    assert_eq!(
        solve(&observed),
        Err(IncompletePuzzle {
            step: "digit 1",
            found: 2,
        })
    );
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
proptest! {
    #[test]
    fn solve_recovers_any_scrambling(
        wires in Just(vec!['a', 'b', 'c', 'd', 'e', 'f', 'g']).prop_shuffle()
    ) {
        let scrambled: [Pattern; 10] = std::array::from_fn(|d| {
            segments_of(d as u8)
                .iter()
                .fold(Pattern::EMPTY, |p, segment| p.with(wires[*segment as usize]))
        });
        let solution = solve(&scrambled).expect("a consistent scrambling must solve");
        for (d, pattern) in scrambled.iter().enumerate() {
            prop_assert_eq!(solution.digit(*pattern), Some(d as u8));
        }
        for segment in Segment::ALL {
            prop_assert_eq!(solution.wire(segment), wires[segment as usize]);
        }
    }
}
