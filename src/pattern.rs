use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::Sub;

/// One lit display pattern, canonicalized to the set of wires that are
/// active.  Bit N of the mask stands for wire letter ('a' + N), so two
/// raw tokens containing the same letters in any order compare equal
/// and hash equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern(u8);

impl Pattern {
    pub const EMPTY: Pattern = Pattern(0);

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn has(self, wire: char) -> bool {
        self.0 & wire_bit(wire) != 0
    }

    /// True if every wire of `other` is also lit in `self`.
    pub fn contains_all(self, other: Pattern) -> bool {
        self.0 & other.0 == other.0
    }

    /// The same pattern with one more wire lit.
    pub fn with(self, wire: char) -> Pattern {
        Pattern(self.0 | wire_bit(wire))
    }

    /// The single wire of a one-wire pattern, if it is one.
    pub fn lone_wire(self) -> Option<char> {
        if self.len() == 1 {
            self.wires().next()
        } else {
            None
        }
    }

    pub fn wires(self) -> impl Iterator<Item = char> {
        (0u8..7)
            .filter(move |bit| self.0 & (1 << bit) != 0)
            .map(|bit| char::from(b'a' + bit))
    }
}

fn wire_bit(wire: char) -> u8 {
    assert!(
        ('a'..='g').contains(&wire),
        "'{}' is not a wire letter",
        wire
    );
    1 << (wire as u8 - b'a')
}

/// Set difference: the wires lit in `self` but not in `other`.
impl Sub for Pattern {
    type Output = Pattern;
    fn sub(self, other: Pattern) -> Pattern {
        Pattern(self.0 & !other.0)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum BadPattern {
    Empty,
    NotAWire(char),
}

impl Display for BadPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BadPattern::Empty => f.write_str("a pattern needs at least one wire"),
            BadPattern::NotAWire(ch) => {
                write!(f, "'{}' is not a wire letter (wires are a to g)", ch)
            }
        }
    }
}

impl Error for BadPattern {}

impl TryFrom<&str> for Pattern {
    type Error = BadPattern;
    fn try_from(token: &str) -> Result<Pattern, BadPattern> {
        if token.is_empty() {
            return Err(BadPattern::Empty);
        }
        let mut mask: u8 = 0;
        for ch in token.chars() {
            if !('a'..='g').contains(&ch) {
                return Err(BadPattern::NotAWire(ch));
            }
            mask |= 1 << (ch as u8 - b'a');
        }
        Ok(Pattern(mask))
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for wire in self.wires() {
            write!(f, "{}", wire)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({})", self)
    }
}

/// The seven strokes of the reference glyph, named by position.  These
/// are fixed by the display geometry and have nothing to do with any
/// entry's scrambling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Top,
    TopLeft,
    TopRight,
    Middle,
    BottomLeft,
    BottomRight,
    Bottom,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::Top,
        Segment::TopLeft,
        Segment::TopRight,
        Segment::Middle,
        Segment::BottomLeft,
        Segment::BottomRight,
        Segment::Bottom,
    ];
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Segment::Top => "top",
            Segment::TopLeft => "top-left",
            Segment::TopRight => "top-right",
            Segment::Middle => "middle",
            Segment::BottomLeft => "bottom-left",
            Segment::BottomRight => "bottom-right",
            Segment::Bottom => "bottom",
        })
    }
}

/// The segments lit by each digit on an unscrambled display.
///
/// | digit | segments lit |
/// | ----- | ------------ |
/// | 0     | 6            |
/// | 1     | 2            |
/// | 2     | 5            |
/// | 3     | 5            |
/// | 4     | 4            |
/// | 5     | 5            |
/// | 6     | 6            |
/// | 7     | 3            |
/// | 8     | 7            |
/// | 9     | 6            |
pub fn segments_of(digit: u8) -> &'static [Segment] {
    use Segment::*;
    match digit {
        0 => &[Top, TopLeft, TopRight, BottomLeft, BottomRight, Bottom],
        1 => &[TopRight, BottomRight],
        2 => &[Top, TopRight, Middle, BottomLeft, Bottom],
        3 => &[Top, TopRight, Middle, BottomRight, Bottom],
        4 => &[TopLeft, TopRight, Middle, BottomRight],
        5 => &[Top, TopLeft, Middle, BottomRight, Bottom],
        6 => &[Top, TopLeft, Middle, BottomLeft, BottomRight, Bottom],
        7 => &[Top, TopRight, BottomRight],
        8 => &[Top, TopLeft, TopRight, Middle, BottomLeft, BottomRight, Bottom],
        9 => &[Top, TopLeft, TopRight, Middle, BottomRight, Bottom],
        _ => {
            panic!("there is no reference glyph for '{}'", digit);
        }
    }
}

#[cfg(test)]
fn pat(token: &str) -> Pattern {
    Pattern::try_from(token).expect("test pattern should be valid")
}

#[test]
fn test_canonicalization_is_order_independent() {
    assert_eq!(pat("acedgfb"), pat("bdfegca"));
    assert_eq!(pat("ab"), pat("ba"));
    assert_ne!(pat("ab"), pat("ac"));
}

#[test]
fn test_duplicate_wires_collapse() {
    assert_eq!(pat("aab"), pat("ab"));
    assert_eq!(pat("aab").len(), 2);
}

#[test]
fn test_rejects_tokens_outside_the_alphabet() {
    assert_eq!(Pattern::try_from(""), Err(BadPattern::Empty));
    assert_eq!(Pattern::try_from("abz"), Err(BadPattern::NotAWire('z')));
    assert_eq!(Pattern::try_from("aB"), Err(BadPattern::NotAWire('B')));
}

#[test]
fn test_set_operations() {
    assert!(pat("abcdefg").contains_all(pat("eafb")));
    assert!(!pat("cdfgeb").contains_all(pat("eafb")));
    assert_eq!(pat("acedgfb") - pat("cefabd"), pat("g"));
    assert_eq!(pat("ab").with('c'), pat("abc"));
    assert!(pat("gcdfa").has('g'));
    assert!(!pat("cdfbe").has('g'));
}

#[test]
fn test_lone_wire() {
    assert_eq!(pat("e").lone_wire(), Some('e'));
    assert_eq!(pat("ab").lone_wire(), None);
    assert_eq!(Pattern::EMPTY.lone_wire(), None);
}

#[test]
fn test_display_is_sorted() {
    assert_eq!(pat("gfedcba").to_string(), "abcdefg");
    assert_eq!(pat("dab").to_string(), "abd");
}

#[test]
fn test_reference_glyph_lengths() {
    let lengths: Vec<usize> = (0..=9).map(|d| segments_of(d).len()).collect();
    assert_eq!(lengths, [6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
proptest! {
    #[test]
    fn canonical_form_ignores_order_and_repetition(token in "[a-g]{1,12}") {
        let reversed: String = token.chars().rev().collect();
        let doubled: String = format!("{}{}", token, token);
        let p = pat(&token);
        prop_assert_eq!(p, pat(&reversed));
        prop_assert_eq!(p, pat(&doubled));
        let distinct: std::collections::HashSet<char> = token.chars().collect();
        prop_assert_eq!(p.len(), distinct.len());
    }
}
