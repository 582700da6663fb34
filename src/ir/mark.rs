//! The mark catalog.
//!
//! Marks are the characters that anchor geometry in an ASCIImage grid. The
//! catalog order (digits, then upper case, then lower case) is what decides
//! whether two marks are adjacent, independent of where they sit in the grid.
//! The lower case `o` is left out so it cannot be confused with a zero.

use std::fmt;

/// Every recognized mark, in catalog order.
pub const CATALOG: [char; 60] = [
    '1', '2', '3', '4', '5', '6', '7', '8', '9', //
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', //
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', //
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', //
    'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// A catalog character, identified by its position in [`CATALOG`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark(u8);

impl Mark {
    /// Looks up the mark for a character, if it is in the catalog.
    pub fn from_char(c: char) -> Option<Self> {
        let index = match c {
            '1'..='9' => c as usize - '1' as usize,
            'A'..='Z' => 9 + (c as usize - 'A' as usize),
            'a'..='n' => 35 + (c as usize - 'a' as usize),
            'p'..='z' => 49 + (c as usize - 'p' as usize),
            _ => return None,
        };
        Some(Self(index as u8))
    }

    /// Returns the mark at a catalog position.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CATALOG.len()).then_some(Self(index as u8))
    }

    /// Position of this mark in catalog order.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The character this mark is written as.
    #[inline]
    pub fn as_char(&self) -> char {
        CATALOG[self.index()]
    }

    /// True if `next` immediately follows this mark in catalog order.
    pub fn precedes(&self, next: Mark) -> bool {
        self.index() + 1 == next.index()
    }

    /// Iterates over the whole catalog in order.
    pub fn all() -> impl Iterator<Item = Mark> {
        (0..CATALOG.len()).map(|i| Mark(i as u8))
    }
}

impl fmt::Debug for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mark({:?})", self.as_char())
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_excludes_lowercase_o() {
        assert!(!CATALOG.contains(&'o'));
        assert!(Mark::from_char('o').is_none());
        assert!(Mark::from_char('O').is_some());
    }

    #[test]
    fn test_from_char_agrees_with_catalog() {
        for (i, c) in CATALOG.iter().enumerate() {
            let mark = Mark::from_char(*c).expect("catalog char is a mark");
            assert_eq!(mark.index(), i);
            assert_eq!(mark.as_char(), *c);
        }
    }

    #[test]
    fn test_non_marks_are_rejected() {
        for c in ['0', '.', '#', ' ', '-', 'é'] {
            assert!(Mark::from_char(c).is_none(), "{c:?} should not be a mark");
        }
    }

    #[test]
    fn test_adjacency_crosses_groups() {
        let nine = Mark::from_char('9').unwrap();
        let upper_a = Mark::from_char('A').unwrap();
        let n = Mark::from_char('n').unwrap();
        let p = Mark::from_char('p').unwrap();

        assert!(nine.precedes(upper_a));
        assert!(n.precedes(p));
        assert!(!upper_a.precedes(nine));
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(Mark::from_index(0).map(|m| m.as_char()), Some('1'));
        assert_eq!(Mark::from_index(59).map(|m| m.as_char()), Some('z'));
        assert!(Mark::from_index(60).is_none());
        assert_eq!(Mark::all().count(), 60);
    }
}
