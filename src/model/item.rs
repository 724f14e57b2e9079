// File: ./src/model/item.rs
// A single todo.txt line: completion marker, priority tag and body text.
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub const COMPLETION_MARKER: &str = "x ";

/// Priority tag letter, `A` (most important) through `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Priority(char);

impl Priority {
    pub fn new(letter: char) -> Option<Self> {
        letter.is_ascii_uppercase().then_some(Self(letter))
    }

    pub fn letter(&self) -> char {
        self.0
    }
}

impl TryFrom<char> for Priority {
    type Error = String;

    fn try_from(letter: char) -> Result<Self, Self::Error> {
        Self::new(letter).ok_or_else(|| format!("'{}' is not a priority letter (A-Z)", letter))
    }
}

impl From<Priority> for char {
    fn from(p: Priority) -> char {
        p.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub priority: Option<Priority>,
    pub is_completed: bool,
    pub text: String,
}

impl Item {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            priority: None,
            is_completed: false,
            text: text.into(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// Parses one line. Returns `None` for blank or whitespace-only lines;
    /// any other input yields an item, unrecognised tags simply stay in the text.
    pub fn parse(line: &str) -> Option<Self> {
        let mut rest = line.trim();
        if rest.is_empty() {
            return None;
        }

        let is_completed = match rest.strip_prefix(COMPLETION_MARKER) {
            Some(stripped) => {
                rest = stripped.trim_start();
                true
            }
            None => false,
        };

        let priority = match split_priority_tag(rest) {
            Some((p, stripped)) => {
                rest = stripped;
                Some(p)
            }
            None => None,
        };

        Some(Self {
            priority,
            is_completed,
            text: rest.trim().to_string(),
        })
    }

    /// Canonical line form, identical to the `Display` output.
    pub fn to_line(&self) -> String {
        self.to_string()
    }

    /// Marks the item done. Completing twice changes nothing.
    pub fn complete(&mut self) {
        self.is_completed = true;
    }

    /// Exact comparison against the rendered line (marker and tag included).
    pub fn matches_line(&self, full_line: &str) -> bool {
        self.to_line() == full_line
    }
}

/// Matches `(X) ` at the very start of `s`, X being an uppercase letter.
fn split_priority_tag(s: &str) -> Option<(Priority, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < 4 || bytes[0] != b'(' || bytes[2] != b')' || bytes[3] != b' ' {
        return None;
    }
    let priority = Priority::new(bytes[1] as char)?;
    // The four matched bytes are ASCII, so index 4 is a char boundary.
    Some((priority, &s[4..]))
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_completed {
            f.write_str(COMPLETION_MARKER)?;
        }
        if let Some(p) = self.priority {
            write!(f, "{} ", p)?;
        }
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseItemError {
    Blank,
}

impl fmt::Display for ParseItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseItemError::Blank => write!(f, "blank line is not a todo item"),
        }
    }
}

impl std::error::Error for ParseItemError {}

impl FromStr for Item {
    type Err = ParseItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(ParseItemError::Blank)
    }
}

// --- SORTING ---
// Open items first, then prioritised before unprioritised (A..Z), then text.
impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.is_completed
            .cmp(&other.is_completed)
            .then_with(|| match (self.priority, other.priority) {
                (Some(p1), Some(p2)) => p1.cmp(&p2),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| self.text.cmp(&other.text))
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prio(c: char) -> Priority {
        Priority::new(c).unwrap()
    }

    #[test]
    fn test_parse_plain_text() {
        let item = Item::parse("buy milk").unwrap();
        assert_eq!(item, Item::new("buy milk"));
    }

    #[test]
    fn test_parse_blank_is_absent() {
        assert!(Item::parse("").is_none());
        assert!(Item::parse("   \t ").is_none());
        assert_eq!("  ".parse::<Item>(), Err(ParseItemError::Blank));
    }

    #[test]
    fn test_parse_marker_and_priority() {
        let item = Item::parse("x (A) call mom").unwrap();
        assert!(item.is_completed);
        assert_eq!(item.priority, Some(prio('A')));
        assert_eq!(item.text, "call mom");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let item = Item::parse("   (B)   write report   ").unwrap();
        assert_eq!(item.priority, Some(prio('B')));
        assert_eq!(item.text, "write report");
        assert!(!item.is_completed);
    }

    #[test]
    fn test_malformed_priority_stays_in_text() {
        for line in ["(a) lower", "(AB) two", "(A)nospace", "[A] brackets", "((A) nested"] {
            let item = Item::parse(line).unwrap();
            assert_eq!(item.priority, None, "{}", line);
            assert_eq!(item.text, line);
        }
    }

    #[test]
    fn test_priority_tag_only_at_start() {
        let item = Item::parse("call (A) mom").unwrap();
        assert_eq!(item.priority, None);
        assert_eq!(item.text, "call (A) mom");
    }

    #[test]
    fn test_marker_requires_lowercase_x_and_space() {
        assert!(!Item::parse("X done").unwrap().is_completed);
        assert!(!Item::parse("xylophone lessons").unwrap().is_completed);

        let bare = Item::parse("x").unwrap();
        assert!(!bare.is_completed);
        assert_eq!(bare.text, "x");
    }

    #[test]
    fn test_priority_before_marker_is_not_completion() {
        let item = Item::parse("(A) x buy milk").unwrap();
        assert!(!item.is_completed);
        assert_eq!(item.priority, Some(prio('A')));
        assert_eq!(item.text, "x buy milk");
    }

    #[test]
    fn test_serialize_orders_marker_before_tag() {
        let item = Item::new("call mom").with_priority(prio('A')).completed();
        assert_eq!(item.to_line(), "x (A) call mom");
        assert_eq!(Item::new("plain").to_line(), "plain");
    }

    #[test]
    fn test_parse_serialize_reparse() {
        for line in [
            "buy milk",
            "x buy milk",
            "(C) buy milk",
            "x (Z) buy milk",
            "x x (A) odd",
            "(A) (B) double tag",
        ] {
            let item = Item::parse(line).unwrap();
            assert_eq!(item.to_line(), line);
            assert_eq!(Item::parse(&item.to_line()).unwrap(), item);
        }
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut item = Item::parse("(A) task").unwrap();
        item.complete();
        let once = item.clone();
        item.complete();
        assert_eq!(item, once);
    }

    #[test]
    fn test_priority_rejects_non_letters() {
        assert!(Priority::new('a').is_none());
        assert!(Priority::new('1').is_none());
        assert!(Priority::new('É').is_none());
        assert_eq!(prio('Q').letter(), 'Q');
    }

    #[test]
    fn test_ordering_open_before_done() {
        let open = Item::new("zzz");
        let done = Item::new("aaa").with_priority(prio('A')).completed();
        assert_eq!(open.cmp(&done), Ordering::Less);
    }

    #[test]
    fn test_ordering_priority_before_none() {
        let a = Item::new("b").with_priority(prio('A'));
        let b = Item::new("a").with_priority(prio('B'));
        let none = Item::new("a");
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&none), Ordering::Less);
        assert_eq!(a.cmp(&none), Ordering::Less);
    }

    #[test]
    fn test_ordering_text_tiebreak() {
        let a = Item::new("apple");
        let b = Item::new("banana");
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
    }

    #[test]
    fn test_serde_priority_as_letter() {
        let item = Item::new("call mom").with_priority(prio('A'));
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(
            json,
            r#"{"priority":"A","is_completed":false,"text":"call mom"}"#
        );
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);

        let bad = r#"{"priority":"a","is_completed":false,"text":"x"}"#;
        assert!(serde_json::from_str::<Item>(bad).is_err());
    }
}
