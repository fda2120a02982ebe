//! Character classification and conversion.
//!
//! Implements the `<ctype.h>` semantics for classifying and transforming
//! individual bytes/characters. C locale only.
//!
//! Two layers live here:
//! - byte-level helpers (`is_alpha`, `to_upper`, ...) over `u8`;
//! - the int-domain oracle ([`CharClass`], [`CaseMap`]) over `i32`, which is
//!   what a C caller actually passes. Codes outside `0..=255` never belong to
//!   a class and are mapped to themselves by both transforms.

/// Returns `true` if `c` is an alphabetic character (`[A-Za-z]`).
#[inline]
pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

/// Returns `true` if `c` is a decimal digit (`[0-9]`).
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// Returns `true` if `c` is an alphanumeric character (`[A-Za-z0-9]`).
#[inline]
pub fn is_alnum(c: u8) -> bool {
    c.is_ascii_alphanumeric()
}

/// Returns `true` if `c` is a blank character (space or horizontal tab).
#[inline]
pub fn is_blank(c: u8) -> bool {
    matches!(c, b' ' | b'\t')
}

/// Returns `true` if `c` is a control character (`0x00..=0x1F` or DEL).
#[inline]
pub fn is_cntrl(c: u8) -> bool {
    c < 0x20 || c == 0x7F
}

/// Returns `true` if `c` has a visible glyph (printable, excluding space).
#[inline]
pub fn is_graph(c: u8) -> bool {
    (0x21..=0x7E).contains(&c)
}

/// Returns `true` if `c` is a whitespace character.
///
/// Whitespace: space, tab, newline, vertical tab, form feed, carriage return.
#[inline]
pub fn is_space(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Returns `true` if `c` is an uppercase letter (`[A-Z]`).
#[inline]
pub fn is_upper(c: u8) -> bool {
    c.is_ascii_uppercase()
}

/// Returns `true` if `c` is a lowercase letter (`[a-z]`).
#[inline]
pub fn is_lower(c: u8) -> bool {
    c.is_ascii_lowercase()
}

/// Returns `true` if `c` is a printable character (including space).
#[inline]
pub fn is_print(c: u8) -> bool {
    (0x20..=0x7E).contains(&c)
}

/// Returns `true` if `c` is a punctuation character.
#[inline]
pub fn is_punct(c: u8) -> bool {
    is_graph(c) && !is_alnum(c)
}

/// Returns `true` if `c` is a hexadecimal digit (`[0-9A-Fa-f]`).
#[inline]
pub fn is_xdigit(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

/// Converts `c` to uppercase if it is a lowercase letter.
#[inline]
pub fn to_upper(c: u8) -> u8 {
    if is_lower(c) { c - 32 } else { c }
}

/// Converts `c` to lowercase if it is an uppercase letter.
#[inline]
pub fn to_lower(c: u8) -> u8 {
    if is_upper(c) { c + 32 } else { c }
}

/// Narrow an `int` argument to the byte domain, if it lies in `0..=255`.
#[inline]
pub fn to_byte(code: i32) -> Option<u8> {
    u8::try_from(code).ok()
}

/// The twelve `<ctype.h>` classification predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharClass {
    Alnum,
    Alpha,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Xdigit,
}

impl CharClass {
    /// Every predicate, in symbol order.
    pub const ALL: [CharClass; 12] = [
        Self::Alnum,
        Self::Alpha,
        Self::Blank,
        Self::Cntrl,
        Self::Digit,
        Self::Graph,
        Self::Lower,
        Self::Print,
        Self::Punct,
        Self::Space,
        Self::Upper,
        Self::Xdigit,
    ];

    /// C symbol name of the predicate (`isalnum`, ...).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Alnum => "isalnum",
            Self::Alpha => "isalpha",
            Self::Blank => "isblank",
            Self::Cntrl => "iscntrl",
            Self::Digit => "isdigit",
            Self::Graph => "isgraph",
            Self::Lower => "islower",
            Self::Print => "isprint",
            Self::Punct => "ispunct",
            Self::Space => "isspace",
            Self::Upper => "isupper",
            Self::Xdigit => "isxdigit",
        }
    }

    /// Look up a predicate by its C symbol name.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.symbol() == symbol)
    }

    /// Byte-level predicate backing this class.
    #[must_use]
    pub fn byte_predicate(self) -> fn(u8) -> bool {
        match self {
            Self::Alnum => is_alnum,
            Self::Alpha => is_alpha,
            Self::Blank => is_blank,
            Self::Cntrl => is_cntrl,
            Self::Digit => is_digit,
            Self::Graph => is_graph,
            Self::Lower => is_lower,
            Self::Print => is_print,
            Self::Punct => is_punct,
            Self::Space => is_space,
            Self::Upper => is_upper,
            Self::Xdigit => is_xdigit,
        }
    }

    /// Whether `code` belongs to this class. Out-of-domain codes never do.
    #[must_use]
    pub fn matches(self, code: i32) -> bool {
        to_byte(code).is_some_and(self.byte_predicate())
    }

    /// Every code in `0..=255` belonging to this class, ascending.
    pub fn members(self) -> impl Iterator<Item = i32> {
        (0..=255).filter(move |&code| self.matches(code))
    }
}

/// The two `<ctype.h>` case transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaseMap {
    Upper,
    Lower,
}

impl CaseMap {
    pub const ALL: [CaseMap; 2] = [Self::Upper, Self::Lower];

    /// C symbol name of the transform.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Upper => "toupper",
            Self::Lower => "tolower",
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|map| map.symbol() == symbol)
    }

    /// Apply the transform to an `int` code.
    ///
    /// Shifts by 32 inside the source letter range, identity everywhere else,
    /// negative and above-255 codes included.
    #[must_use]
    pub fn apply(self, code: i32) -> i32 {
        match to_byte(code) {
            Some(byte) => i32::from(match self {
                Self::Upper => to_upper(byte),
                Self::Lower => to_lower(byte),
            }),
            None => code,
        }
    }

    /// The transform undoing this one on its letter range.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_alpha() {
        assert!(is_alpha(b'A'));
        assert!(is_alpha(b'Z'));
        assert!(is_alpha(b'a'));
        assert!(is_alpha(b'z'));
        assert!(!is_alpha(b'0'));
        assert!(!is_alpha(b' '));
        assert!(!is_alpha(0));
    }

    #[test]
    fn test_is_digit() {
        for c in b'0'..=b'9' {
            assert!(is_digit(c));
        }
        assert!(!is_digit(b'a'));
        assert!(!is_digit(b'/'));
        assert!(!is_digit(b':'));
    }

    #[test]
    fn test_is_blank_and_cntrl() {
        assert!(is_blank(b' '));
        assert!(is_blank(b'\t'));
        assert!(!is_blank(b'\n'));
        for c in 0u8..0x20 {
            assert!(is_cntrl(c));
        }
        assert!(is_cntrl(0x7F));
        assert!(!is_cntrl(b' '));
        assert!(!is_cntrl(0x80));
    }

    #[test]
    fn test_is_space() {
        assert!(is_space(b' '));
        assert!(is_space(b'\t'));
        assert!(is_space(b'\n'));
        assert!(is_space(0x0B));
        assert!(is_space(0x0C));
        assert!(is_space(b'\r'));
        assert!(!is_space(b'a'));
        assert!(!is_space(0));
    }

    #[test]
    fn test_is_print_and_graph() {
        assert!(is_print(b' '));
        assert!(!is_graph(b' '));
        assert!(is_graph(b'!'));
        assert!(is_graph(b'~'));
        assert!(!is_print(0x1F));
        assert!(!is_print(0x7F));
        assert!(!is_graph(0x80));
    }

    #[test]
    fn test_is_punct() {
        let expected = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
        let actual: Vec<u8> = (0u8..=255).filter(|&c| is_punct(c)).collect();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn test_is_xdigit() {
        for c in b"0123456789abcdefABCDEF" {
            assert!(is_xdigit(*c));
        }
        assert!(!is_xdigit(b'G'));
        assert!(!is_xdigit(b'g'));
    }

    #[test]
    fn class_symbols_round_trip() {
        for class in CharClass::ALL {
            assert_eq!(CharClass::from_symbol(class.symbol()), Some(class));
        }
        assert_eq!(CharClass::from_symbol("isascii"), None);
        assert_eq!(CaseMap::from_symbol("toupper"), Some(CaseMap::Upper));
        assert_eq!(CaseMap::from_symbol("tolower"), Some(CaseMap::Lower));
    }

    #[test]
    fn out_of_domain_codes_never_match() {
        for class in CharClass::ALL {
            for code in [-129, -10, -1, 256, 300, i32::MAX, i32::MIN] {
                assert!(!class.matches(code), "{} matched {code}", class.symbol());
            }
        }
        // 53 is '5'; 300 would be '5' + 247 after a careless byte cast.
        assert!(CharClass::Digit.matches(53));
        assert!(!CharClass::Digit.matches(300));
        assert!(!CharClass::Digit.matches(53 + 256));
    }

    #[test]
    fn member_counts() {
        let count = |class: CharClass| class.members().count();
        assert_eq!(count(CharClass::Alnum), 62);
        assert_eq!(count(CharClass::Alpha), 52);
        assert_eq!(count(CharClass::Blank), 2);
        assert_eq!(count(CharClass::Cntrl), 33);
        assert_eq!(count(CharClass::Digit), 10);
        assert_eq!(count(CharClass::Graph), 94);
        assert_eq!(count(CharClass::Lower), 26);
        assert_eq!(count(CharClass::Print), 95);
        assert_eq!(count(CharClass::Punct), 32);
        assert_eq!(count(CharClass::Space), 6);
        assert_eq!(count(CharClass::Upper), 26);
        assert_eq!(count(CharClass::Xdigit), 22);
    }

    #[test]
    fn case_map_closed_form() {
        for code in -10..300 {
            let upper = if (97..=122).contains(&code) { code - 32 } else { code };
            let lower = if (65..=90).contains(&code) { code + 32 } else { code };
            assert_eq!(CaseMap::Upper.apply(code), upper, "toupper({code})");
            assert_eq!(CaseMap::Lower.apply(code), lower, "tolower({code})");
        }
        assert_eq!(CaseMap::Upper.apply(97), 65);
        assert_eq!(CaseMap::Upper.apply(65), 65);
        assert_eq!(CaseMap::Upper.apply(i32::MIN), i32::MIN);
    }

    #[test]
    fn exhaustive_invariants() {
        for code in -10..300 {
            assert_eq!(
                CharClass::Alnum.matches(code),
                CharClass::Alpha.matches(code) || CharClass::Digit.matches(code),
                "alnum invariant failed for {code}"
            );
            assert_eq!(
                CharClass::Alpha.matches(code),
                CharClass::Upper.matches(code) || CharClass::Lower.matches(code),
                "alpha invariant failed for {code}"
            );
            assert_eq!(
                CharClass::Graph.matches(code),
                CharClass::Print.matches(code) && code != 0x20,
                "graph invariant failed for {code}"
            );
            if CharClass::Print.matches(code) {
                assert!(!CharClass::Cntrl.matches(code), "print/cntrl overlap at {code}");
            }
            if CharClass::Blank.matches(code) {
                assert!(CharClass::Space.matches(code), "blank must be space for {code}");
            }
            if CharClass::Xdigit.matches(code) {
                assert!(CharClass::Alnum.matches(code), "xdigit must be alnum for {code}");
            }
            for map in CaseMap::ALL {
                let once = map.apply(code);
                assert_eq!(map.apply(once), once, "{} not idempotent at {code}", map.symbol());
            }
            if CharClass::Alpha.matches(code) {
                for map in CaseMap::ALL {
                    let undo = map.inverse();
                    assert_eq!(
                        undo.apply(map.apply(code)),
                        undo.apply(code),
                        "round-trip failed for {code}"
                    );
                }
            }
        }
    }

    #[test]
    fn inverse_undoes_the_shift() {
        assert_eq!(CaseMap::Upper.inverse(), CaseMap::Lower);
        assert_eq!(CaseMap::Lower.inverse(), CaseMap::Upper);
        for (map, source) in [
            (CaseMap::Upper, CharClass::Lower),
            (CaseMap::Lower, CharClass::Upper),
        ] {
            for code in source.members() {
                assert_ne!(map.apply(code), code);
                assert_eq!(map.inverse().apply(map.apply(code)), code);
            }
        }
        assert_eq!(CaseMap::Upper.inverse().apply(300), 300);
    }
}
