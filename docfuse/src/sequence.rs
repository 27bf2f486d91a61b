//! Natural ("human") ordering of file names.
//!
//! Names are split into alternating runs of ASCII digits and everything
//! else. Digit runs compare by numeric value, other runs compare ordinally,
//! so `file2.txt` sorts before `file10.txt`.
//!
//! ```
//! use docfuse::sequence::natural_cmp;
//! use std::cmp::Ordering;
//!
//! assert_eq!(natural_cmp("file2.txt", "file10.txt"), Ordering::Less);
//! assert_eq!(natural_cmp("a", "a"), Ordering::Equal);
//! ```

use std::cmp::Ordering;

use crate::input::InputFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn tokenize(s: &str) -> impl Iterator<Item = Token<'_>> {
    let mut rest = s;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = rest
            .char_indices()
            .find(|(_, c)| c.is_ascii_digit() != digits)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(if digits {
            Token::Digits(run)
        } else {
            Token::Text(run)
        })
    })
}

/// Compare two digit runs by value without overflowing.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn cmp_token(a: Token<'_>, b: Token<'_>) -> Ordering {
    match (a, b) {
        (Token::Digits(x), Token::Digits(y)) => cmp_digits(x, y),
        (Token::Text(x), Token::Text(y)) => x.cmp(y),
        (Token::Digits(_), Token::Text(_)) => Ordering::Less,
        (Token::Text(_), Token::Digits(_)) => Ordering::Greater,
    }
}

/// Natural-order comparison of two strings.
///
/// Runs are compared pairwise; the name that runs out of runs first sorts
/// first. Names that only differ in leading zeros (`a01` vs `a1`) are
/// ordered by their raw text so the result stays a total order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = tokenize(a);
    let mut right = tokenize(b);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_token(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Stable natural sort of input files by their full (relative path) name.
pub fn sort_natural(files: &mut [InputFile]) {
    files.sort_by(|a, b| natural_cmp(a.name(), b.name()));
}
