//! Locale-aware string ordering used by table sorting
//!
//! Ordering is decided in three passes:
//! 1. primary: characters compared case-insensitively, runs of digits compared
//!    by numeric value (`"9" < "10"`, `"1,200" > "980"`, `"12.5" > "12.25"`),
//!    whitespace/punctuation before digits before letters; fullwidth digits
//!    read as ASCII ones
//! 2. tertiary: over the cased letters in order, lowercase sorts first
//! 3. code-point order, so unequal strings never compare equal
//!
//! Each pass compares a key derived from one string alone, so the whole is a
//! total order and safe to hand to `sort_by`.

use std::cmp::Ordering;
use std::iter::{Map, Peekable};
use std::str::Chars;

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Number { int: String, frac: String },
    Char(char),
}

/// Compare two display strings the way a table header click should
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_cmp(a, b)
        .then_with(|| case_cmp(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Tokens::new(a);
    let mut right = Tokens::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = token_cmp(&l, &r);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn token_cmp(a: &Token, b: &Token) -> Ordering {
    match (a, b) {
        (Token::Number { int: ai, frac: af }, Token::Number { int: bi, frac: bf }) => ai
            .len()
            .cmp(&bi.len())
            .then_with(|| ai.cmp(bi))
            .then_with(|| af.cmp(bf)),
        // other numeric characters (①, ², ...) sit right after numbers
        (Token::Number { .. }, Token::Char(c)) => DIGIT_RANK.cmp(&class_rank(*c)).then(Ordering::Less),
        (Token::Char(c), Token::Number { .. }) => class_rank(*c).cmp(&DIGIT_RANK).then(Ordering::Greater),
        (Token::Char(l), Token::Char(r)) => class_rank(*l)
            .cmp(&class_rank(*r))
            .then_with(|| l.to_lowercase().cmp(r.to_lowercase())),
    }
}

fn class_rank(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_ascii()) {
        1
    } else if c.is_numeric() {
        DIGIT_RANK
    } else {
        3
    }
}

const DIGIT_RANK: u8 = 2;

/// `０`-`９` as their ASCII digits
fn normalize(c: char) -> char {
    match c {
        '\u{FF10}'..='\u{FF19}' => char::from(b'0' + (c as u32 - 0xFF10) as u8),
        _ => c,
    }
}

/// Case pattern of the cased letters, lowercase first
fn case_cmp(a: &str, b: &str) -> Ordering {
    let upper = |s: &str| -> Vec<bool> {
        s.chars()
            .filter(|c| c.is_lowercase() || c.is_uppercase())
            .map(char::is_uppercase)
            .collect()
    };
    upper(a).cmp(&upper(b))
}

struct Tokens<'a> {
    chars: Peekable<Map<Chars<'a>, fn(char) -> char>>,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().map(normalize as fn(char) -> char).peekable(),
        }
    }

    fn read_number(&mut self, first: char) -> Token {
        let mut int = String::new();
        int.push(first);
        let mut frac = String::new();

        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() {
                int.push(c);
                self.chars.next();
            } else if c == ',' && self.digit_follows() {
                // grouping separator, e.g. 1,200
                self.chars.next();
            } else if c == '.' && frac.is_empty() && self.digit_follows() {
                self.chars.next();
                while let Some(&d) = self.chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    frac.push(d);
                    self.chars.next();
                }
                break;
            } else {
                break;
            }
        }

        let int = int.trim_start_matches('0').to_string();
        let frac = frac.trim_end_matches('0').to_string();
        Token::Number { int, frac }
    }

    fn digit_follows(&self) -> bool {
        let mut ahead = self.chars.clone();
        ahead.next();
        matches!(ahead.peek(), Some(c) if c.is_ascii_digit())
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let c = self.chars.next()?;
        if c.is_ascii_digit() {
            Some(self.read_number(c))
        } else {
            Some(Token::Char(c))
        }
    }
}
