//! Lexical rules and rule sets.
//!
//! A [`RuleSet`] is an ordered list of [`Rule`]s. At every cursor position
//! the scanner first skips trivia, then tries each rule in order; the first
//! rule that matches decides the kind and the extent of the produced token.

use std::fmt;
use std::sync::Arc;

use super::{Keyword, TokenKind};

/// A single lexical rule.
///
/// Given the remaining input at the scanner's cursor, a rule either declines
/// (`None`) or returns the kind of the token and the number of characters it
/// covers. A match covering zero characters counts as declined.
pub trait Rule: Send + Sync {
    /// Tries to match a token at the start of `input`.
    fn apply(&self, input: &[char]) -> Option<(TokenKind, usize)>;
}

impl<F> Rule for F
where
    F: Fn(&[char]) -> Option<(TokenKind, usize)> + Send + Sync,
{
    fn apply(&self, input: &[char]) -> Option<(TokenKind, usize)> {
        self(input)
    }
}

/// An ordered collection of rules plus the trivia and line-feed detectors
/// used by the scanner for position bookkeeping.
#[derive(Clone)]
pub struct RuleSet {
    name: &'static str,
    trivia: fn(&[char]) -> usize,
    linefeed: fn(char) -> bool,
    rules: Vec<Arc<dyn Rule>>,
}

impl RuleSet {
    /// Creates an empty rule set that skips whitespace and treats `\n` as a
    /// line feed.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            trivia: whitespace,
            linefeed: is_linefeed,
            rules: Vec::new(),
        }
    }

    /// Appends a rule with the lowest priority so far.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Replaces the trivia detector, which returns how many characters at the
    /// start of its input are insignificant.
    #[must_use]
    pub fn with_trivia(mut self, trivia: fn(&[char]) -> usize) -> Self {
        self.trivia = trivia;
        self
    }

    /// Replaces the line-feed detector.
    #[must_use]
    pub fn with_linefeed(mut self, linefeed: fn(char) -> bool) -> Self {
        self.linefeed = linefeed;
        self
    }

    /// The name of this rule set.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of rules in this set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if this set has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of trivia characters at the start of `input`.
    #[must_use]
    pub fn trivia_len(&self, input: &[char]) -> usize {
        (self.trivia)(input)
    }

    /// Returns true if `c` ends a line.
    #[must_use]
    pub fn is_linefeed(&self, c: char) -> bool {
        (self.linefeed)(c)
    }

    /// Applies the rules in priority order and returns the first match.
    #[must_use]
    pub fn classify(&self, input: &[char]) -> Option<(TokenKind, usize)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.apply(input))
            .find(|&(_, len)| len > 0 && len <= input.len())
    }

    /// The SQLite-flavoured rule set used by the parser.
    #[must_use]
    pub fn default_rules() -> Self {
        Self::new("default")
            .with_trivia(sql_trivia)
            .with_rule(statement_separator)
            .with_rule(keyword)
            .with_rule(numeric_literal)
            .with_rule(quoted_literal)
            .with_rule(unary_operator)
            .with_rule(binary_operator)
            .with_rule(delimiter)
            .with_rule(unquoted_literal)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::default_rules()
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleSet")
            .field("name", &self.name)
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

fn is_linefeed(c: char) -> bool {
    c == '\n'
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn identifier_len(input: &[char]) -> usize {
    match input.first() {
        Some(&c) if is_identifier_start(c) => input
            .iter()
            .take_while(|&&c| is_identifier_char(c))
            .count(),
        _ => 0,
    }
}

fn digits_len(input: &[char], radix: u32) -> usize {
    input.iter().take_while(|c| c.is_digit(radix)).count()
}

/// Skips plain whitespace.
#[must_use]
pub fn whitespace(input: &[char]) -> usize {
    input.iter().take_while(|c| c.is_whitespace()).count()
}

/// Skips whitespace, `-- line` comments and `/* block */` comments.
#[must_use]
pub fn sql_trivia(input: &[char]) -> usize {
    let mut pos = 0;
    loop {
        pos += whitespace(&input[pos..]);
        let rest = &input[pos..];
        if rest.starts_with(&['-', '-']) {
            pos += rest.iter().take_while(|&&c| c != '\n').count();
        } else if rest.starts_with(&['/', '*']) {
            pos += rest[2..]
                .windows(2)
                .position(|w| w == ['*', '/'])
                .map_or(rest.len(), |end| end + 4);
        } else {
            return pos;
        }
    }
}

/// `;`
#[must_use]
pub fn statement_separator(input: &[char]) -> Option<(TokenKind, usize)> {
    (input.first() == Some(&';')).then_some((TokenKind::StatementSeparator, 1))
}

/// A maximal identifier run that spells a keyword.
#[must_use]
pub fn keyword(input: &[char]) -> Option<(TokenKind, usize)> {
    let len = identifier_len(input);
    if len == 0 {
        return None;
    }
    let word: String = input[..len].iter().collect();
    Keyword::from_str(&word).map(|kw| (TokenKind::Keyword(kw), len))
}

/// Decimal, fractional, exponent and `0x` hexadecimal numbers.
#[must_use]
pub fn numeric_literal(input: &[char]) -> Option<(TokenKind, usize)> {
    match input {
        ['0', 'x' | 'X', rest @ ..] if digits_len(rest, 16) > 0 => {
            return Some((TokenKind::Literal, 2 + digits_len(rest, 16)));
        }
        [c, ..] if c.is_ascii_digit() => {}
        ['.', c, ..] if c.is_ascii_digit() => {}
        _ => return None,
    }

    let mut pos = digits_len(input, 10);
    if input.get(pos) == Some(&'.') {
        pos += 1;
        pos += digits_len(&input[pos..], 10);
    }
    if matches!(input.get(pos), Some('e' | 'E')) {
        let sign = usize::from(matches!(input.get(pos + 1), Some('+' | '-')));
        let exponent = digits_len(&input[(pos + 1 + sign).min(input.len())..], 10);
        if exponent > 0 {
            pos += 1 + sign + exponent;
        }
    }
    Some((TokenKind::Literal, pos))
}

/// Strings, quoted identifiers and blobs. An unterminated quote produces an
/// error token that runs to the end of the input.
#[must_use]
pub fn quoted_literal(input: &[char]) -> Option<(TokenKind, usize)> {
    let (prefix, open) = match input {
        ['x' | 'X', '\'', ..] => (1, '\''),
        ['\'' | '"' | '`' | '[', ..] => (0, input[0]),
        _ => return None,
    };
    let close = if open == '[' { ']' } else { open };

    let mut pos = prefix + 1;
    while pos < input.len() {
        if input[pos] == close {
            if open != '[' && input.get(pos + 1) == Some(&close) {
                pos += 2;
                continue;
            }
            return Some((TokenKind::Literal, pos + 1));
        }
        pos += 1;
    }
    Some((TokenKind::Error, input.len()))
}

/// `-`, `+` and `~`.
#[must_use]
pub fn unary_operator(input: &[char]) -> Option<(TokenKind, usize)> {
    matches!(input.first(), Some('-' | '+' | '~')).then_some((TokenKind::UnaryOperator, 1))
}

/// Arithmetic, bitwise, concatenation and comparison operators.
#[must_use]
pub fn binary_operator(input: &[char]) -> Option<(TokenKind, usize)> {
    match input {
        ['|', '|', ..]
        | ['<', '<' | '=' | '>', ..]
        | ['>', '>' | '=', ..]
        | ['=', '=', ..]
        | ['!', '=', ..] => Some((TokenKind::BinaryOperator, 2)),
        ['*' | '/' | '%' | '&' | '|' | '<' | '>' | '=', ..] => {
            Some((TokenKind::BinaryOperator, 1))
        }
        _ => None,
    }
}

/// `(`, `)`, `,` and `.`.
#[must_use]
pub fn delimiter(input: &[char]) -> Option<(TokenKind, usize)> {
    matches!(input.first(), Some('(' | ')' | ',' | '.')).then_some((TokenKind::Delimiter, 1))
}

/// Identifiers that are not keywords, and bind parameters.
#[must_use]
pub fn unquoted_literal(input: &[char]) -> Option<(TokenKind, usize)> {
    let len = match input {
        ['?', rest @ ..] => 1 + digits_len(rest, 10),
        [':' | '@' | '$', rest @ ..] => match identifier_len(rest) {
            0 => 0,
            len => 1 + len,
        },
        _ => identifier_len(input),
    };
    (len > 0).then_some((TokenKind::Literal, len))
}
