//! Rule-based scanner with a single-token lookahead buffer.

use super::{RuleSet, Token, TokenKind};

/// Turns a fully materialized character sequence into tokens.
///
/// The scanner keeps one token of lookahead: [`Scanner::peek`] is pure and
/// repeatable until [`Scanner::next`] consumes the buffered token. Every input
/// ends with exactly one [`TokenKind::Eof`] token, which is returned again by
/// every further call to `next`.
#[derive(Debug, Clone)]
pub struct Scanner {
    /// The input characters.
    input: Vec<char>,
    /// The rules used to classify tokens.
    ruleset: RuleSet,
    /// Character index of the cursor.
    pos: usize,
    /// 1-based line of the cursor.
    line: usize,
    /// 1-based column of the cursor.
    column: usize,
    /// The token returned by the next call to `next`.
    peeked: Option<Token>,
}

impl Scanner {
    /// Creates a scanner over `input`.
    #[must_use]
    pub fn new(input: &str, ruleset: RuleSet) -> Self {
        Self::from_chars(input.chars().collect(), ruleset)
    }

    /// Creates a scanner over an already decoded character sequence.
    #[must_use]
    pub fn from_chars(input: Vec<char>, ruleset: RuleSet) -> Self {
        Self {
            input,
            ruleset,
            pos: 0,
            line: 1,
            column: 1,
            peeked: None,
        }
    }

    /// The scanned input.
    #[must_use]
    pub fn input(&self) -> &[char] {
        &self.input
    }

    /// The rule set in use.
    #[must_use]
    pub const fn ruleset(&self) -> &RuleSet {
        &self.ruleset
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> &Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        };
        self.peeked.insert(token)
    }

    /// Consumes and returns the next token.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Token {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.scan(),
        };
        if token.is_eof() {
            self.peeked = Some(token.clone());
        }
        token
    }

    /// Consumes the whole input and returns every token, the final
    /// [`TokenKind::Eof`] included.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Moves the cursor over `count` characters.
    fn advance(&mut self, count: usize) {
        let end = (self.pos + count).min(self.input.len());
        for &c in &self.input[self.pos..end] {
            if self.ruleset.is_linefeed(c) {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos = end;
    }

    /// Scans one token at the cursor.
    fn scan(&mut self) -> Token {
        loop {
            let trivia = self.ruleset.trivia_len(&self.input[self.pos..]);
            if trivia == 0 {
                break;
            }
            self.advance(trivia);
        }

        let (line, column, offset) = (self.line, self.column, self.pos);
        let rest = &self.input[self.pos..];
        if rest.is_empty() {
            return Token::new(TokenKind::Eof, "", line, column, offset, 0);
        }

        let (kind, length) = self.ruleset.classify(rest).unwrap_or((TokenKind::Error, 1));
        let value: String = rest[..length].iter().collect();
        self.advance(length);
        Token::new(kind, value, line, column, offset, length)
    }
}
