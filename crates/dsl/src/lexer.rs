//! Lexer - source text into an EOF-terminated token list
//!
//! Ordered alternatives are tried at the cursor and the first match wins.
//! Keywords are recognized before generic field runs, with word-boundary
//! semantics: `AND` inside a longer identifier run stays part of the
//! identifier. Matching is case-insensitive; keyword text is canonicalized
//! to upper case, everything else is emitted verbatim.

use crate::error::{DslError, DslResult};
use crate::token::{Token, TokenKind};

/// Longest snippet of raw input carried in a lexical error
const NEAR_LEN: usize = 10;

/// Tokenize a full expression.
///
/// Returns the token list terminated by a synthetic [`TokenKind::Eof`]
/// token, or a [`DslError::Parse`] carrying the offset where no lexical
/// pattern matched.
pub fn tokenize(source: &str) -> DslResult<Vec<Token>> {
    Lexer::new(source).tokenize()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> DslResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while self.pos < self.chars.len() {
            if let Some(token) = self.next_token()? {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.pos));
        Ok(tokens)
    }

    /// Lex one token at the cursor, or skip a whitespace run.
    fn next_token(&mut self) -> DslResult<Option<Token>> {
        let c = self.chars[self.pos];

        if c.is_whitespace() {
            while self.pos < self.chars.len() && self.chars[self.pos].is_whitespace() {
                self.pos += 1;
            }
            return Ok(None);
        }

        if let Some(keyword) = self.keyword() {
            return Ok(Some(keyword));
        }

        if let Some(op) = self.comparison_op() {
            return Ok(Some(op));
        }

        match c {
            '(' => Ok(Some(self.single(TokenKind::LParen, '('))),
            ')' => Ok(Some(self.single(TokenKind::RParen, ')'))),
            '\'' => self.string().map(Some),
            '-' if self.peek_at(self.pos + 1).is_some_and(|n| n.is_ascii_digit()) => {
                Ok(Some(self.number()))
            }
            _ if c.is_ascii_digit() => Ok(Some(self.number())),
            _ if is_field_char(c) => Ok(Some(self.field())),
            _ => Err(self.fail()),
        }
    }

    /// `AND`/`OR`/`NOT`, case-insensitive, with word boundaries on both
    /// sides. Boundary characters are letters, digits and underscores;
    /// a dot ends a word, so `AND.x` lexes as a keyword followed by a
    /// field run.
    fn keyword(&mut self) -> Option<Token> {
        if self
            .peek_at(self.pos.wrapping_sub(1))
            .is_some_and(is_word_char)
        {
            return None;
        }

        for (kind, word) in [
            (TokenKind::And, "AND"),
            (TokenKind::Or, "OR"),
            (TokenKind::Not, "NOT"),
        ] {
            let len = word.len();
            if self.pos + len > self.chars.len() {
                continue;
            }
            let candidate: String = self.chars[self.pos..self.pos + len].iter().collect();
            if !candidate.eq_ignore_ascii_case(word) {
                continue;
            }
            if self.peek_at(self.pos + len).is_some_and(is_word_char) {
                continue;
            }
            let token = Token::new(kind, word, self.pos);
            self.pos += len;
            return Some(token);
        }
        None
    }

    /// Two-character operators before their one-character prefixes.
    fn comparison_op(&mut self) -> Option<Token> {
        let rest = &self.chars[self.pos..];
        let symbol = match rest {
            ['>', '=', ..] => ">=",
            ['<', '=', ..] => "<=",
            ['!', '=', ..] => "!=",
            ['>', ..] => ">",
            ['<', ..] => "<",
            ['=', ..] => "=",
            _ => return None,
        };
        let token = Token::new(TokenKind::CompareOp, symbol, self.pos);
        self.pos += symbol.len();
        Some(token)
    }

    fn single(&mut self, kind: TokenKind, c: char) -> Token {
        let token = Token::new(kind, c.to_string(), self.pos);
        self.pos += 1;
        token
    }

    /// `'...'` with no escape sequences; the quotes stay in the token text.
    fn string(&mut self) -> DslResult<Token> {
        let start = self.pos;
        let mut end = self.pos + 1;
        while end < self.chars.len() && self.chars[end] != '\'' {
            end += 1;
        }
        if end >= self.chars.len() {
            // Unterminated literal: no lexical pattern matches here.
            return Err(self.fail());
        }
        let text: String = self.chars[start..=end].iter().collect();
        self.pos = end + 1;
        Ok(Token::new(TokenKind::Str, text, start))
    }

    /// `-?\d+(\.\d+)?` - the dot is only consumed when a digit follows,
    /// so `5.` lexes as the number `5` and a separate field run `.`.
    fn number(&mut self) -> Token {
        let start = self.pos;
        if self.chars[self.pos] == '-' {
            self.pos += 1;
        }
        while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.peek_at(self.pos) == Some('.')
            && self.peek_at(self.pos + 1).is_some_and(|c| c.is_ascii_digit())
        {
            self.pos += 1;
            while self.pos < self.chars.len() && self.chars[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Token::new(TokenKind::Number, text, start)
    }

    /// Maximal run of letters, underscores and dots.
    fn field(&mut self) -> Token {
        let start = self.pos;
        while self.pos < self.chars.len() && is_field_char(self.chars[self.pos]) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Token::new(TokenKind::Field, text, start)
    }

    fn peek_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).copied()
    }

    fn fail(&self) -> DslError {
        let end = (self.pos + NEAR_LEN).min(self.chars.len());
        DslError::Parse {
            position: self.pos,
            near: self.chars[self.pos..end].iter().collect(),
        }
    }
}

fn is_field_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '.'
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
