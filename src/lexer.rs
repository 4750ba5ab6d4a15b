//! Lexical analysis: converts Axion source text into an ordered token stream.
//!
//! Pure function of the input text — no state beyond the input cursor.

use crate::error::AxionError;
use crate::token::{is_keyword, Token, TokenKind};

/// Multi-character operators, longest match first so e.g. `==` never lexes as two `=`.
const MULTI_CHAR_OPERATORS: &[&str] = &[
    "==", "!=", "<=", ">=", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "->",
];

const WORD_OPERATORS: &[&str] = &["both", "any", "invert"];

const SINGLE_CHAR_OPERATORS: &str = "+-*/%=<>!&|^~";
const PUNCTUATION: &str = ".,;(){}[]";

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Lexer {
            source: source.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn rest_starts_with(&self, s: &str) -> bool {
        self.source[self.pos..].starts_with(s.as_bytes())
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.advance(1);
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b) if b.is_ascii_digit()) {
            self.advance(1);
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.advance(1);
            }
        }
        let lexeme = std::str::from_utf8(&self.source[start..self.pos])
            .unwrap()
            .to_string();
        Token::new(lexeme, TokenKind::Number)
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_') {
            self.advance(1);
        }
        let lexeme = std::str::from_utf8(&self.source[start..self.pos])
            .unwrap()
            .to_string();
        let kind = if is_keyword(&lexeme) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(lexeme, kind)
    }

    fn lex_string(&mut self, quote: u8) -> Result<Token, AxionError> {
        let start = self.pos;
        self.advance(1);
        while self.peek() != Some(quote) {
            if self.peek().is_none() {
                return Err(AxionError::Syntax(format!(
                    "unterminated string starting at byte {}",
                    start
                )));
            }
            self.advance(1);
        }
        self.advance(1);
        let lexeme = std::str::from_utf8(&self.source[start..self.pos])
            .unwrap()
            .to_string();
        Ok(Token::new(lexeme, TokenKind::String))
    }
}

/// Tokenizes `source` into an ordered sequence of tokens.
///
/// Whitespace is a separator only. Unrecognized characters are reported as
/// `AxionError::Lex` rather than silently dropped, for clearer diagnostics.
pub fn tokenize(source: &str) -> Result<Vec<Token>, AxionError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(b) = lexer.peek() {
        if b.is_ascii_whitespace() {
            lexer.advance(1);
            continue;
        }

        if b.is_ascii_digit() {
            tokens.push(lexer.lex_number());
            continue;
        }

        if b.is_ascii_alphabetic() || b == b'_' {
            let tok = lexer.lex_identifier();
            // `both`/`any`/`invert` lex like identifiers but are word-operators.
            if WORD_OPERATORS.contains(&tok.lexeme.as_str()) {
                tokens.push(Token::new(tok.lexeme, TokenKind::Operator));
            } else {
                tokens.push(tok);
            }
            continue;
        }

        if b == b'"' || b == b'\'' {
            tokens.push(lexer.lex_string(b)?);
            continue;
        }

        if let Some(op) = MULTI_CHAR_OPERATORS
            .iter()
            .find(|op| lexer.rest_starts_with(op))
        {
            tokens.push(Token::new(*op, TokenKind::Operator));
            lexer.advance(op.len());
            continue;
        }

        if SINGLE_CHAR_OPERATORS.as_bytes().contains(&b) {
            tokens.push(Token::new((b as char).to_string(), TokenKind::Operator));
            lexer.advance(1);
            continue;
        }

        if PUNCTUATION.as_bytes().contains(&b) {
            tokens.push(Token::new((b as char).to_string(), TokenKind::Punctuation));
            lexer.advance(1);
            continue;
        }

        return Err(AxionError::Lex(format!(
            "unrecognized character '{}' at byte {}",
            b as char, lexer.pos
        )));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.lexeme.as_str()).collect()
    }

    #[test]
    fn lexes_numbers() {
        let tokens = tokenize("42 3.14 0").unwrap();
        assert_eq!(lexemes(&tokens), vec!["42", "3.14", "0"]);
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn lexes_identifiers_and_keywords() {
        let tokens = tokenize("set x if y").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].kind, TokenKind::Keyword);
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
    }

    #[test]
    fn lexes_strings_preserving_quotes() {
        let tokens = tokenize(r#""hi {name}" 'lone'"#).unwrap();
        assert_eq!(tokens[0].lexeme, r#""hi {name}""#);
        assert_eq!(tokens[1].lexeme, "'lone'");
        assert!(tokens.iter().all(|t| t.kind == TokenKind::String));
    }

    #[test]
    fn unterminated_string_is_syntax_error() {
        assert!(tokenize("\"unterminated").is_err());
    }

    #[test]
    fn lexes_multi_char_operators_longest_match_first() {
        let tokens = tokenize("a == b != c <= d >= e += f").unwrap();
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(ops, vec!["==", "!=", "<=", ">=", "+="]);
    }

    #[test]
    fn lexes_word_operators() {
        let tokens = tokenize("a both b any invert c").unwrap();
        let ops: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Operator)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(ops, vec!["both", "any", "invert"]);
    }

    #[test]
    fn lexes_punctuation() {
        let tokens = tokenize("f(a, b); arr[0]; { }").unwrap();
        let punct: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Punctuation)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(punct, vec!["(", ",", ")", ";", "[", "]", ";", "{", "}"]);
    }

    #[test]
    fn unrecognized_character_errors() {
        assert!(tokenize("set x = 1 @ 2;").is_err());
    }

    #[test]
    fn whitespace_is_pure_separator() {
        let a = tokenize("set   x=1;").unwrap();
        let b = tokenize("set x = 1 ;").unwrap();
        assert_eq!(lexemes(&a), lexemes(&b));
    }
}
