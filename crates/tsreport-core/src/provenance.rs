//! Restricted parser for provenance records.
//!
//! Simulation programs store their run parameters as a single mapping
//! literal, written either as JSON (`{"N": 1000, "seed": 3}`) or in Python
//! literal style (`{'N': 1000, 'flag': True}`). The record is parsed as data
//! only: a token stream produced by `logos` feeds a small recursive-descent
//! parser that accepts mappings, lists, tuples, strings, numbers and the
//! boolean/none constants. Anything else is rejected with the byte offset of
//! the offending token.

use std::ops::Range;

use logos::Logos;

use crate::errors::{ErrorInfo, ReportError};
use crate::params::{ParamValue, Parameters};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("True")]
    #[token("true")]
    True,
    #[token("False")]
    #[token("false")]
    False,
    #[token("None")]
    #[token("null")]
    Null,
    #[regex(r"[+-]?[0-9]+", |lex| lex.slice().to_string())]
    Int(String),
    #[regex(
        r"[+-]?([0-9]+\.[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?[0-9]+[eE][+-]?[0-9]+",
        |lex| lex.slice().parse::<f64>().ok()
    )]
    Float(f64),
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unescape(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unescape(lex.slice()))]
    Str(String),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

fn unescape(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(escaped @ ('\\' | '"' | '\'')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

fn malformed(message: &str, offset: usize) -> ReportError {
    ReportError::Metadata(
        ErrorInfo::new("META002", message)
            .with_context("offset", offset.to_string())
            .with_hint("provenance records must be a single mapping literal"),
    )
}

/// Parses a provenance record into named parameters.
pub fn parse_record(record: &str) -> Result<Parameters, ReportError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(record).spanned() {
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(malformed("unrecognised token", span.start)),
        }
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: record.len(),
    };
    let params = parser.mapping()?;
    if let Some((_, span)) = parser.tokens.get(parser.pos) {
        return Err(malformed("trailing input after mapping", span.start));
    }
    Ok(params)
}

struct Parser {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    end: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.end)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<(), ReportError> {
        let offset = self.offset();
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(_) => Err(malformed(&format!("expected {what}"), offset)),
            None => Err(malformed(&format!("unexpected end of record, expected {what}"), offset)),
        }
    }

    fn mapping(&mut self) -> Result<Parameters, ReportError> {
        self.expect(Token::LBrace, "'{'")?;
        let mut params = Parameters::new();
        loop {
            if self.peek() == Some(&Token::RBrace) {
                self.pos += 1;
                return Ok(params);
            }
            let offset = self.offset();
            let key = match self.next() {
                Some(Token::Str(key)) => key,
                Some(_) => return Err(malformed("mapping keys must be quoted strings", offset)),
                None => return Err(malformed("unterminated mapping", offset)),
            };
            self.expect(Token::Colon, "':'")?;
            let value = self.value()?;
            params.insert(key, value);

            let offset = self.offset();
            match self.next() {
                Some(Token::Comma) => continue,
                Some(Token::RBrace) => return Ok(params),
                Some(_) => return Err(malformed("expected ',' or '}'", offset)),
                None => return Err(malformed("unterminated mapping", offset)),
            }
        }
    }

    fn sequence(&mut self, close: Token) -> Result<ParamValue, ReportError> {
        let mut items = Vec::new();
        loop {
            if self.peek() == Some(&close) {
                self.pos += 1;
                return Ok(ParamValue::List(items));
            }
            items.push(self.value()?);
            let offset = self.offset();
            match self.next() {
                Some(Token::Comma) => continue,
                Some(token) if token == close => return Ok(ParamValue::List(items)),
                Some(_) => return Err(malformed("expected ',' or closing bracket", offset)),
                None => return Err(malformed("unterminated sequence", offset)),
            }
        }
    }

    fn value(&mut self) -> Result<ParamValue, ReportError> {
        let offset = self.offset();
        match self.next() {
            Some(Token::Int(digits)) => Ok(parse_int(&digits)),
            Some(Token::Float(value)) => Ok(ParamValue::Float(value)),
            Some(Token::Str(value)) => Ok(ParamValue::Str(value)),
            Some(Token::True) => Ok(ParamValue::Bool(true)),
            Some(Token::False) => Ok(ParamValue::Bool(false)),
            Some(Token::Null) => Ok(ParamValue::None),
            Some(Token::LBracket) => self.sequence(Token::RBracket),
            Some(Token::LParen) => self.sequence(Token::RParen),
            Some(Token::LBrace) => Err(malformed("nested mappings are not supported", offset)),
            Some(Token::Ident(name)) => Err(malformed(&format!("unknown name '{name}'"), offset)),
            Some(_) => Err(malformed("expected a value", offset)),
            None => Err(malformed("unexpected end of record, expected a value", offset)),
        }
    }
}

// Integers wider than i128 degrade to floats rather than failing the record.
fn parse_int(digits: &str) -> ParamValue {
    match digits.parse::<i128>() {
        Ok(value) => ParamValue::Int(value),
        Err(_) => ParamValue::Float(digits.parse::<f64>().unwrap_or(f64::NAN)),
    }
}
