// ABOUTME: The reader: source text to value trees, via nom for the lexing

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::value,
    multi::many0,
    IResult, Parser,
};

use crate::error::ParseError;
use crate::value::Value;

/// Atom tokens are capped at this many bytes; string token contents get one
/// byte less (the opening `"` spends it). Longer runs are consumed and the
/// excess silently dropped.
pub const TOKEN_CAP: usize = 63;
const STRING_CAP: usize = TOKEN_CAP - 1;

/// Everything strictly above 0x20 that is not a bracket continues an atom.
/// Note that `'` and `"` are only special at the start of a token.
fn is_atom_char(c: char) -> bool {
    c as u32 > 0x20 && !matches!(c, '(' | ')' | '[' | ']')
}

/// Skip whitespace (any byte <= 0x20) and `;` line comments.
fn ws_and_comments(input: &str) -> IResult<&str, ()> {
    many0(alt((
        value((), take_while1(|c: char| c as u32 <= 0x20)),
        value((), (char(';'), take_while(|c: char| c != '\n'))),
    )))
    .map(|_| ())
    .parse(input)
}

/// Advance past anything the reader ignores between tokens.
pub fn skip_ignored(input: &str) -> &str {
    match ws_and_comments(input) {
        Ok((rest, ())) => rest,
        Err(_) => input,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open(char),
    Close(char),
    Quote,
    Str(&'a str),
    Atom(&'a str),
}

/// Clip a token to `cap` bytes, backing up to a character boundary.
fn clip(token: &str, cap: usize) -> &str {
    if token.len() <= cap {
        return token;
    }
    let mut end = cap;
    while !token.is_char_boundary(end) {
        end -= 1;
    }
    &token[..end]
}

fn next_token(input: &str) -> Result<(Token<'_>, &str), ParseError> {
    let input = skip_ignored(input);
    match input.chars().next() {
        None => Err(ParseError::Incomplete),
        Some(c @ ('(' | '[')) => Ok((Token::Open(c), &input[1..])),
        Some(c @ (')' | ']')) => Ok((Token::Close(c), &input[1..])),
        Some('\'') => Ok((Token::Quote, &input[1..])),
        Some('"') => {
            // A string token runs to the closing quote. A newline or the end
            // of input closes it too, with a report on stderr; strings never
            // span lines.
            let body = &input[1..];
            let (content, consumed) = match body.find(['"', '\n']) {
                Some(at) if body.as_bytes()[at] == b'"' => (&body[..at], at + 1),
                Some(at) => {
                    eprintln!("read: missing closing double quote");
                    (&body[..at], at + 1)
                }
                None => {
                    eprintln!("read: missing closing double quote");
                    (body, body.len())
                }
            };
            Ok((Token::Str(clip(content, STRING_CAP)), &body[consumed..]))
        }
        Some(_) => {
            let (rest, run) = take_while1::<_, _, nom::error::Error<&str>>(is_atom_char)(input)
                .unwrap_or((input, ""));
            Ok((Token::Atom(clip(run, TOKEN_CAP)), rest))
        }
    }
}

/// An atom that parses in full as a float is a number; anything else is a
/// symbol.
fn atom_value(token: &str) -> Value {
    match token.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::symbol(token),
    }
}

/// Read exactly one form, returning it with the unconsumed remainder.
pub fn parse(input: &str) -> Result<(Value, &str), ParseError> {
    let (token, rest) = next_token(input)?;
    parse_form(token, rest)
}

fn parse_form<'a>(token: Token<'_>, rest: &'a str) -> Result<(Value, &'a str), ParseError> {
    match token {
        Token::Quote => {
            let (quoted, rest) = parse(rest)?;
            let form = Value::cons(Value::symbol("quote"), Value::cons(quoted, Value::Nil));
            Ok((form, rest))
        }
        Token::Str(content) => Ok((Value::string(content), rest)),
        Token::Open(open) => parse_list(open, rest),
        Token::Close(c) => Err(ParseError::UnexpectedClose(c)),
        Token::Atom(token) => Ok((atom_value(token), rest)),
    }
}

/// Read list elements until the closer matching `open`. A `.` token switches
/// to dotted-tail position: one more form, then the closer.
fn parse_list(open: char, input: &str) -> Result<(Value, &str), ParseError> {
    let close = if open == '(' { ')' } else { ']' };
    let (token, rest) = next_token(input)?;
    match token {
        Token::Close(c) if c == close => Ok((Value::Nil, rest)),
        Token::Close(c) => Err(ParseError::MismatchedClose {
            expected: close,
            found: c,
        }),
        Token::Atom(".") => {
            let (tail, rest) = parse(rest)?;
            match next_token(rest)? {
                (Token::Close(c), rest) if c == close => Ok((tail, rest)),
                (Token::Close(c), _) => Err(ParseError::MismatchedClose {
                    expected: close,
                    found: c,
                }),
                _ => Err(ParseError::BadDottedTail(close)),
            }
        }
        token => {
            let (head, rest) = parse_form(token, rest)?;
            let (tail, rest) = parse_list(open, rest)?;
            Ok((Value::cons(head, tail), rest))
        }
    }
}

/// True when `input` ends inside a form; drives REPL continuation lines.
pub fn is_incomplete(input: &str) -> bool {
    let mut rest = input;
    loop {
        rest = skip_ignored(rest);
        if rest.is_empty() {
            return false;
        }
        match parse(rest) {
            Ok((_, remainder)) => rest = remainder,
            Err(ParseError::Incomplete) => return true,
            Err(_) => return false,
        }
    }
}
