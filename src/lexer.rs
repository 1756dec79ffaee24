use std::ops::Range;

use winnow::combinator::{alt, peek, preceded, repeat};
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::{any, none_of, take_while};

use crate::token::{Token, TokenKind};

const BREAKING_PHRASE: &str = "BREAKING CHANGE";
const BREAKING_ARROW: &str = "BREAKING-CHANGE";

type Input<'i> = LocatingSlice<&'i str>;

/// Split a commit message into position-tagged tokens.
///
/// This never fails: text that matches no token is skipped. Every line,
/// including the last one, is closed by a [`TokenKind::Nl`] token, and the
/// sequence always ends with a single [`TokenKind::Eof`].
///
/// ```rust
/// use conventional_lint::{tokenize, TokenKind};
///
/// let kinds: Vec<_> = tokenize("feat(lexer): add tokens")
///     .iter()
///     .map(|t| t.kind())
///     .collect();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Word,
///         TokenKind::OpenParen,
///         TokenKind::Word,
///         TokenKind::CloseParen,
///         TokenKind::Divider,
///         TokenKind::Word,
///         TokenKind::Word,
///         TokenKind::Nl,
///         TokenKind::Eof,
///     ]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    for (index, line) in text.lines().enumerate() {
        tokenize_line(line, index + 1, &mut tokens);
    }
    tokens.push(Token::eof());
    tokens
}

fn tokenize_line<'a>(line: &'a str, number: usize, tokens: &mut Vec<Token<'a>>) {
    // `lexemes` only backtracks, so it cannot fail on a complete line
    let found = lexemes
        .parse_next(&mut LocatingSlice::new(line))
        .unwrap_or_default();
    for (kind, span) in found {
        let column = column_at(line, span.start);
        tokens.push(Token::new(kind, &line[span], number, column));
    }
    tokens.push(Token::new(TokenKind::Nl, "", number, column_at(line, line.len())));
}

fn column_at(line: &str, offset: usize) -> usize {
    line[..offset].chars().count() + 1
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

// <word>            ::= <any UTF8-octets except whitespace or parens or "." or ":">+
fn is_word_char(c: char) -> bool {
    !is_whitespace(c) && !matches!(c, '(' | ')' | '.' | ':')
}

fn whitespace<'i>(i: &mut Input<'i>) -> ModalResult<&'i str> {
    take_while(0.., is_whitespace).parse_next(i)
}

// <line>            ::= (<whitespace>*, (<lexeme> | <skipped>))*
fn lexemes(i: &mut Input<'_>) -> ModalResult<Vec<(TokenKind, Range<usize>)>> {
    repeat(
        0..,
        preceded(
            whitespace,
            alt((lexeme.with_span().map(Some), any.value(None))),
        ),
    )
    .map(|found: Vec<_>| found.into_iter().flatten().collect())
    .parse_next(i)
}

// Order matters: the breaking-change phrase would otherwise lex as two words
// and a divider must win over the `:` a word refuses.
fn lexeme(i: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        breaking_change.value(TokenKind::BreakingChange),
        divider.value(TokenKind::Divider),
        '('.value(TokenKind::OpenParen),
        ')'.value(TokenKind::CloseParen),
        '!'.value(TokenKind::Exclamation),
        '.'.value(TokenKind::Dot),
        word.value(TokenKind::Word),
    ))
    .parse_next(i)
}

// <breaking-change> ::= "BREAKING-CHANGE" | "BREAKING CHANGE"
fn breaking_change<'i>(i: &mut Input<'i>) -> ModalResult<&'i str> {
    alt((BREAKING_ARROW, BREAKING_PHRASE)).parse_next(i)
}

// <divider>         ::= ":", <whitespace>+, &<non-whitespace>
fn divider<'i>(i: &mut Input<'i>) -> ModalResult<&'i str> {
    (':', take_while(1.., is_whitespace), peek(none_of(is_whitespace)))
        .take()
        .parse_next(i)
}

fn word<'i>(i: &mut Input<'i>) -> ModalResult<&'i str> {
    take_while(1.., is_word_char).parse_next(i)
}
