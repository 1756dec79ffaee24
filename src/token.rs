//! Position-tagged tokens produced by the [lexer](crate::tokenize).

use std::fmt;

/// The closed set of token kinds.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum TokenKind {
    /// `BREAKING CHANGE` or `BREAKING-CHANGE`
    BreakingChange,
    /// A colon followed by whitespace and then more text, e.g. `": "`
    Divider,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "!"
    Exclamation,
    /// "."
    Dot,
    /// The end of a line.
    ///
    /// A blank line is an `Nl` immediately following another `Nl`.
    Nl,
    /// Any run of characters other than whitespace, parens, `.` and `:`.
    Word,
    /// End of input; always the last token and never part of a line.
    Eof,
}

impl TokenKind {
    /// Access `str` representation of `TokenKind`
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::BreakingChange => "BREAKING_CHANGE",
            TokenKind::Divider => "DIVIDER",
            TokenKind::OpenParen => "OP",
            TokenKind::CloseParen => "CP",
            TokenKind::Exclamation => "EXCLAMATION",
            TokenKind::Dot => "DOT",
            TokenKind::Nl => "NL",
            TokenKind::Word => "WORD",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexeme of a commit message.
///
/// `line` and `column` are 1-based; synthetic tokens (end of input, or the
/// stand-in used to report an empty message) sit at `0:0`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token<'a> {
    kind: TokenKind,
    value: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Token<'a> {
    /// Piece together a token.
    pub const fn new(kind: TokenKind, value: &'a str, line: usize, column: usize) -> Self {
        Self {
            kind,
            value,
            line,
            column,
        }
    }

    /// The end-of-input sentinel.
    pub const fn eof() -> Self {
        Self::new(TokenKind::Eof, "", 0, 0)
    }

    /// The kind of the token.
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal text matched.
    pub const fn value(&self) -> &'a str {
        self.value
    }

    /// 1-based line the token starts on.
    pub const fn line(&self) -> usize {
        self.line
    }

    /// 1-based column the token starts at, counted in `char`s.
    pub const fn column(&self) -> usize {
        self.column
    }

    /// The column of the token's last character.
    ///
    /// Empty tokens end where they start.
    pub fn end_column(&self) -> usize {
        self.column + self.value.chars().count().saturating_sub(1)
    }

    pub(crate) fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?}) at {}:{}",
            self.kind, self.value, self.line, self.column
        )
    }
}
