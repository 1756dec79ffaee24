//! Structural findings reported for a commit message.

use std::fmt;

use crate::catalog::TypeCatalog;
use crate::token::Token;

/// Every structural rule a commit message can break.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ProblemKind {
    /// The header line has no content.
    EmptyHeader,

    /// No `type: ` prefix precedes the description.
    NoType,

    /// The header ends with a `.`.
    HeaderEndsInDot,

    /// A scope was opened and closed without any text, e.g. `feat(): ...`.
    EmptyScope,

    /// The header runs past the configured length.
    HeaderTooLong,

    /// More than one whitespace character follows the `:`.
    ExcessWhitespaceAfterColon,

    /// The header is followed by blank lines but no body.
    EmptyBody,

    /// The body starts on the line right after the header.
    MissingBodySeparator,
}

impl ProblemKind {
    /// A short, catalog-independent explanation.
    pub fn as_str(self) -> &'static str {
        match self {
            ProblemKind::EmptyHeader => "commit msg header may not be empty",
            ProblemKind::NoType => "no type specified",
            ProblemKind::HeaderEndsInDot => "header may not end with a dot",
            ProblemKind::EmptyScope => "scope may not be empty",
            ProblemKind::HeaderTooLong => "header is too long",
            ProblemKind::ExcessWhitespaceAfterColon => {
                "only a single space is allowed after the colon"
            }
            ProblemKind::EmptyBody => "body may not be empty",
            ProblemKind::MissingBodySeparator => {
                "header and body must be separated by a blank line"
            }
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a human-readable message for `kind`.
///
/// [`ProblemKind::NoType`] lists the types from `types`; all other kinds
/// render as their [`Display`](fmt::Display).
///
/// ```rust
/// use conventional_lint::{describe, ProblemKind, TypeCatalog};
///
/// let types: TypeCatalog<'_> = ["feat", "fix"].into_iter().collect();
/// assert_eq!(
///     describe(ProblemKind::NoType, &types),
///     "no type specified, valid types are feat, fix"
/// );
/// ```
pub fn describe(kind: ProblemKind, types: &TypeCatalog<'_>) -> String {
    match kind {
        ProblemKind::NoType if !types.is_empty() => {
            format!("{kind}, valid types are {types}")
        }
        _ => kind.to_string(),
    }
}

/// A broken rule and the token where it was detected.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Problem<'a> {
    kind: ProblemKind,
    token: Token<'a>,
}

impl<'a> Problem<'a> {
    /// Piece together a problem.
    pub const fn new(kind: ProblemKind, token: Token<'a>) -> Self {
        Self { kind, token }
    }

    /// The rule that was broken.
    pub const fn kind(&self) -> ProblemKind {
        self.kind
    }

    /// The token blamed for it.
    ///
    /// An empty message has no tokens; it is blamed on a synthetic token at
    /// `0:0`.
    pub const fn token(&self) -> Token<'a> {
        self.token
    }

    /// 1-based line of the blamed token.
    pub const fn line(&self) -> usize {
        self.token.line()
    }

    /// 1-based column of the blamed token.
    pub const fn column(&self) -> usize {
        self.token.column()
    }

    /// Render the full message, listing `types` where relevant.
    pub fn describe(&self, types: &TypeCatalog<'_>) -> String {
        describe(self.kind, types)
    }
}

impl fmt::Display for Problem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line(), self.column(), self.kind)
    }
}
