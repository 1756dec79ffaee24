//! Structural diagnostics for [Conventional Commit] messages.
//!
//! [conventional commit]: https://www.conventionalcommits.org
//!
//! Checking is a two step pipeline: [`tokenize`] turns the raw message into
//! position-tagged [`Token`]s, and [`validate`] runs them through a stack
//! automaton that reports every broken rule as a [`Problem`].
//!
//! # Example
//!
//! ```rust
//! use indoc::indoc;
//! use conventional_lint::{ProblemKind, TypeCatalog};
//!
//! let message = indoc!("
//!     docs(example)!: add tested usage example.
//!     This example is tested using Rust's doctest capabilities.
//! ");
//!
//! let problems = conventional_lint::lint(message).unwrap();
//! let kinds: Vec<_> = problems.iter().map(|p| p.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     [ProblemKind::HeaderEndsInDot, ProblemKind::MissingBodySeparator]
//! );
//!
//! // Every problem points at the token that gave it away.
//! assert_eq!((problems[0].line(), problems[0].column()), (1, 41));
//! assert_eq!(problems[1].token().value(), "This");
//!
//! // Rendering is up to the caller.
//! let types = TypeCatalog::default();
//! assert_eq!(
//!     problems[1].describe(&types),
//!     "header and body must be separated by a blank line"
//! );
//!
//! // A well-formed message has nothing to report.
//! let message = indoc!("
//!     feat(lexer): recognize breaking change footers
//!
//!     BREAKING CHANGE: tokens now carry their column
//! ");
//! assert!(conventional_lint::lint(message).unwrap().is_empty());
//! ```

#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod lexer;
mod problem;
mod token;
mod validator;

pub use catalog::{Type, TypeCatalog};
pub use config::{Config, DEFAULT_MAX_HEADER_LENGTH};
pub use error::{Error, ErrorKind};
pub use lexer::tokenize;
pub use problem::{describe, Problem, ProblemKind};
pub use token::{Token, TokenKind};
pub use validator::{validate, Validator};

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
pub struct ReadmeDoctests;

/// Tokenize and validate `message` with the default [`Config`].
///
/// # Errors
///
/// Only on a validator bug; see [`Validator::validate`].
pub fn lint(message: &str) -> Result<Vec<Problem<'_>>, Error> {
    validate(&tokenize(message))
}

/// Tokenize and validate `message` with `config`.
///
/// # Errors
///
/// Only on a validator bug; see [`Validator::validate`].
pub fn lint_with<'a>(message: &'a str, config: &Config) -> Result<Vec<Problem<'a>>, Error> {
    Validator::new(config).validate(&tokenize(message))
}
