//! The header/body automaton.
//!
//! Tokens are consumed left to right exactly once. Each one is either pushed
//! onto a stack or causes a run of stack elements to be reduced into a
//! `GrammarNode`; rules are checked at the moment a reduction happens.
//!
//! ```text
//! <message>   ::= <header>, [<separator>], <body-token>*
//! <header>    ::= <type>, <token>*, <NL>
//! <type>      ::= <token>*, <DIVIDER>
//! <separator> ::= <NL>
//! ```
//!
//! The bottom of the stack is a `START` node until the final `NL` reduces
//! everything into one `MESSAGE` node.

use std::fmt;

use crate::config::Config;
use crate::error::{Error, ErrorKind};
use crate::problem::{Problem, ProblemKind};
use crate::token::{Token, TokenKind};

/// Check a token sequence from [`tokenize`](crate::tokenize) using the
/// default [`Config`].
///
/// # Errors
///
/// Only if the tokens cannot be reduced to a single message, which does not
/// happen for the output of [`tokenize`](crate::tokenize).
pub fn validate<'a>(tokens: &[Token<'a>]) -> Result<Vec<Problem<'a>>, Error> {
    Validator::default().validate(tokens)
}

/// Validates the structure of a commit message header and body.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Validator {
    max_header_length: usize,
}

impl Validator {
    /// Create a validator from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            max_header_length: config.max_header_length(),
        }
    }

    /// Check a token sequence, returning every problem found in token order.
    ///
    /// A sequence missing its trailing [`TokenKind::Eof`] is treated as if it
    /// had one.
    ///
    /// # Errors
    ///
    /// Only if the tokens cannot be reduced to a single message, which does
    /// not happen for the output of [`tokenize`](crate::tokenize).
    pub fn validate<'a>(&self, tokens: &[Token<'a>]) -> Result<Vec<Problem<'a>>, Error> {
        let mut run = Run {
            max_header_length: self.max_header_length,
            stack: Stack::new(),
            problems: Vec::new(),
        };
        let mut cursor = Cursor { tokens, position: 0 };

        while let Some(token) = cursor.current() {
            tracing::trace!(%token, stack = %run.stack, "consume");
            if token.is(TokenKind::Eof) {
                break;
            }
            run.check_header_length(token);
            match token.kind() {
                TokenKind::Word | TokenKind::BreakingChange => run.content(token),
                TokenKind::Dot | TokenKind::OpenParen | TokenKind::Exclamation => {
                    run.stack.push(Element::Token(token));
                }
                TokenKind::Divider => run.divider(token),
                TokenKind::CloseParen => run.close_paren(token),
                TokenKind::Nl => run.end_of_line(token, cursor.next_is_eof()),
                TokenKind::Eof => unreachable!("handled above"),
            }
            cursor.advance();
        }

        run.finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

struct Cursor<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
}

impl<'a> Cursor<'_, 'a> {
    fn current(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn next_is_eof(&self) -> bool {
        self.tokens
            .get(self.position + 1)
            .map_or(true, |next| next.is(TokenKind::Eof))
    }

    fn advance(&mut self) {
        self.position += 1;
    }
}

/// State of a single `validate` call.
struct Run<'a> {
    max_header_length: usize,
    stack: Stack<'a>,
    problems: Vec<Problem<'a>>,
}

impl<'a> Run<'a> {
    fn report(&mut self, kind: ProblemKind, token: Token<'a>) {
        tracing::trace!(?kind, %token, "problem");
        self.problems.push(Problem::new(kind, token));
    }

    fn header_open(&self) -> bool {
        !self.stack.contains(Tag::Header)
    }

    fn check_header_length(&mut self, token: Token<'a>) {
        if self.header_open()
            && token.column() <= self.max_header_length
            && self.max_header_length < token.end_column()
        {
            self.report(ProblemKind::HeaderTooLong, token);
        }
    }

    fn content(&mut self, token: Token<'a>) {
        if self.stack.top_is(Tag::Header) {
            self.report(ProblemKind::MissingBodySeparator, token);
        }
        self.stack.push(Element::Token(token));
    }

    fn divider(&mut self, token: Token<'a>) {
        if self.stack.contains(Tag::Type) || !self.header_open() {
            return;
        }
        if 2 < token.value().chars().count() {
            self.report(ProblemKind::ExcessWhitespaceAfterColon, token);
        }
        self.stack.reduce(Tag::Type);
    }

    fn close_paren(&mut self, token: Token<'a>) {
        // the `)` itself is consumed, never pushed
        if self.stack.contains(Tag::Type) || !self.header_open() {
            return;
        }
        if let Some(&Element::Token(top)) = self.stack.top() {
            if !is_content(&top) {
                self.report(ProblemKind::EmptyScope, token);
            }
        }
    }

    fn end_of_line(&mut self, token: Token<'a>, next_is_eof: bool) {
        if self.header_open() {
            if self.stack.is_base_only() {
                self.report(ProblemKind::EmptyHeader, token);
            } else if !self.stack.contains(Tag::Type) {
                let blamed = self
                    .stack
                    .top()
                    .and_then(Element::last_token)
                    .unwrap_or(token);
                self.report(ProblemKind::NoType, blamed);
            }
            if let Some(&Element::Token(top)) = self.stack.top() {
                if top.is(TokenKind::Dot) {
                    self.report(ProblemKind::HeaderEndsInDot, top);
                }
            }
            self.stack.reduce(Tag::Header);
        } else if self.stack.top_is(Tag::Header) {
            self.stack
                .push(Element::Node(GrammarNode::new(Tag::HeaderBodySeparator, Vec::new())));
            if next_is_eof {
                self.report(ProblemKind::EmptyBody, token);
            }
        } else if self.stack.top_is(Tag::HeaderBodySeparator) {
            self.report(ProblemKind::EmptyBody, token);
        }

        if next_is_eof {
            self.stack.reduce_all(Tag::Message);
        }
    }

    fn finish(mut self) -> Result<Vec<Problem<'a>>, Error> {
        if self.stack.is_base_only() {
            // no tokens at all, so nothing real to blame
            self.stack.reduce_all(Tag::Message);
            self.report(ProblemKind::EmptyHeader, Token::eof());
        }

        match self.stack.elements.as_slice() {
            [Element::Node(node)] if node.tag == Tag::Message => {
                tracing::debug!(problems = self.problems.len(), "validated");
                Ok(self.problems)
            }
            _ => Err(Error::new(ErrorKind::UnreachableGrammarState)
                .set_context(self.stack.to_string())),
        }
    }
}

fn is_content(token: &Token<'_>) -> bool {
    token.is(TokenKind::Word) || token.is(TokenKind::BreakingChange)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Tag {
    Start,
    Type,
    Header,
    HeaderBodySeparator,
    Message,
}

impl Tag {
    fn as_str(self) -> &'static str {
        match self {
            Tag::Start => "START",
            Tag::Type => "TYPE",
            Tag::Header => "HEADER",
            Tag::HeaderBodySeparator => "HEADER_BODY_SEPARATOR",
            Tag::Message => "MESSAGE",
        }
    }
}

/// A reduced run of stack elements.
#[derive(Clone, Debug, Eq, PartialEq)]
struct GrammarNode<'a> {
    tag: Tag,
    children: Vec<Element<'a>>,
}

impl<'a> GrammarNode<'a> {
    fn new(tag: Tag, children: Vec<Element<'a>>) -> Self {
        Self { tag, children }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Element<'a> {
    Token(Token<'a>),
    Node(GrammarNode<'a>),
}

impl<'a> Element<'a> {
    fn is_node(&self, tag: Tag) -> bool {
        matches!(self, Element::Node(node) if node.tag == tag)
    }

    /// The right-most token, searching into reduced nodes.
    fn last_token(&self) -> Option<Token<'a>> {
        match self {
            Element::Token(token) => Some(*token),
            Element::Node(node) => node.children.iter().rev().find_map(Element::last_token),
        }
    }
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Token(token) => write!(f, "{}({:?})", token.kind(), token.value()),
            Element::Node(node) => {
                f.write_str(node.tag.as_str())?;
                if !node.children.is_empty() {
                    f.write_str("[")?;
                    write_joined(f, &node.children)?;
                    f.write_str("]")?;
                }
                Ok(())
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, elements: &[Element<'_>]) -> fmt::Result {
    for (i, element) in elements.iter().enumerate() {
        if 0 < i {
            f.write_str(", ")?;
        }
        write!(f, "{element}")?;
    }
    Ok(())
}

struct Stack<'a> {
    elements: Vec<Element<'a>>,
}

impl<'a> Stack<'a> {
    const BASE: usize = 1;

    fn new() -> Self {
        Self {
            elements: vec![Element::Node(GrammarNode::new(Tag::Start, Vec::new()))],
        }
    }

    fn push(&mut self, element: Element<'a>) {
        self.elements.push(element);
    }

    fn top(&self) -> Option<&Element<'a>> {
        self.elements.last()
    }

    fn top_is(&self, tag: Tag) -> bool {
        self.top().is_some_and(|top| top.is_node(tag))
    }

    fn contains(&self, tag: Tag) -> bool {
        self.elements.iter().any(|element| element.is_node(tag))
    }

    fn is_base_only(&self) -> bool {
        matches!(self.elements.as_slice(), [only] if only.is_node(Tag::Start))
    }

    /// Reduce everything above the `START` base.
    fn reduce(&mut self, tag: Tag) {
        self.reduce_from(Self::BASE, tag);
    }

    fn reduce_all(&mut self, tag: Tag) {
        self.reduce_from(0, tag);
    }

    fn reduce_from(&mut self, from: usize, tag: Tag) {
        let from = from.min(self.elements.len());
        let children = self.elements.split_off(from);
        self.elements
            .push(Element::Node(GrammarNode::new(tag, children)));
    }
}

impl fmt::Display for Stack<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        write_joined(f, &self.elements)?;
        f.write_str("]")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tokenize;
    use indoc::indoc;

    fn kinds(problems: &[Problem<'_>]) -> Vec<ProblemKind> {
        problems.iter().map(Problem::kind).collect()
    }

    fn lint(text: &str) -> Vec<Problem<'_>> {
        validate(&tokenize(text)).unwrap()
    }

    #[track_caller]
    fn assert_clean(text: &str) {
        let problems = lint(text);
        assert!(problems.is_empty(), "{text:?}: {problems:?}");
    }

    mod tokens {
        use super::*;

        fn token(kind: TokenKind, value: &str, column: usize) -> Token<'_> {
            Token::new(kind, value, 1, column)
        }

        #[test]
        fn empty_header() {
            let problems = validate(&[token(TokenKind::Nl, "", 1), Token::eof()]).unwrap();
            assert_eq!(kinds(&problems), [ProblemKind::EmptyHeader]);
            assert_eq!(problems[0].token(), token(TokenKind::Nl, "", 1));
        }

        #[test]
        fn header_without_type() {
            let problems = validate(&[
                token(TokenKind::Word, "mytext", 1),
                token(TokenKind::Nl, "", 7),
            ])
            .unwrap();
            assert_eq!(kinds(&problems), [ProblemKind::NoType]);
        }

        #[test]
        fn header_ending_with_dot() {
            let problems = validate(&[
                token(TokenKind::Word, "feat", 1),
                token(TokenKind::Divider, ": ", 5),
                token(TokenKind::Word, "description", 7),
                token(TokenKind::Dot, ".", 18),
                token(TokenKind::Nl, "", 19),
                Token::eof(),
            ])
            .unwrap();
            assert_eq!(kinds(&problems), [ProblemKind::HeaderEndsInDot]);
        }

        #[test]
        fn unterminated_line_is_a_bug() {
            let err = validate(&[token(TokenKind::Word, "feat", 1), Token::eof()]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnreachableGrammarState);
            assert_eq!(err.context(), Some(r#"[START, WORD("feat")]"#));
        }

        #[test]
        fn idempotent() {
            let tokens = tokenize("feat(): msg.\nbody");
            let first = validate(&tokens).unwrap();
            let second = validate(&tokens).unwrap();
            assert_eq!(first, second);
        }
    }

    mod header {
        use super::*;

        #[test]
        fn empty_message() {
            let problems = lint("");
            assert_eq!(
                problems,
                [Problem::new(ProblemKind::EmptyHeader, Token::eof())]
            );
            assert_eq!(problems[0].line(), 0);
            assert_eq!(problems[0].column(), 0);
        }

        #[test]
        fn blank_header() {
            assert_eq!(kinds(&lint("\n")), [ProblemKind::EmptyHeader]);
            assert_eq!(kinds(&lint("   ")), [ProblemKind::EmptyHeader]);
        }

        #[test]
        fn no_type() {
            assert_eq!(
                lint("mytext"),
                [Problem::new(
                    ProblemKind::NoType,
                    Token::new(TokenKind::Word, "mytext", 1, 1)
                )]
            );
            assert_eq!(kinds(&lint("fix Improved error messages")), [ProblemKind::NoType]);
            assert_eq!(kinds(&lint("feat:")), [ProblemKind::NoType]);
        }

        #[test]
        fn no_type_blames_last_token() {
            let problems = lint("update (parser)");
            assert_eq!(kinds(&problems), [ProblemKind::NoType]);
            assert_eq!(problems[0].token().value(), "parser");
        }

        #[test]
        fn divider_without_type() {
            // the empty type still reduces, so end of line sees a type
            assert_clean(": msg");
        }

        #[test]
        fn ends_in_dot() {
            assert_eq!(
                lint("feat: msg."),
                [Problem::new(
                    ProblemKind::HeaderEndsInDot,
                    Token::new(TokenKind::Dot, ".", 1, 10)
                )]
            );
        }

        #[test]
        fn no_type_and_ends_in_dot() {
            assert_eq!(
                kinds(&lint("hello world.")),
                [ProblemKind::NoType, ProblemKind::HeaderEndsInDot]
            );
        }

        #[test]
        fn empty_scope() {
            assert_eq!(
                lint("feat(): msg"),
                [Problem::new(
                    ProblemKind::EmptyScope,
                    Token::new(TokenKind::CloseParen, ")", 1, 6)
                )]
            );
            assert_eq!(kinds(&lint("feat(.): msg")), [ProblemKind::EmptyScope]);
        }

        #[test]
        fn every_paren_pair_before_type_is_checked() {
            assert_eq!(
                lint("feat(a)(): x"),
                [Problem::new(
                    ProblemKind::EmptyScope,
                    Token::new(TokenKind::CloseParen, ")", 1, 9)
                )]
            );
        }

        #[test]
        fn dot_before_close_paren_ends_header() {
            assert_eq!(
                kinds(&lint("update (see docs.)")),
                [
                    ProblemKind::EmptyScope,
                    ProblemKind::NoType,
                    ProblemKind::HeaderEndsInDot,
                ]
            );
            let problems = lint("update (.)");
            assert_eq!(
                kinds(&problems),
                [
                    ProblemKind::EmptyScope,
                    ProblemKind::NoType,
                    ProblemKind::HeaderEndsInDot,
                ]
            );
            assert_eq!(problems[2].token(), Token::new(TokenKind::Dot, ".", 1, 9));
        }

        #[test]
        fn parens_after_type_are_inert() {
            assert_clean("feat: my ()");
            assert_clean("feat(parser): msg with par ()");
            assert_clean("type: hello world (#1)");
        }

        #[test]
        fn valid_headers() {
            assert_clean("feat!: msg");
            assert_clean("feat(scope)!: msg");
            assert_clean("type(my scope): hello world");
            assert_clean("chore: add .hello.txt (#1)");
        }

        #[test]
        fn excess_whitespace_after_colon() {
            assert_eq!(
                lint("feat:   msg"),
                [Problem::new(
                    ProblemKind::ExcessWhitespaceAfterColon,
                    Token::new(TokenKind::Divider, ":   ", 1, 5)
                )]
            );
            // only the divider that ends the type is checked
            assert_clean("feat: ratio a:  b");
        }

        #[test]
        fn too_long() {
            // "long" spans columns 48 to 51
            let header = format!("feat: {} long", "x".repeat(40));
            let problems = lint(&header);
            assert_eq!(
                problems,
                [Problem::new(
                    ProblemKind::HeaderTooLong,
                    Token::new(TokenKind::Word, "long", 1, 48)
                )]
            );
        }

        #[test]
        fn fifty_columns_fit() {
            let header = format!("feat: {}", "x".repeat(44));
            assert_eq!(header.len(), 50);
            assert_clean(&header);
        }

        #[test]
        fn only_the_straddling_token_is_too_long() {
            let header = format!("feat: {} and then some more", "x".repeat(42));
            assert_eq!(kinds(&lint(&header)), [ProblemKind::HeaderTooLong]);
        }

        #[test]
        fn body_lines_are_not_length_checked() {
            let message = format!("feat: msg\n\n{}", "x".repeat(80));
            assert_clean(&message);
        }

        #[test]
        fn configured_length() {
            let validator = Validator::new(&Config::default().with_max_header_length(72));
            let header = format!("feat: {}", "x".repeat(60));
            assert!(validator.validate(&tokenize(&header)).unwrap().is_empty());
        }
    }

    mod body {
        use super::*;

        #[test]
        fn missing_separator() {
            let problems = lint("feat: msg\nbody text");
            assert_eq!(
                problems,
                [Problem::new(
                    ProblemKind::MissingBodySeparator,
                    Token::new(TokenKind::Word, "body", 2, 1)
                )]
            );
        }

        #[test]
        fn breaking_change_needs_separator() {
            assert_eq!(
                kinds(&lint("feat: msg\nBREAKING CHANGE: gone")),
                [ProblemKind::MissingBodySeparator]
            );
        }

        #[test]
        fn empty_body() {
            let problems = lint("feat: msg\n\n");
            assert_eq!(
                problems,
                [Problem::new(
                    ProblemKind::EmptyBody,
                    Token::new(TokenKind::Nl, "", 2, 1)
                )]
            );
        }

        #[test]
        fn repeated_blank_lines() {
            assert_eq!(kinds(&lint("feat: msg\n\n\n")), [ProblemKind::EmptyBody]);
            assert_eq!(
                kinds(&lint("feat: msg\n\n\n\n")),
                [ProblemKind::EmptyBody, ProblemKind::EmptyBody]
            );
        }

        #[test]
        fn trailing_newline() {
            assert_clean("feat: msg\n");
        }

        #[test]
        fn complete_message() {
            let message = indoc! {"
                chore(changelog): improve readability

                Change date notation from YYYY-MM-DD to YYYY.MM.DD to make it a tiny bit
                easier to parse while reading.

                BREAKING CHANGE: Just kidding!
            "};
            assert_clean(message);
        }

        #[test]
        fn several_problems_in_token_order() {
            let message = indoc! {"
                feat():  add things.
                and more
            "};
            assert_eq!(
                kinds(&lint(message)),
                [
                    ProblemKind::EmptyScope,
                    ProblemKind::ExcessWhitespaceAfterColon,
                    ProblemKind::HeaderEndsInDot,
                    ProblemKind::MissingBodySeparator,
                ]
            );
        }
    }

    #[test]
    fn stack_display() {
        let mut stack = Stack::new();
        stack.push(Element::Token(Token::new(TokenKind::Word, "feat", 1, 1)));
        stack.reduce(Tag::Type);
        stack.push(Element::Token(Token::new(TokenKind::Word, "msg", 1, 7)));
        assert_eq!(stack.to_string(), r#"[START, TYPE[WORD("feat")], WORD("msg")]"#);
        stack.reduce_all(Tag::Message);
        assert_eq!(
            stack.to_string(),
            r#"[MESSAGE[START, TYPE[WORD("feat")], WORD("msg")]]"#
        );
    }
}
