use conventional_lint::{lint, lint_with, tokenize, validate, Config, ProblemKind, TokenKind};
use proptest::prelude::*;

fn message() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-z()!.: \n\t]{0,80}",
        "[a-z]{1,8}(\\([a-z]{0,6}\\))?!?: {1,3}[a-z .]{0,60}(\n{0,3}[A-Za-z .:-]{0,40}){0,4}",
    ]
}

proptest! {
    #[test]
    fn always_reduces(text in message()) {
        prop_assert!(lint(&text).is_ok());
    }

    #[test]
    fn validation_is_idempotent(text in message()) {
        let tokens = tokenize(&text);
        let first = validate(&tokens).unwrap();
        let second = validate(&tokens).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn token_stream_is_terminated(text in message()) {
        let tokens = tokenize(&text);
        prop_assert_eq!(tokens.last().map(|t| t.kind()), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind() == TokenKind::Eof).count(), 1);
        for token in &tokens[..tokens.len() - 1] {
            prop_assert!(1 <= token.line());
            prop_assert!(1 <= token.column());
        }
    }

    #[test]
    fn header_too_long_at_most_once(text in message()) {
        let problems = lint(&text).unwrap();
        let too_long = problems
            .iter()
            .filter(|p| p.kind() == ProblemKind::HeaderTooLong)
            .count();
        prop_assert!(too_long <= 1);
    }
}

#[test]
fn longer_headers_with_config() {
    let header = "feat: a header that is fine for most projects, though not fifty";
    let kinds: Vec<_> = lint(header).unwrap().iter().map(|p| p.kind()).collect();
    assert_eq!(kinds, [ProblemKind::HeaderTooLong]);

    let config = Config::default().with_max_header_length(72);
    assert!(lint_with(header, &config).unwrap().is_empty());
}
