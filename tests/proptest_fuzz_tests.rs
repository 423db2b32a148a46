//! Property-based tests for the scanner and parser
//!
//! These tests use proptest to generate random inputs and verify that:
//! 1. Neither the scanner nor the parser panics on arbitrary input
//! 2. The token count always matches the delimiters and atom runs in the text
//! 3. Canonical text survives a parse/print round trip unchanged
//! 4. Whitespace between elements never changes the tree

use proptest::prelude::*;
use sexpr::{parse, parse_with, tokenize, BalancePolicy, ParserConfig, TokenKind};

// =============================================================================
// STRATEGY GENERATORS
// =============================================================================

/// Generate random strings that might break the scanner
fn arbitrary_source_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[\x00-\x7F]{0,300}").unwrap()
}

/// Generate text built from S-expression-ish pieces, balanced or not
fn sexp_like_string() -> impl Strategy<Value = String> {
    prop::collection::vec(sexp_piece(), 0..40).prop_map(|pieces| pieces.concat())
}

fn sexp_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("\"".to_string()),
        Just(" ".to_string()),
        Just("\t\n".to_string()),
        "[a-z0-9+*?!-]{1,6}",
        "[αβγ✓]{1,3}",
    ]
}

/// Bare atom text: no delimiters, no whitespace
fn atom() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9+*/<>=!?_.-]{1,8}"
}

/// Quoted atom text: anything except the quote itself
fn quoted() -> impl Strategy<Value = String> {
    "[a-z ()\t]{0,8}".prop_map(|s| format!("\"{}\"", s))
}

/// Well-formed expression in canonical (single-space) form
fn canonical_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![atom(), quoted()];
    leaf.prop_recursive(5, 64, 6, |inner| {
        prop::collection::vec(inner, 0..6).prop_map(|items| format!("({})", items.join(" ")))
    })
}

fn canonical_program() -> impl Strategy<Value = String> {
    prop::collection::vec(canonical_expr(), 0..4).prop_map(|exprs| exprs.join(" "))
}

/// Non-empty run of mixed whitespace
fn whitespace() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just(' '), Just('\t'), Just('\r'), Just('\n')], 1..5)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Counts parens and atom runs the way the scanner should see them
fn expected_token_count(source: &str) -> Option<usize> {
    let mut count = 1; // EndOfInput
    let mut in_atom = false;
    let mut chars = source.chars();

    while let Some(c) = chars.next() {
        match c {
            '(' | ')' => {
                count += 1;
                in_atom = false;
            }
            ' ' | '\t' | '\r' | '\n' => in_atom = false,
            '"' => {
                count += 1;
                in_atom = false;
                // Unterminated quote ends the stream with an Error token
                chars.by_ref().find(|&c| c == '"')?;
            }
            _ => {
                if !in_atom {
                    count += 1;
                }
                in_atom = true;
            }
        }
    }

    Some(count)
}

// =============================================================================
// SCANNER PROPERTIES
// =============================================================================

proptest! {
    /// The scanner always terminates with exactly one terminal token, last
    #[test]
    fn scanner_always_terminates(source in arbitrary_source_string()) {
        let tokens = tokenize(&source);
        let terminals = tokens.iter().filter(|t| t.is_terminal()).count();
        prop_assert_eq!(terminals, 1);
        prop_assert!(tokens.last().map(|t| t.is_terminal()).unwrap_or(false));
    }

    /// Token count = parens + atom runs + 1 whenever no quote is left open
    #[test]
    fn token_count_law(source in sexp_like_string()) {
        let tokens = tokenize(&source);
        match expected_token_count(&source) {
            Some(expected) => {
                prop_assert_eq!(tokens.len(), expected);
                prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
            }
            None => {
                let last = tokens.last().map(|t| t.kind);
                prop_assert!(matches!(last, Some(TokenKind::Error(_))));
            }
        }
    }

    /// Every token's text is exactly the source slice its span names
    #[test]
    fn token_text_matches_span(source in sexp_like_string()) {
        for token in tokenize(&source) {
            prop_assert_eq!(&source[token.span.start..token.span.end], token.text);
        }
    }
}

// =============================================================================
// PARSER PROPERTIES
// =============================================================================

proptest! {
    /// The parser returns a tree or an error, never panics, under either policy
    #[test]
    fn parser_never_panics(source in sexp_like_string()) {
        let _ = parse(&source, "fuzz");
        let lenient = ParserConfig::default().with_policy(BalancePolicy::Lenient);
        let _ = parse_with(&source, "fuzz", &lenient);
    }

    /// Parsing then printing canonical text reproduces it exactly
    #[test]
    fn canonical_round_trip(source in canonical_program()) {
        let tree = parse(&source, "roundtrip").unwrap();
        prop_assert_eq!(tree.to_string(), source.as_str());
    }

    /// Replacing single spaces with arbitrary whitespace runs never changes the tree
    #[test]
    fn whitespace_insensitive(source in canonical_program(), gap in whitespace()) {
        // Only spaces outside quoted atoms are separators
        let mut spaced = String::new();
        let mut in_quote = false;
        for c in source.chars() {
            match c {
                '"' => {
                    in_quote = !in_quote;
                    spaced.push(c);
                }
                ' ' if !in_quote => spaced.push_str(&gap),
                _ => spaced.push(c),
            }
        }

        let canonical = parse(&source, "a").unwrap();
        let respaced = parse(&spaced, "b").unwrap();
        prop_assert_eq!(canonical, respaced);
    }

    /// A lenient parse of well-formed text agrees with a strict one
    #[test]
    fn policies_agree_on_balanced_input(source in canonical_program()) {
        let lenient = ParserConfig::default().with_policy(BalancePolicy::Lenient);
        let strict = parse(&source, "s").unwrap();
        let relaxed = parse_with(&source, "l", &lenient).unwrap();
        prop_assert_eq!(strict, relaxed);
    }
}
