//! Edge case tests for linterna-lex

#[cfg(test)]
mod tests {
    use crate::{tokenize, TokenKind};

    fn non_eof(source: &str) -> Vec<crate::Token> {
        let (tokens, _) = tokenize(source);
        tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .collect()
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        let (tokens, handler) = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_edge_exactly_one_eof() {
        for source in ["", "x", "let a = 1;", "\"unterminated", "@#"] {
            let (tokens, _) = tokenize(source);
            let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            assert_eq!(eofs, 1, "source {source:?}");
            assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let tokens = non_eof(&name);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text(), name);
    }

    #[test]
    fn test_edge_comment_only_source() {
        let (tokens, handler) = tokenize("// one\n/* two */");
        assert!(!handler.has_errors());
        let non_comment = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Comment && t.kind != TokenKind::Eof)
            .count();
        assert_eq!(non_comment, 0);
    }

    #[test]
    fn test_edge_token_count_scenario() {
        // const PI = 3.14; -> 5 tokens excluding EOF
        let tokens = non_eof("const PI = 3.14;");
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_edge_windows_line_endings() {
        let (tokens, _) = tokenize("a\r\nb");
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[1].column, 1);
    }

    #[test]
    fn test_edge_string_then_comment() {
        let tokens = non_eof("\"// not a comment\" // real");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[1].kind, TokenKind::Comment);
    }

    #[test]
    fn test_edge_slash_is_division() {
        let tokens = non_eof("a / b");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
        assert_eq!(tokens[1].text(), "/");
    }

    #[test]
    fn test_edge_invalid_then_recovers() {
        let (tokens, handler) = tokenize("let # x = § 1;");
        assert_eq!(handler.error_count(), 2);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Invalid));
        assert!(kinds.contains(&TokenKind::Number));
    }

    #[test]
    fn test_edge_offsets_monotone_on_mixed_input() {
        let (tokens, _) = tokenize("let x = `t ${a}` + 'y'; // done");
        for pair in tokens.windows(2) {
            assert!(pair[1].start >= pair[0].end);
        }
    }

    // ==================== PROPERTIES ====================

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // P1: the lexer terminates and ends with exactly one EOF for
            // any input.
            #[test]
            fn prop_progress(source in ".{0,200}") {
                let (tokens, _) = tokenize(&source);
                prop_assert!(!tokens.is_empty());
                prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
                let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
                prop_assert_eq!(eofs, 1);
            }

            // P2: positions are monotone over consecutive tokens.
            #[test]
            fn prop_position_monotonicity(source in "[ -~\n]{0,200}") {
                let (tokens, _) = tokenize(&source);
                for pair in tokens.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    if b.kind != TokenKind::Eof {
                        prop_assert!((b.line, b.column) >= (a.line, a.column));
                    }
                    prop_assert!(b.start >= a.end);
                }
            }
        }
    }
}
