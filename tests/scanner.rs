#[cfg(test)]
mod scanner_tests {
    use treelox::scanner::Scanner;
    use treelox::token::{Token, TokenType};

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<Token> = scanner.filter_map(Result::ok).collect();

        assert_eq!(
            tokens.len(),
            expected.len(),
            "token count mismatch for {:?}: {:?}",
            source,
            tokens
        );

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn single_character_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn one_and_two_character_operators() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_token_sequence(
            "+ // the rest is ignored ;;;\n- // and this\n",
            &[
                (TokenType::PLUS, "+"),
                (TokenType::MINUS, "-"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn slash_alone_is_a_token() {
        assert_token_sequence(
            "1 / 2",
            &[
                (TokenType::NUMBER(1.0), "1"),
                (TokenType::SLASH, "/"),
                (TokenType::NUMBER(2.0), "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn string_literal_value_excludes_quotes() {
        let tokens: Vec<Token> = Scanner::new(br#""hello world""#)
            .filter_map(Result::ok)
            .collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");

        match &tokens[0].token_type {
            TokenType::STRING(literal) => assert_eq!(literal, "hello world"),
            other => panic!("expected STRING, got {:?}", other),
        }
    }

    #[test]
    fn multiline_string_advances_line_counter() {
        let tokens: Vec<Token> = Scanner::new(b"\"a\nb\"\n+")
            .filter_map(Result::ok)
            .collect();

        // The token carries the line the string closed on.
        assert_eq!(tokens[0].line, 2);
        // The `+` sits after both the embedded and the trailing newline.
        assert_eq!(tokens[1].token_type, TokenType::PLUS);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn number_literals() {
        let tokens: Vec<Token> = Scanner::new(b"123 45.67")
            .filter_map(Result::ok)
            .collect();

        match tokens[0].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 123.0),
            ref other => panic!("expected NUMBER, got {:?}", other),
        }

        match tokens[1].token_type {
            TokenType::NUMBER(n) => assert_eq!(n, 45.67),
            ref other => panic!("expected NUMBER, got {:?}", other),
        }
    }

    #[test]
    fn trailing_dot_is_not_part_of_the_number() {
        assert_token_sequence(
            "123.",
            &[
                (TokenType::NUMBER(123.0), "123"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_token_sequence(
            "class whilex var _bar orchid or",
            &[
                (TokenType::CLASS, "class"),
                (TokenType::IDENTIFIER, "whilex"),
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "_bar"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn unexpected_characters_do_not_stop_the_scan() {
        let results: Vec<_> = Scanner::new(b",.$(#").collect();

        // COMMA, DOT, error for '$', LEFT_PAREN, error for '#', EOF.
        assert_eq!(results.len(), 6);

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err().map(|e| e.to_string()))
            .collect();

        assert_eq!(errors.len(), 2);
        for message in &errors {
            assert!(
                message.contains("Unexpected character"),
                "unexpected message: {}",
                message
            );
        }

        let tokens: Vec<&Token> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        assert_eq!(tokens[0].token_type, TokenType::COMMA);
        assert_eq!(tokens[1].token_type, TokenType::DOT);
        assert_eq!(tokens[2].token_type, TokenType::LEFT_PAREN);
        assert_eq!(tokens[3].token_type, TokenType::EOF);
    }

    #[test]
    fn unterminated_string_reports_opening_line() {
        let results: Vec<_> = Scanner::new(b"+\n\"abc\ndef").collect();

        let error = results
            .iter()
            .find_map(|r| r.as_ref().err())
            .expect("expected a lexical error");

        assert_eq!(error.to_string(), "[line 2] Error: Unterminated string.");
    }

    #[test]
    fn empty_source_yields_only_eof() {
        let tokens: Vec<Token> = Scanner::new(b"").filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_type, TokenType::EOF);
        assert_eq!(tokens[0].line, 1);
    }

    #[test]
    fn scan_tokens_separates_tokens_from_errors() {
        let (tokens, errors) = Scanner::new(b"var x = @ 1;").scan_tokens();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            tokens
                .iter()
                .map(|t| t.lexeme.as_str())
                .collect::<Vec<_>>(),
            vec!["var", "x", "=", "1", ";", ""],
        );
    }
}
