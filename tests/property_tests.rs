//! Property-based tests for the lexer and parser.
//!
//! Generated token soups must lex back into exactly the tokens they were built
//! from, and any input that lexes at all must be rebuildable from its tokens
//! plus the whitespace between them.

use plc::parser::lexer::tokenize;
use plc::parser::parse::parse;
use plc::parser::parse_program;
use plc::parser::token::Token;
use proptest::prelude::*;

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\u{8}' | '\n' | '\r' | '\t')
}

/// Rebuild `source` from its tokens, or `None` if a gap holds anything but
/// whitespace or a token's text is not what the source holds at its offset.
fn rebuild(source: &str, tokens: &[Token]) -> Option<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::new();
    let mut cursor = 0;

    for token in tokens {
        let gap = chars.get(cursor..token.offset)?;
        if !gap.iter().all(|&c| is_whitespace(c)) {
            return None;
        }
        let matched: String = chars.get(token.offset..token.end())?.iter().collect();
        if matched != token.text {
            return None;
        }
        out.extend(gap);
        out.push_str(&token.text);
        cursor = token.end();
    }

    out.extend(chars.get(cursor..)?);
    Some(out)
}

fn token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z@][A-Za-z0-9_-]{0,6}",
        "-?[1-9][0-9]{0,8}",
        Just("0".to_string()),
        "-?([1-9][0-9]{0,3}|0)\\.[0-9]{1,4}",
        "'[a-z0-9 ]'",
        r#"'\\[bnrt'"\\]'"#,
        r#""([a-z ]|\\[nt"\\]){0,6}""#,
        prop::sample::select(vec![
            "<=", ">=", "==", "!=", "&&", "||", "<", ">", "=", "+", "-", "*", "/", "^", "(",
            ")", "[", "]", ",", ";", ":", ".",
        ])
        .prop_map(str::to_string),
    ]
}

fn separator() -> impl Strategy<Value = String> {
    "[ \t\r\n]{1,3}"
}

fn token_soup() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        "[ \n]{0,2}",
        prop::collection::vec((token_text(), separator()), 0..24),
    )
        .prop_map(|(leading, parts)| {
            let mut source = leading;
            let mut texts = Vec::new();
            for (text, sep) in parts {
                source.push_str(&text);
                source.push_str(&sep);
                texts.push(text);
            }
            (source, texts)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_token_soup_lexes_to_its_parts((source, texts) in token_soup()) {
        let tokens = tokenize(&source).expect("generated soup should lex");
        let lexed: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        prop_assert_eq!(lexed, texts.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(rebuild(&source, &tokens), Some(source.clone()));
    }

    #[test]
    fn prop_any_lexed_input_round_trips(source in "\\PC{0,48}") {
        if let Ok(tokens) = tokenize(&source) {
            prop_assert!(tokens.iter().all(|t| !t.is_empty()));
            prop_assert_eq!(rebuild(&source, &tokens), Some(source.clone()));
        }
    }

    #[test]
    fn prop_parsing_is_deterministic((source, _) in token_soup()) {
        let first = parse_program(&source);
        let second = parse_program(&source);
        prop_assert_eq!(&first, &second);

        let tokens = tokenize(&source).expect("generated soup should lex");
        prop_assert_eq!(parse(tokens).map_err(plc::parser::Error::from), first);
    }
}
