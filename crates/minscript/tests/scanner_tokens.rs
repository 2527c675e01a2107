use minscript::{tokenize, Arena, Limits, TokenKind};

fn arena() -> Arena {
    Arena::new(64 * 1024)
}

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut arena = arena();
    tokenize(source, &mut arena, &Limits::default())
        .expect("tokenize")
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn statement_kinds() {
    assert_eq!(
        kinds("var x = 1;"),
        vec![
            TokenKind::Var,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Number,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_are_recognized() {
    assert_eq!(
        kinds("var function if else for while return"),
        vec![
            TokenKind::Var,
            TokenKind::Function,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keyword_prefix_is_an_identifier() {
    assert_eq!(kinds("variable"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(kinds("_if"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn two_char_operators_are_greedy() {
    assert_eq!(
        kinds("== != <= >= && ||"),
        vec![
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::LessEq,
            TokenKind::GreaterEq,
            TokenKind::AndAnd,
            TokenKind::OrOr,
            TokenKind::Eof,
        ]
    );
    // Separated characters stay single tokens.
    assert_eq!(
        kinds("= ="),
        vec![TokenKind::Assign, TokenKind::Assign, TokenKind::Eof]
    );
}

#[test]
fn unknown_bytes_become_unknown_tokens() {
    assert_eq!(
        kinds("@ $"),
        vec![TokenKind::Unknown, TokenKind::Unknown, TokenKind::Eof]
    );
}

#[test]
fn number_values() {
    let mut arena = arena();
    let tokens = tokenize("10 3.25 0.5", &mut arena, &Limits::default()).expect("tokenize");
    let numbers: Vec<f64> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.number.expect("number payload"))
        .collect();
    assert_eq!(numbers, vec![10.0, 3.25, 0.5]);
}

#[test]
fn second_decimal_point_ends_the_number() {
    assert_eq!(
        kinds("1.2.3"),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Number, TokenKind::Eof]
    );
}

#[test]
fn string_quotes_match() {
    let mut arena = arena();
    let tokens = tokenize("\"it's\" 'he said \"hi\"'", &mut arena, &Limits::default()).expect("tokenize");
    let texts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Str)
        .map(|t| arena.get_str(t.text.expect("text payload")))
        .collect();
    assert_eq!(texts, vec!["it's", "he said \"hi\""]);
}

#[test]
fn strings_have_no_escape_processing() {
    let mut arena = arena();
    let tokens = tokenize(r#""a\nb""#, &mut arena, &Limits::default()).expect("tokenize");
    assert_eq!(arena.get_str(tokens[0].text.expect("text")), "a\\nb");
}

#[test]
fn unterminated_string_runs_to_eof() {
    let mut arena = arena();
    let tokens = tokenize("\"open", &mut arena, &Limits::default()).expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(arena.get_str(tokens[0].text.expect("text")), "open");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn comments_run_to_end_of_line() {
    assert_eq!(
        kinds("1 // comment ; var\n2"),
        vec![TokenKind::Number, TokenKind::Number, TokenKind::Eof]
    );
    // A comment on the last line has no terminating line feed.
    assert_eq!(kinds("// only"), vec![TokenKind::Eof]);
}

#[test]
fn line_and_column_are_one_based() {
    let mut arena = arena();
    let tokens = tokenize("a\n  b", &mut arena, &Limits::default()).expect("tokenize");
    assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (2, 3));
    // EOF carries the position past the end.
    assert_eq!((tokens[2].line, tokens[2].column), (2, 4));
}

#[test]
fn line_feed_resets_the_column() {
    let mut arena = arena();
    let tokens = tokenize("ab cd\nef", &mut arena, &Limits::default()).expect("tokenize");
    assert_eq!((tokens[1].line, tokens[1].column), (1, 4));
    assert_eq!((tokens[2].line, tokens[2].column), (2, 1));
}

#[test]
fn identifier_text_is_deduplicated() {
    let mut arena = arena();
    let tokens = tokenize("x y x", &mut arena, &Limits::default()).expect("tokenize");
    assert_eq!(tokens[0].text, tokens[2].text);
    assert_ne!(tokens[0].text, tokens[1].text);
}

#[test]
fn tokens_beyond_the_bound_are_dropped() {
    let mut arena = arena();
    let limits = Limits::new().max_tokens(5);
    let tokens = tokenize("1 2 3 4 5 6 7 8", &mut arena, &limits).expect("tokenize");
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}

#[test]
fn final_token_is_always_eof() {
    for source in ["", "1 + 2", "\"open", "@@@", "var x = 1;"] {
        let mut arena = arena();
        let tokens = tokenize(source, &mut arena, &Limits::default()).expect("tokenize");
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof), "{source:?}");
        let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eof_count, 1, "{source:?}");
    }
}
