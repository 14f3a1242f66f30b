use super::*;
use pretty_assertions::assert_eq;

fn lexeme<'a>(image: &'a str, content: &'a str) -> Lexeme<'a> {
    Lexeme::new(
        image,
        content,
        Span::new(0, image.len()),
        Position::START,
        TokenFlags::empty(),
    )
}

// === Kinds ===

#[test]
fn kind_matches_variant() {
    assert_eq!(Token::new(TokenKind::Fixed, lexeme("a", "a")).kind(), TokenKind::Fixed);
    assert_eq!(
        Token::new(TokenKind::Expression, lexeme("{{a}}", "a")).kind(),
        TokenKind::Expression
    );
    assert_eq!(Token::new(TokenKind::Tag, lexeme("{%a%}", "a")).kind(), TokenKind::Tag);
    assert_eq!(Token::new(TokenKind::Note, lexeme("{#a#}", "a")).kind(), TokenKind::Note);
}

#[test]
fn kind_discriminants_are_stable() {
    assert_eq!(TokenKind::Fixed as u8, 0);
    assert_eq!(TokenKind::Expression as u8, 1);
    assert_eq!(TokenKind::Tag as u8, 2);
    assert_eq!(TokenKind::Note as u8, 3);
}

// === Tag splitting ===

#[test]
fn tag_splits_name_and_helpers() {
    let token = Token::new(TokenKind::Tag, lexeme("{% if x > 1 %}", " if x > 1 "));
    assert_eq!(token.tag_name(), Some("if"));
    assert_eq!(token.helpers(), Some("x > 1"));
}

#[test]
fn tag_without_arguments_has_empty_helpers() {
    let token = Token::new(TokenKind::Tag, lexeme("{%endif%}", "endif"));
    assert_eq!(token.tag_name(), Some("endif"));
    assert_eq!(token.helpers(), Some(""));
}

#[test]
fn tag_name_ignores_whitespace_markers() {
    let token = Token::new(TokenKind::Tag, lexeme("{%- for i in xs -%}", "- for i in xs -"));
    assert_eq!(token.tag_name(), Some("for"));
    assert_eq!(token.helpers(), Some("i in xs"));
}

#[test]
fn tag_split_accepts_any_whitespace() {
    assert_eq!(split_tag("\n  set\tx = 1\n"), ("set", "x = 1"));
    assert_eq!(split_tag("   "), ("", ""));
}

#[test]
fn non_tags_have_no_name() {
    let token = Token::new(TokenKind::Expression, lexeme("{{ if }}", " if "));
    assert_eq!(token.tag_name(), None);
    assert_eq!(token.helpers(), None);
    assert!(token.as_tag().is_none());
}

// === Whitespace markers ===

#[test]
fn markers_are_read_from_both_edges() {
    assert_eq!(
        TokenFlags::from_markers("- x -"),
        (" x ", TokenFlags::TRIM_BEFORE | TokenFlags::TRIM_AFTER)
    );
    assert_eq!(
        TokenFlags::from_markers("+ x +"),
        (" x ", TokenFlags::KEEP_BEFORE | TokenFlags::KEEP_AFTER)
    );
    assert_eq!(TokenFlags::from_markers(" x "), (" x ", TokenFlags::empty()));
}

#[test]
fn lone_marker_is_leading() {
    assert_eq!(TokenFlags::from_markers("-"), ("", TokenFlags::TRIM_BEFORE));
}

// === Envelope ===

#[test]
fn envelope_accessors() {
    let lexeme = Lexeme::new(
        "{{ a }}",
        " a ",
        Span::new(4, 11),
        Position { line: 2, column: 3 },
        TokenFlags::UNTERMINATED,
    );
    let token = Token::new(TokenKind::Expression, lexeme);
    assert_eq!(token.image(), "{{ a }}");
    assert_eq!(token.content(), " a ");
    assert_eq!(token.span(), Span::new(4, 11));
    assert_eq!(token.start_line(), 2);
    assert_eq!(token.start_column(), 3);
    assert!(token.is_unterminated());
    assert_eq!(token.lexeme(), &lexeme);
}

// === Display ===

#[test]
fn display_shows_kind_position_and_content() {
    let token = Token::new(TokenKind::Tag, lexeme("{% if x %}", " if x "));
    assert_eq!(token.to_string(), "tag@1:0 \" if x \"");
}

#[test]
fn display_truncates_long_content() {
    let body = "x".repeat(40);
    let image = format!("{{{{{body}}}}}");
    let token = Token::new(TokenKind::Expression, lexeme(&image, &body));
    assert_eq!(token.to_string(), format!("expression@1:0 {:?}...", "x".repeat(32)));
}
