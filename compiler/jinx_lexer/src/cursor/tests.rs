use super::*;

// === Absolute Reads ===

#[test]
fn byte_at_reads_zero_past_eof() {
    let cursor = Cursor::new("ab");
    assert_eq!(cursor.byte_at(1), b'b');
    assert_eq!(cursor.byte_at(2), 0);
    assert_eq!(cursor.byte_at(99), 0);
}

#[test]
fn interior_nul_is_a_byte() {
    let cursor = Cursor::new("\0a");
    assert_eq!(cursor.byte_at(0), 0);
    assert_eq!(cursor.source_len(), 2);
}

#[test]
fn char_at_reads_absolute_offsets() {
    let cursor = Cursor::new("aé");
    assert_eq!(cursor.char_at(1), Some('é'));
    assert_eq!(cursor.char_at(3), None);
}

// === Movement ===

#[test]
fn advance_to_moves_forward() {
    let mut cursor = Cursor::new("λ😀x");
    cursor.advance_to(2);
    assert_eq!(cursor.pos(), 2);
    assert_eq!(cursor.rest(), "😀x");
    cursor.advance_to(6);
    assert_eq!(cursor.rest(), "x");
}

#[test]
fn empty_source_has_empty_rest() {
    let cursor = Cursor::new("");
    assert_eq!(cursor.rest(), "");
    assert_eq!(cursor.char_at(0), None);
}

// === Matching ===

#[test]
fn matches_at_absolute_offsets() {
    let cursor = Cursor::new("ab{{cd");
    assert!(!cursor.matches_at(0, "{{"));
    assert!(cursor.matches_at(2, "{{"));
    assert!(!cursor.matches_at(5, "{{"));
    assert!(!cursor.matches_at(99, "{{"));
}

#[test]
fn slices_borrow_from_source() {
    let mut cursor = Cursor::new("hello world");
    cursor.advance_to(5);
    assert_eq!(cursor.slice(0, 5), "hello");
    assert_eq!(cursor.slice(6, 11), "world");
    assert_eq!(cursor.rest(), " world");
}

// === Searching ===

#[test]
fn find_from_locates_needle() {
    let cursor = Cursor::new("{#a#}b#}");
    assert_eq!(cursor.find_from(2, "#}"), Some(3));
    assert_eq!(cursor.find_from(5, "#}"), Some(6));
    assert_eq!(cursor.find_from(8, "#}"), None);
}

#[test]
fn find_any_from_uses_earliest_hit() {
    let cursor = Cursor::new("xx%yy{zz#");
    assert_eq!(cursor.find_any_from(0, b"{"), Some(5));
    assert_eq!(cursor.find_any_from(0, b"{#"), Some(5));
    assert_eq!(cursor.find_any_from(0, b"#{%"), Some(2));
    assert_eq!(cursor.find_any_from(6, b"{%"), None);
}

#[test]
fn find_any_from_past_eof() {
    let cursor = Cursor::new("{");
    assert_eq!(cursor.find_any_from(1, b"{"), None);
    assert_eq!(cursor.find_any_from(5, b"{"), None);
}

#[test]
fn scan_while_does_not_move() {
    let cursor = Cursor::new("   x");
    assert_eq!(cursor.scan_while(|b| b == b' '), 3);
    assert_eq!(cursor.pos(), 0);
}

#[test]
fn scan_while_stops_at_eof() {
    let cursor = Cursor::new("aaa");
    assert_eq!(cursor.scan_while(|b| b == b'a'), 3);
}
