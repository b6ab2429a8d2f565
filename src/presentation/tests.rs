use super::*;
use crate::engine::Spelled;
use crate::error::Error;
use pretty_assertions::assert_eq;

fn lhs(line: &str) -> String {
    Spelled(&parse_line(line).unwrap().left).to_string()
}

fn sides(line: &str) -> (String, String) {
    let relation = parse_line(line).unwrap();
    (Spelled(&relation.left).to_string(), Spelled(&relation.right).to_string())
}

fn parse_error_at(line: &str) -> (usize, &'static str) {
    match parse_line(line) {
        Err(Error::Parse { position, message, .. }) => (position, message),
        other => panic!("expected a parse error for {line:?}, got {other:?}"),
    }
}

#[test]
fn single_generators() {
    assert_eq!(lhs("S"), "S");
    assert_eq!(lhs("S'"), "S'");
}

#[test]
fn powers() {
    assert_eq!(lhs("a^3"), "aaa");
    assert_eq!(lhs("a^-2"), "a'a'");
    assert_eq!(lhs("a'^-1"), "a");
}

#[test]
fn adjacent_inverses_cancel() {
    // `Spelled` prints the empty word as the identity.
    assert_eq!(lhs("SS'"), "1");
    assert_eq!(lhs("PQ'RR'QT"), "PT");
}

#[test]
fn products() {
    assert_eq!(lhs("abc"), "abc");
    assert_eq!(lhs("p^2q^2r^2"), "ppqqrr");
    assert_eq!(lhs("p^3p'^2"), "p");
}

#[test]
fn parentheses() {
    assert_eq!(lhs("(a)"), "a");
    assert_eq!(lhs("(aba')^4"), "abbbba'");
    assert_eq!(lhs("(ab)(ba)^-1"), "aba'b'");
    assert_eq!(lhs("(AB)(AB)^-1"), "1");
}

#[test]
fn right_hand_sides() {
    assert_eq!(sides("ST=R"), ("ST".to_string(), "R".to_string()));
    assert_eq!(sides("((AB))=(AB)"), ("AB".to_string(), "AB".to_string()));
    assert_eq!(sides("ab=1"), ("ab".to_string(), "1".to_string()));
    assert_eq!(sides("xyz"), ("xyz".to_string(), "1".to_string()));
    assert!(parse_line("ab=1").unwrap().right.is_empty());
}

#[test]
fn zero_exponent_is_rejected() {
    match parse_line("b^0") {
        Err(Error::ZeroExponent { position, .. }) => assert_eq!(position, 1),
        other => panic!("expected a zero exponent error, got {other:?}"),
    }
    assert!(matches!(parse_line("(ab)^-0"), Err(Error::ZeroExponent { .. })));
}

#[test]
fn syntax_errors_report_position() {
    assert_eq!(parse_error_at("p^q"), (2, "number expected"));
    assert_eq!(parse_error_at("p^-"), (3, "number expected"));
    assert_eq!(parse_error_at("((ab)=1"), (5, "')' expected"));
    assert_eq!(parse_error_at("ST = 1"), (2, "letter expected"));
    assert_eq!(parse_error_at("= ST"), (0, "start of expression expected"));
    assert_eq!(parse_error_at("ab=1c"), (4, "premature end of line"));
    assert_eq!(parse_error_at("a)"), (1, "premature end of line"));
    assert_eq!(parse_error_at(""), (0, "start of expression expected"));
    assert_eq!(parse_error_at("a^99999999999999999999"), (2, "exponent out of range"));
    assert_eq!(parse_error_at("a^-99999999999999999999"), (2, "exponent out of range"));
    // Offsets count bytes, so a two-byte letter shifts them by two.
    assert_eq!(parse_error_at("äb^q"), (4, "number expected"));
}

#[test]
fn presentations_skip_blank_and_comment_lines() {
    let text = "# S3\nRRR\n\nSS\n   \n# rotation-reflection\nRSRS=1\n";
    let relations = parse_presentation(text).unwrap();
    let left: Vec<_> = relations.iter().map(|r| Spelled(&r.left).to_string()).collect();
    assert_eq!(left, vec!["RRR", "SS", "RSRS"]);
}

#[test]
fn presentation_errors_stop_at_the_first_bad_line() {
    let err = parse_presentation("RRR\nS^x\nSS").unwrap_err();
    match err {
        Error::Parse { line, .. } => assert_eq!(line, "S^x"),
        other => panic!("unexpected error: {other}"),
    }
}
