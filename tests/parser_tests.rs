// tests/parser_tests.rs

use tagfilter::ast::{BinOp, Expr, ExprKind, LogicOp, Span, TagIndex, TagKey, Value};
use tagfilter::lexer::{LexError, Lexer};
use tagfilter::parser::{ParseError, Parser};

fn parse(input: &str) -> Result<Expr, ParseError> {
    Parser::new(Lexer::new(input))?.parse()
}

fn parse_ok(input: &str) -> Expr {
    match parse(input) {
        Ok(expr) => expr,
        Err(e) => panic!("Failed to parse {:?}: {}", input, e),
    }
}

fn parse_err(input: &str) -> ParseError {
    match parse(input) {
        Err(e) => e,
        Ok(expr) => panic!("Expected parse error for {:?}, got {:?}", input, expr),
    }
}

fn tag(name: &str) -> Value {
    Value::TagKey(TagKey::new(name, TagIndex::Unset))
}

/// Tree shape with spans left out, e.g. `(a && b) || !(c)`.
fn shape(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Not(inner) => format!("!({})", shape(inner)),
        ExprKind::Logical { op, left, right } => {
            format!("({} {} {})", shape(left), op, shape(right))
        }
        ExprKind::Comparison { op, left, right } => {
            format!("{}{}{}", left.value, op, right.value)
        }
    }
}

// ============================================================================
// Simple Conditions
// ============================================================================

#[test]
fn test_simple_comparison() {
    let expr = parse_ok("%year == 2000");
    assert_eq!(expr.span, Span::new(0, 13));

    match expr.kind {
        ExprKind::Comparison { op, left, right } => {
            assert_eq!(op, BinOp::Equal);
            assert_eq!(left.value, tag("year"));
            assert_eq!(left.span, Span::new(0, 5));
            assert_eq!(right.value, Value::Integer(2000));
            assert_eq!(right.span, Span::new(9, 13));
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_all_operators() {
    let test_cases = vec![
        ("%a == 1", BinOp::Equal),
        ("%a != 1", BinOp::NotEqual),
        ("%a < 1", BinOp::LessThan),
        ("%a <= 1", BinOp::LessEqual),
        ("%a > 1", BinOp::GreaterThan),
        ("%a >= 1", BinOp::GreaterEqual),
        ("%a =~ /1/", BinOp::Match),
        ("%a !~ /1/", BinOp::NotMatch),
    ];

    for (input, expected) in test_cases {
        match parse_ok(input).kind {
            ExprKind::Comparison { op, .. } => assert_eq!(op, expected, "Failed for input: {}", input),
            other => panic!("Expected comparison for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_dynamic_side_may_be_anywhere() {
    let test_cases = vec![
        "2000 <= %year",
        "\"x\" == filename",
        "backend == \"id3v2\"",
        "%artist == %albumartist",
        "/^a/i =~ %artist",
        "filename !~ /\\.mp3$/",
        "%{musicbrainz id} == undef",
        "undef != %{artist=0}",
    ];

    for input in test_cases {
        parse_ok(input);
    }
}

#[test]
fn test_sides_keep_written_order() {
    match parse_ok("1 < %track").kind {
        ExprKind::Comparison { op, left, right } => {
            assert_eq!(op, BinOp::LessThan);
            assert_eq!(left.value, Value::Integer(1));
            assert_eq!(right.value, tag("track"));
        }
        other => panic!("Expected comparison, got {:?}", other),
    }
}

// ============================================================================
// Precedence and Grouping
// ============================================================================

#[test]
fn test_precedence_and_associativity() {
    let test_cases = vec![
        ("%a == 1 && %b == 2 || %c == 3", "((%a==1 && %b==2) || %c==3)"),
        ("%a == 1 || %b == 2 && %c == 3", "(%a==1 || (%b==2 && %c==3))"),
        ("%a == 1 || %b == 2 || %c == 3", "((%a==1 || %b==2) || %c==3)"),
        ("%a == 1 && %b == 2 && %c == 3", "((%a==1 && %b==2) && %c==3)"),
        ("%a == 1 && (%b == 2 || %c == 3)", "(%a==1 && (%b==2 || %c==3))"),
        ("!(%a == 1) && %b == 2", "(!(%a==1) && %b==2)"),
        ("!(%a == 1 || %b == 2)", "!((%a==1 || %b==2))"),
        ("((%a == 1))", "%a==1"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(shape(&parse_ok(input)), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_spans_cover_children_and_parens() {
    let expr = parse_ok("(%a == 1) && !(%b == 2)");
    assert_eq!(expr.span, Span::new(0, 23));

    let ExprKind::Logical { left, right, .. } = expr.kind else {
        panic!("Expected logical node");
    };
    assert_eq!(left.span, Span::new(0, 9));
    assert_eq!(right.span, Span::new(13, 23));

    let ExprKind::Not(inner) = right.kind else {
        panic!("Expected not node");
    };
    assert_eq!(inner.span, Span::new(14, 23));
}

#[test]
fn test_not_requires_group() {
    let err = parse_err("!%genre == \"rock\"");
    assert!(matches!(err, ParseError::NotWithoutGroup { .. }), "Got {:?}", err);
    assert_eq!(err.span(), Span::new(0, 7));

    parse_ok("!(%genre == \"rock\")");
    assert!(matches!(parse_err("!!(%a == 1)"), ParseError::NotWithoutGroup { .. }));
}

// ============================================================================
// Semantic Checks
// ============================================================================

#[test]
fn test_constant_comparisons_rejected() {
    let test_cases = vec!["\"abc\" == \"abc\"", "1 < 2", "1.5 != \"x\"", "undef == 1"];

    for input in test_cases {
        let err = parse_err(input);
        assert!(
            matches!(err, ParseError::ConstantComparison { .. }),
            "Failed for input: {}: {:?}",
            input,
            err
        );
    }

    assert_eq!(parse_err("\"abc\" == \"abc\"").span(), Span::new(0, 14));
}

#[test]
fn test_regex_placement() {
    let test_cases = vec![
        ("/foo/i =~ /bar/", "two regexes"),
        ("%a =~ \"foo\"", "no regex"),
        ("%a !~ %b", "no regex"),
    ];

    for (input, why) in test_cases {
        let err = parse_err(input);
        assert!(
            matches!(err, ParseError::RegexOperands { .. }),
            "Failed for input: {} ({}): {:?}",
            input,
            why,
            err
        );
    }

    let err = parse_err("%a == /foo/");
    assert!(matches!(err, ParseError::RegexWithoutMatch { op: BinOp::Equal, .. }));
    assert!(matches!(parse_err("/x/ < %a"), ParseError::RegexWithoutMatch { .. }));

    parse_ok("%title =~ /foo/i");
}

#[test]
fn test_undef_only_against_tag_keys() {
    let test_cases = vec!["undef == filename", "backend != undef"];

    for input in test_cases {
        let err = parse_err(input);
        assert!(
            matches!(err, ParseError::MisplacedUndef { .. }),
            "Failed for input: {}: {:?}",
            input,
            err
        );
    }
}

// ============================================================================
// Grammar Errors
// ============================================================================

#[test]
fn test_grammar_errors() {
    let test_cases = vec![
        ("", Span::new(0, 0)),
        ("%a == 1 &&", Span::new(10, 10)),
        ("%a == 1 %b == 2", Span::new(8, 10)),
        ("%a 1", Span::new(3, 4)),
        ("%a ==", Span::new(5, 5)),
        ("&& %a == 1", Span::new(0, 2)),
        ("%a == 1)", Span::new(7, 8)),
        ("()", Span::new(1, 2)),
    ];

    for (input, span) in test_cases {
        let err = parse_err(input);
        assert!(
            matches!(err, ParseError::Unexpected { .. }),
            "Failed for input: {:?}: {:?}",
            input,
            err
        );
        assert_eq!(err.span(), span, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_unclosed_group() {
    let err = parse_err("(%a == 1 || %b == 2");
    assert!(matches!(err, ParseError::UnclosedGroup { found: "end of filter", .. }));
    assert_eq!(err.span(), Span::new(0, 19));
}

#[test]
fn test_lex_errors_pass_through() {
    let err = parse_err("%a == \"abc");
    assert!(matches!(
        &err,
        ParseError::Lex(LexError::Unterminated { delimiter: '"', .. })
    ));
    assert_eq!(err.span(), Span::new(6, 10));
    assert!(err.render("%a == \"abc").starts_with("lexer error: "));
}

#[test]
fn test_error_messages() {
    let err = parse_err("%a ==");
    assert_eq!(err.to_string(), "expected a value, got end of filter");

    let err = parse_err("1 == 1");
    assert_eq!(err.to_string(), "constant comparison: `1 == 1`");

    let source = "%a == 1 || \"x\" < \"y\"";
    let expected = format!(
        "parser error: constant comparison: `\"x\" < \"y\"`\n{}\n{}^{}",
        source,
        " ".repeat(11),
        "~".repeat(8)
    );
    assert_eq!(parse_err(source).render(source), expected);
}

// ============================================================================
// Canonical Display
// ============================================================================

#[test]
fn test_display_parses_back_to_same_shape() {
    let test_cases = vec![
        "%a==1&&%b==2||%c==3",
        "%a == 1 && (%b == 2 || %c == 3)",
        "(%a == 1 || %b == 2) || %c == 3",
        "%a == 1 || (%b == 2 || %c == 3)",
        "%a == 1 && (%b == 2 && %c == 3)",
        "!((%a == 1) && !(%b =~ /x\\/y/im))",
        "%{album artist=*&} != \"Various\"",
        "%{x\\=y=2} < 2.5",
        "undef == %{genre=0}",
    ];

    for input in test_cases {
        let expr = parse_ok(input);
        let canonical = expr.to_string();
        let reparsed = parse_ok(&canonical);
        assert_eq!(shape(&reparsed), shape(&expr), "Failed for input: {}", input);
        assert_eq!(reparsed.to_string(), canonical, "Failed for input: {}", input);
    }
}

#[test]
fn test_display_drops_redundant_parens() {
    assert_eq!(
        parse_ok("((%a == 1) && (%b == 2)) || (%c == 3)").to_string(),
        "%a == 1 && %b == 2 || %c == 3"
    );
    assert_eq!(
        parse_ok("%a == 1 && (%b == 2 || %c == 3)").to_string(),
        "%a == 1 && (%b == 2 || %c == 3)"
    );
}

#[test]
fn test_logic_op_display() {
    assert_eq!(LogicOp::And.to_string(), "&&");
    assert_eq!(LogicOp::Or.to_string(), "||");
}
