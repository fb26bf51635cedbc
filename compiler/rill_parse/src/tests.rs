use pretty_assertions::assert_eq;
use proptest::prelude::*;

use rill_diagnostic::DiagnosticQueue;
use rill_ir::{Expr, Literal, Stmt, TokenKind};
use rill_lexer::lex;

use crate::parse;

fn parse_source(source: &str) -> (Vec<Stmt>, DiagnosticQueue) {
    let mut queue = DiagnosticQueue::new();
    let tokens = lex(source, &mut queue);
    let statements = parse(&tokens, &mut queue);
    (statements, queue)
}

fn parse_clean(source: &str) -> Vec<Stmt> {
    let (statements, queue) = parse_source(source);
    assert!(
        !queue.has_errors(),
        "unexpected parse errors in {source:?}: {:?}",
        queue.iter().collect::<Vec<_>>()
    );
    statements
}

fn first_expr(source: &str) -> Expr {
    match parse_clean(source).into_iter().next() {
        Some(Stmt::Expression(expr)) => expr,
        other => panic!("expected a single expression statement, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = first_expr("1 + 2 * 3;");
    let Expr::Binary { left, operator, right } = expr else {
        panic!("expected binary at top");
    };
    assert_eq!(operator.kind, TokenKind::Plus);
    assert_eq!(*left, Expr::Literal(Literal::Number(1.0)));
    assert!(matches!(
        *right,
        Expr::Binary { ref operator, .. } if operator.kind == TokenKind::Star
    ));
}

#[test]
fn subtraction_is_left_associative() {
    // (2 - 3) - 4
    let expr = first_expr("2 - 3 - 4;");
    let Expr::Binary { left, operator, right } = expr else {
        panic!("expected binary at top");
    };
    assert_eq!(operator.kind, TokenKind::Minus);
    assert_eq!(*right, Expr::Literal(Literal::Number(4.0)));
    assert!(matches!(
        *left,
        Expr::Binary { ref operator, .. } if operator.kind == TokenKind::Minus
    ));
}

#[test]
fn comparison_binds_tighter_than_equality() {
    let expr = first_expr("1 < 2 == true;");
    let Expr::Binary { left, operator, .. } = expr else {
        panic!("expected binary at top");
    };
    assert_eq!(operator.kind, TokenKind::EqEq);
    assert!(matches!(
        *left,
        Expr::Binary { ref operator, .. } if operator.kind == TokenKind::Lt
    ));
}

#[test]
fn and_binds_tighter_than_or() {
    let expr = first_expr("a or b and c;");
    let Expr::Logical { operator, right, .. } = expr else {
        panic!("expected logical at top");
    };
    assert_eq!(operator.kind, TokenKind::Or);
    assert!(matches!(
        *right,
        Expr::Logical { ref operator, .. } if operator.kind == TokenKind::And
    ));
}

#[test]
fn unary_nests_right() {
    let expr = first_expr("!!x;");
    let Expr::Unary { operator, operand } = expr else {
        panic!("expected unary at top");
    };
    assert_eq!(operator.kind, TokenKind::Bang);
    assert!(matches!(*operand, Expr::Unary { .. }));
}

#[test]
fn assignment_is_right_associative() {
    let expr = first_expr("a = b = 1;");
    let Expr::Assign { name, value } = expr else {
        panic!("expected assignment at top");
    };
    assert_eq!(name.lexeme, "a");
    assert!(matches!(*value, Expr::Assign { .. }));
}

#[test]
fn chained_calls_nest_left_to_right() {
    let expr = first_expr("f(1)(2);");
    let Expr::Call { callee, arguments, .. } = expr else {
        panic!("expected call at top");
    };
    assert_eq!(arguments, vec![Expr::Literal(Literal::Number(2.0))]);
    assert!(matches!(*callee, Expr::Call { .. }));
}

#[test]
fn var_declaration_without_initializer() {
    let statements = parse_clean("var x;");
    let Stmt::Var { name, initializer } = &statements[0] else {
        panic!("expected var declaration");
    };
    assert_eq!(name.lexeme, "x");
    assert_eq!(*initializer, None);
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let statements = parse_clean("if (a) if (b) print 1; else print 2;");
    let Stmt::If { else_branch, then_branch, .. } = &statements[0] else {
        panic!("expected if at top");
    };
    assert!(else_branch.is_none());
    assert!(matches!(
        **then_branch,
        Stmt::If { else_branch: Some(_), .. }
    ));
}

#[test]
fn function_declaration_shape() {
    let statements = parse_clean("fun add(a, b) { return a + b; }");
    let Stmt::Function(decl) = &statements[0] else {
        panic!("expected function declaration");
    };
    assert_eq!(decl.name.lexeme, "add");
    assert_eq!(decl.params.len(), 2);
    assert_eq!(decl.params[0].lexeme, "a");
    assert!(matches!(decl.body[0], Stmt::Return { .. }));
}

#[test]
fn return_without_value() {
    let statements = parse_clean("fun f() { return; }");
    let Stmt::Function(decl) = &statements[0] else {
        panic!("expected function declaration");
    };
    assert!(matches!(decl.body[0], Stmt::Return { value: None, .. }));
}

#[test]
fn for_desugars_to_while_in_block() {
    // Same line so token lines match across the two spellings.
    let sugared = parse_clean("for (var i = 0; i < 3; i = i + 1) print i;");
    let explicit =
        parse_clean("{ var i = 0; while (i < 3) { print i; i = i + 1; } }");
    assert_eq!(sugared, explicit);
}

#[test]
fn for_with_empty_clauses_loops_forever() {
    let statements = parse_clean("for (;;) print 1;");
    let Stmt::While { condition, body } = &statements[0] else {
        panic!("expected bare while, got {statements:?}");
    };
    assert_eq!(*condition, Expr::Literal(Literal::Bool(true)));
    assert_eq!(**body, Stmt::Print(Expr::Literal(Literal::Number(1.0))));
}

#[test]
fn invalid_assignment_target_is_reported_but_not_fatal() {
    let (statements, queue) = parse_source("1 + 2 = 3;");
    assert_eq!(queue.error_count(), 1);
    let message = queue.iter().next().map(ToString::to_string);
    assert_eq!(
        message.as_deref(),
        Some("[line 1] error: Error at '=': Invalid assignment target.")
    );
    // The left-hand expression survives.
    assert_eq!(statements.len(), 1);
}

#[test]
fn error_recovery_collects_multiple_errors() {
    let (statements, queue) = parse_source("var 1;\nprint 2;\nvar 3;\nprint 4;");
    assert_eq!(queue.error_count(), 2);
    // Both print statements survive recovery.
    assert_eq!(statements.len(), 2);
    assert!(statements.iter().all(|s| matches!(s, Stmt::Print(_))));
}

#[test]
fn missing_semicolon_message() {
    let (_, queue) = parse_source("print 1");
    let message = queue.iter().next().map(ToString::to_string);
    assert_eq!(
        message.as_deref(),
        Some("[line 1] error: Error at end: Expect ';' after value.")
    );
}

#[test]
fn expect_expression_on_lone_operator() {
    let (statements, queue) = parse_source("+;");
    assert!(statements.is_empty());
    let message = queue.iter().next().map(ToString::to_string);
    assert_eq!(
        message.as_deref(),
        Some("[line 1] error: Error at '+': Expect expression.")
    );
}

#[test]
fn parse_is_deterministic() {
    let source = "fun f(x) { if (x > 0) return f(x - 1); return 0; } print f(3);";
    assert_eq!(parse_clean(source), parse_clean(source));
}

// Grammar for generating expression source that must parse cleanly.
// Identifiers are single lowercase letters to stay clear of keywords.
fn arb_expr_source() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("1".to_string()),
        Just("nil".to_string()),
        Just("true".to_string()),
        "[a-z]".prop_map(|s| s),
        Just("\"s\"".to_string()),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| format!("{a} + {b}")),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| format!("{a} == {b}")),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| format!("{a} or {b}")),
            inner.clone().prop_map(|a| format!("!{a}")),
            inner.clone().prop_map(|a| format!("({a})")),
        ]
    })
}

proptest! {
    #[test]
    fn generated_expressions_parse_without_errors(source in arb_expr_source()) {
        let (statements, queue) = parse_source(&format!("{source};"));
        prop_assert!(!queue.has_errors());
        prop_assert_eq!(statements.len(), 1);

        // Parsing carries no hidden state: a second pass over the same
        // source yields a structurally equal tree.
        let (again, _) = parse_source(&format!("{source};"));
        prop_assert_eq!(statements, again);
    }

    #[test]
    fn redundant_grouping_preserves_structure(source in arb_expr_source()) {
        let bare = parse_clean(&format!("{source};"));
        let grouped = parse_clean(&format!("(({source}));"));
        // Stripping the two grouping layers recovers the original tree.
        let Some(Stmt::Expression(Expr::Grouping(outer))) = grouped.into_iter().next() else {
            panic!("expected grouping at top");
        };
        let Expr::Grouping(inner) = *outer else {
            panic!("expected nested grouping");
        };
        prop_assert_eq!(bare, vec![Stmt::Expression(*inner)]);
    }
}
