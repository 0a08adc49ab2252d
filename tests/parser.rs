use treelox::ast_printer::AstPrinter;
use treelox::error::LoxError;
use treelox::parser::Parser;
use treelox::scanner::Scanner;
use treelox::stmt::Stmt;

fn parse_source(source: &str) -> (Vec<Stmt>, Vec<LoxError>) {
    let (tokens, scan_errors) = Scanner::new(source.as_bytes()).scan_tokens();
    assert!(
        scan_errors.is_empty(),
        "unexpected scan errors: {:?}",
        scan_errors
    );

    Parser::new(tokens).parse()
}

/// Parses `source` as a single expression statement and renders the inner
/// expression.
fn expr_form(source: &str) -> String {
    let (statements, errors) = parse_source(&format!("{};", source));
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    assert_eq!(statements.len(), 1);

    match &statements[0] {
        Stmt::Expression(expr) => AstPrinter::print(expr),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

fn stmt_form(source: &str) -> String {
    let (statements, errors) = parse_source(source);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    assert_eq!(statements.len(), 1);

    AstPrinter::print_stmt(&statements[0])
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(expr_form("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(expr_form("1 - 2 - 3"), "(- (- 1.0 2.0) 3.0)");
    assert_eq!(expr_form("8 / 4 / 2"), "(/ (/ 8.0 4.0) 2.0)");
}

#[test]
fn unary_nests_and_outranks_factors() {
    assert_eq!(expr_form("!!true"), "(! (! true))");
    assert_eq!(expr_form("-1 * 2"), "(* (- 1.0) 2.0)");
}

#[test]
fn comparison_outranks_equality() {
    assert_eq!(expr_form("1 < 2 == true"), "(== (< 1.0 2.0) true)");
}

#[test]
fn grouping_overrides_precedence() {
    assert_eq!(expr_form("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(expr_form("a or b and c"), "(or a (and b c))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(expr_form("a = b = 1"), "(= a (= b 1.0))");
}

#[test]
fn calls_and_property_access_chain_left_to_right() {
    assert_eq!(expr_form("a.b(1).c"), "(. (call (. a b) 1.0) c)");
    assert_eq!(expr_form("f()()"), "(call (call f))");
}

#[test]
fn property_assignment_parses_as_set() {
    assert_eq!(expr_form("a.b = 2"), "(= (. a b) 2.0)");
}

#[test]
fn super_access_parses_inside_any_expression() {
    // Static validity is the resolver's business, not the parser's.
    assert_eq!(expr_form("super.m()"), "(call (super m))");
}

#[test]
fn string_and_nil_literals() {
    assert_eq!(expr_form("\"hi\" == nil"), "(== hi nil)");
}

#[test]
fn for_loop_desugars_to_while() {
    assert_eq!(
        stmt_form("for (var i = 0; i < 3; i = i + 1) print i;"),
        "(block (var i = 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
    );
}

#[test]
fn empty_for_clauses_default_to_infinite_while() {
    assert_eq!(stmt_form("for (;;) print 1;"), "(while true (print 1.0))");
}

#[test]
fn class_declaration_with_superclass_and_methods() {
    assert_eq!(
        stmt_form("class B < A { m(x) { return x; } }"),
        "(class B < A (fun m(x) (return x)))"
    );
}

#[test]
fn invalid_assignment_target_is_reported_and_recovered() {
    let (statements, errors) = parse_source("1 = 2;");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("Invalid assignment target."));
    // The left side survives as a plain expression statement.
    assert_eq!(statements.len(), 1);
}

#[test]
fn missing_semicolon_is_a_parse_error() {
    let (_, errors) = parse_source("print 1");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("Expect ';' after value."));
}

#[test]
fn parser_synchronizes_and_reports_multiple_errors() {
    let (statements, errors) = parse_source("var 1 = 2;\nprint;\nprint 3;");

    assert_eq!(errors.len(), 2, "errors: {:?}", errors);
    assert!(errors[0].to_string().contains("[line 1]"));
    assert!(errors[1].to_string().contains("[line 2]"));

    // The healthy trailing statement still parses.
    assert_eq!(statements.len(), 1);
}

#[test]
fn too_many_parameters_is_reported_without_aborting() {
    let params: Vec<String> = (0..=255).map(|i| format!("p{}", i)).collect();
    let source: String = format!("fun f({}) {{}}", params.join(", "));

    let (statements, errors) = parse_source(&source);

    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .to_string()
        .contains("Can't have more than 255 parameters."));
    assert_eq!(statements.len(), 1);
}

#[test]
fn too_many_arguments_is_reported_without_aborting() {
    let args: Vec<String> = (0..=255).map(|i| i.to_string()).collect();
    let source: String = format!("f({});", args.join(", "));

    let (statements, errors) = parse_source(&source);

    assert_eq!(errors.len(), 1);
    assert!(errors[0]
        .to_string()
        .contains("Can't have more than 255 arguments."));
    assert_eq!(statements.len(), 1);
}
