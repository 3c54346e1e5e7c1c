use plc::parser::ast::{Expression, Literal, Statement};
use plc::parser::location::SourceLocation;
use plc::parser::parse_program;
use plc::parser::pretty::render_tree;
use std::fs;
use std::path::Path;

fn read_demo(name: &str) -> String {
    let path = Path::new("demos").join(name);
    fs::read_to_string(path).expect("Failed to read demo file")
}

#[test]
fn test_default_demo_parses() {
    let source = read_demo("default.plc");
    let program = parse_program(&source).expect("Parsing failed");

    let globals: Vec<&str> = program.globals.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(globals, vec!["fibs", "calls", "limit", "pi", "newline", "banner"]);
    assert_eq!(
        program.globals[5].value,
        Some(Expression::Literal(Literal::String(
            "PLC says \"hello\"\tworld".to_string()
        )))
    );

    let functions: Vec<&str> = program.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["fib", "describe", "main"]);

    match &program.functions[1].statements[0] {
        Statement::Switch { cases, .. } => {
            assert_eq!(cases.len(), 3);
            assert!(cases[2].is_default());
        }
        other => panic!("expected a switch, got {:?}", other),
    }

    let tree = render_tree(&program);
    assert!(tree.contains("LIST fibs = [1, 1, 2, 3, 5, 8]"));
    assert!(tree.contains("total = total + fibs[i] * (i + 1);"));
    assert!(tree.contains("RETURN -1 ^ 2;"));
}

#[test]
fn test_unclosed_demo_reports_location() {
    let source = read_demo("unclosed.plc");
    let err = parse_program(&source).unwrap_err();

    assert_eq!(err.offset(), 96);
    assert_eq!(
        err.message(),
        "Unclosed block: expected 'END', found end of input"
    );
    assert_eq!(
        SourceLocation::locate(&source, err.offset()),
        SourceLocation::new(6, 8)
    );
}
