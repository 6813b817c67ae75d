use std::{collections::HashMap, fs, sync::Arc, thread};

use calculate::{
    AngleUnit, Engine, EngineConfig, Expression, ParseError, ParseErrorKind, RuntimeError,
    ast::Expr, interpreter::registry::OperatorArity,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let engine = Engine::default();
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for line in extract_calc_lines(&content) {
            count += 1;
            let Some((source, expected)) = line.rsplit_once("=>") else {
                panic!("Example in {path:?} has no expected result: {line}");
            };
            let (source, expected) = (source.trim(), expected.trim());
            let result = engine.parse(source)
                               .map_err(|e| e.to_string())
                               .and_then(|expr| expr.evaluate(&()).map_err(|e| e.to_string()));

            if expected == "error" {
                assert!(result.is_err(),
                        "Example '{source}' in {path:?} succeeded but was expected to fail");
                continue;
            }

            let expected: f64 =
                expected.parse()
                        .unwrap_or_else(|e| panic!("Bad expected value in {path:?}: {line}: {e}"));
            match result {
                Ok(value) => assert!(close(value, expected),
                                     "Example '{source}' in {path:?}: {value} != {expected}"),
                Err(e) => panic!("Example '{source}' in {path:?} failed: {e}"),
            }
        }
    }

    assert!(count > 0, "No calc examples found in book/src");
}

fn extract_calc_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```calc") {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * 1f64.max(a.abs()).max(b.abs())
}

fn assert_value(src: &str, expected: f64) {
    let expr = Engine::default().parse(src)
                                .unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"));
    let value = expr.evaluate(&())
                    .unwrap_or_else(|e| panic!("'{src}' failed to evaluate: {e}"));
    assert!(close(value, expected), "'{src}' evaluated to {value}, expected {expected}");
}

fn assert_parse_failure(src: &str) -> ParseError {
    match Engine::default().parse(src) {
        Ok(_) => panic!("'{src}' parsed but was expected to fail"),
        Err(e) => e,
    }
}

fn assert_eval_failure(src: &str) -> RuntimeError {
    let expr = Engine::default().parse(src)
                                .unwrap_or_else(|e| panic!("'{src}' failed to parse: {e}"));
    match expr.evaluate(&()) {
        Ok(value) => panic!("'{src}' evaluated to {value} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn precedence_and_grouping() {
    assert_value("2 + 3 * 4", 14.0);
    assert_value("(2 + 3) * 4", 20.0);
    assert_value("2 * 3 + 4 * 5", 26.0);
    assert_value("10 - 2 - 3", 5.0);
    assert_value("2 ^ 3 * 2", 16.0);
    assert_value("((((1))))", 1.0);
}

#[test]
fn exponentiation_is_right_associative() {
    assert_value("2^3^2", 512.0);
    assert_value("2**3**2", 512.0);
    assert_value("2^3**2", 512.0);
    assert_value("(2^3)^2", 64.0);
}

#[test]
fn prefix_operators_bind_tightest() {
    assert_value("-2^2", 4.0);
    assert_value("-(2^2)", -4.0);
    assert_value("2^-2", 0.25);
    assert_value("--2", 2.0);
    assert_value("+-+2", -2.0);
    assert_value("3 - -3", 6.0);
}

#[test]
fn operator_runs_split_by_longest_match() {
    assert_value("2**3", 8.0);
    assert_value("2*-3", -6.0);
    assert_value("2**-1", 0.5);
    assert_value("2--3", 5.0);
}

#[test]
fn number_literals() {
    assert_value("42", 42.0);
    assert_value("3.25", 3.25);
    assert_value(".5", 0.5);
    assert_value("2.", 2.0);
    assert_value("1e3", 1000.0);
    assert_value("2.5E-2", 0.025);
    assert_value("  7\t", 7.0);
}

#[test]
fn free_variables_are_collected() {
    let expr = Engine::default().parse("x * (y + x) + sin(z)").unwrap();

    let names: Vec<&str> = expr.variables().iter().map(String::as_str).collect();
    assert_eq!(names, ["x", "y", "z"]);
    assert_eq!(expr.parameters(), ["x", "y", "z"]);
}

#[test]
fn constants_and_function_names_are_not_variables() {
    let expr = Engine::default().parse("pi * r^2 + sqrt(e)").unwrap();

    let names: Vec<&str> = expr.variables().iter().map(String::as_str).collect();
    assert_eq!(names, ["r"]);
}

#[test]
fn function_name_without_call_is_a_variable() {
    let expr = Engine::default().parse("sin + 1").unwrap();

    assert!(expr.variables().contains("sin"));
    assert_eq!(expr.evaluate(&[("sin", 2.0)]), Ok(3.0));
}

#[test]
fn bindings_are_per_call() {
    let expr = Engine::default().parse("x^2 + y").unwrap();

    assert_eq!(expr.evaluate(&[("x", 3.0), ("y", 1.0)]), Ok(10.0));
    assert_eq!(expr.evaluate(&[("x", -2.0), ("y", 0.5)]), Ok(4.5));

    let map = HashMap::from([("x".to_string(), 1.0), ("y".to_string(), 1.0)]);
    assert_eq!(expr.evaluate(&map), Ok(2.0));
}

#[test]
fn extra_bindings_are_ignored() {
    let expr = Engine::default().parse("x + 1").unwrap();

    assert_eq!(expr.evaluate(&[("x", 1.0), ("unused", 99.0)]), Ok(2.0));
}

#[test]
fn undefined_variable() {
    let expr = Engine::default().parse("x + y").unwrap();

    assert_eq!(expr.evaluate(&[("x", 1.0)]),
               Err(RuntimeError::UndefinedVariable { name:     "y".to_string(),
                                                     position: 4, }));
    assert_eq!(expr.evaluate(&()),
               Err(RuntimeError::UndefinedVariable { name:     "x".to_string(),
                                                     position: 0, }));
}

#[test]
fn undefined_variable_points_at_first_occurrence() {
    let expr = Engine::default().parse("2 * (y + 1) - y").unwrap();

    let err = expr.evaluate(&()).unwrap_err();
    assert_eq!(err,
               RuntimeError::UndefinedVariable { name:     "y".to_string(),
                                                 position: 5, });
    assert!(err.to_string().contains("position 5"), "{err}");
}

#[test]
fn evaluation_is_idempotent() {
    let expr = Engine::default().parse("sin(x) * exp(x) / (1 + x^2)").unwrap();
    let bindings = [("x", 0.7)];

    let first = expr.evaluate(&bindings).unwrap();
    for _ in 0..10 {
        assert_eq!(expr.evaluate(&bindings).unwrap().to_bits(), first.to_bits());
    }
}

#[test]
fn failed_evaluation_leaves_expression_usable() {
    let expr = Engine::default().parse("1/x").unwrap();

    assert!(matches!(expr.evaluate(&[("x", 0.0)]), Err(RuntimeError::Domain { .. })));
    assert_eq!(expr.evaluate(&[("x", 4.0)]), Ok(0.25));
}

#[test]
fn domain_errors_name_the_operation() {
    let err = Engine::default().parse("2 + 1/x")
                               .unwrap()
                               .evaluate(&[("x", 0.0)])
                               .unwrap_err();

    let RuntimeError::Domain { operation, position, .. } = err else {
        panic!("expected a domain error, got {err:?}");
    };
    assert_eq!(operation, "/");
    assert_eq!(position, 5);
}

#[test]
fn domain_errors() {
    for src in ["1/0",
                "5 % 0",
                "0^-1",
                "(-8)^0.5",
                "sqrt(-4)",
                "ln(-1)",
                "log10(0)",
                "log(8, 1)",
                "log(8, -2)",
                "asin(1.5)",
                "acos(-2)",
                "fact(-3)",
                "fact(171)",
                "fact(0.5)",
                "tan(pi/2)",
                "clamp(2, 0, 1)"]
    {
        assert!(matches!(assert_eval_failure(src), RuntimeError::Domain { .. }),
                "'{src}' should fail with a domain error");
    }
}

#[test]
fn negative_base_with_integral_exponent() {
    assert_value("(-2)^3", -8.0);
    assert_value("(-2)^2", 4.0);
    assert_value("(-2)^-1", -0.5);
    assert_value("pow(-3, 2)", 9.0);
}

#[test]
fn nan_operands_propagate() {
    let expr = Engine::default().parse("x + 1").unwrap();
    assert!(expr.evaluate(&[("x", f64::NAN)]).unwrap().is_nan());
}

#[test]
fn overflow_is_a_value_but_undefined_results_are_not() {
    let expr = Engine::default().parse("x * 10").unwrap();
    assert_eq!(expr.evaluate(&[("x", 1e308)]), Ok(f64::INFINITY));

    let expr = Engine::default().parse("x - x").unwrap();
    assert!(matches!(expr.evaluate(&[("x", f64::INFINITY)]),
                     Err(RuntimeError::Domain { .. })));
}

#[test]
fn malformed_input_positions() {
    assert_eq!(assert_parse_failure("2+"),
               ParseError::UnexpectedEndOfInput { position: 2 });
    assert_eq!(assert_parse_failure("(2+3"),
               ParseError::ExpectedClosingParen { position:  4,
                                                  opened_at: 0, });
    assert_eq!(assert_parse_failure(")2"),
               ParseError::UnexpectedToken { token:    ")".to_string(),
                                             position: 0, });
    assert_eq!(assert_parse_failure("2 3"),
               ParseError::UnexpectedTrailingTokens { token:    "3".to_string(),
                                                      position: 2, });
    assert_eq!(assert_parse_failure("1, 2"),
               ParseError::MisplacedSeparator { position: 1 });
    assert_eq!(assert_parse_failure("()"),
               ParseError::UnexpectedToken { token:    ")".to_string(),
                                             position: 1, });
}

#[test]
fn empty_input() {
    assert_eq!(assert_parse_failure(""), ParseError::EmptyExpression);
    assert_eq!(assert_parse_failure("   "), ParseError::EmptyExpression);
}

#[test]
fn lexical_errors() {
    assert_eq!(assert_parse_failure("2 # 3"),
               ParseError::InvalidCharacter { character: '#',
                                              position:  2, });
    assert_eq!(assert_parse_failure("x + 2 $"),
               ParseError::InvalidCharacter { character: '$',
                                              position:  6, });
    assert_eq!(assert_parse_failure("1 + é").kind(), ParseErrorKind::Lex);
    assert_eq!(assert_parse_failure("2 . 3").kind(), ParseErrorKind::Lex);
}

#[test]
fn arity_is_checked_while_parsing() {
    let err = assert_parse_failure("max(1)");
    assert_eq!(err,
               ParseError::ArgumentCountMismatch { name:     "max".to_string(),
                                                   expected: 2,
                                                   found:    1,
                                                   position: 0, });
    assert_eq!(err.kind(), ParseErrorKind::Arity);

    assert_eq!(assert_parse_failure("1 + atan2(1)").kind(), ParseErrorKind::Arity);
    assert_eq!(assert_parse_failure("sin()").kind(), ParseErrorKind::Arity);
    assert_eq!(assert_parse_failure("clamp(1, 2)").kind(), ParseErrorKind::Arity);
}

#[test]
fn unknown_functions_and_operators() {
    assert_eq!(assert_parse_failure("foo(1)"),
               ParseError::UnknownFunction { name:     "foo".to_string(),
                                             position: 0, });
    assert_eq!(assert_parse_failure("x(2)").kind(), ParseErrorKind::Syntax);
    assert_eq!(assert_parse_failure("*2"),
               ParseError::UnknownOperator { symbol:   "*".to_string(),
                                             arity:    OperatorArity::Unary,
                                             position: 0, });
    assert_eq!(assert_parse_failure("2 * / 3").kind(), ParseErrorKind::UnknownOperator);
}

#[test]
fn unclosed_call() {
    assert_eq!(assert_parse_failure("max(1, 2"),
               ParseError::ExpectedClosingParen { position:  8,
                                                  opened_at: 3, });
    assert_eq!(assert_parse_failure("max(1 2)"),
               ParseError::UnexpectedToken { token:    "2".to_string(),
                                             position: 6, });
}

#[test]
fn deep_nesting_is_rejected() {
    let depth = 1_000;
    let nested = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(assert_parse_failure(&nested).kind(), ParseErrorKind::TooComplex);

    let prefixes = format!("{}1", "-".repeat(depth));
    assert_eq!(assert_parse_failure(&prefixes).kind(), ParseErrorKind::TooComplex);

    let towers = vec!["2"; depth].join("^");
    assert_eq!(assert_parse_failure(&towers).kind(), ParseErrorKind::TooComplex);
}

#[test]
fn long_variable_chains_are_bounded() {
    let engine = Engine::new(EngineConfig::default().with_max_depth(16));

    let short = vec!["x"; 10].join(" + ");
    assert_eq!(engine.parse(&short).unwrap().evaluate(&[("x", 1.0)]), Ok(10.0));

    let long = vec!["x"; 100].join(" + ");
    assert_eq!(engine.parse(&long).unwrap_err().kind(), ParseErrorKind::TooComplex);
}

#[test]
fn moderate_nesting_is_accepted() {
    let depth = 100;
    let nested = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    let expr = Engine::default().parse(&nested).unwrap();

    assert_eq!(expr.evaluate(&[("x", 3.0)]), Ok(3.0));
}

#[test]
fn folding_does_not_change_results() {
    let folded = Engine::default();
    let plain = Engine::new(EngineConfig::default().with_optimize(false));

    for src in ["2 + 3 * 4",
                "-2^2",
                "sqrt(16) * pi",
                "2^3^2 - 7 % 3",
                "fact(5) / (1 + 2)",
                "max(min(1, 2), 3) + x",
                "x * (1 + 2) - sin(0)"]
    {
        let a = folded.parse(src).unwrap().evaluate(&[("x", 1.5)]).unwrap();
        let b = plain.parse(src).unwrap().evaluate(&[("x", 1.5)]).unwrap();
        assert_eq!(a.to_bits(), b.to_bits(), "'{src}' differs with folding");
    }
}

#[test]
fn folding_collapses_constant_subtrees() {
    let expr = Engine::default().parse("x * (2 + 3)").unwrap();
    assert_eq!(expr.tree().to_string(), "(x * 5)");

    let expr = Engine::default().parse("2 * pi").unwrap();
    assert!(matches!(expr.tree(), Expr::Literal { .. }));
}

#[test]
fn failing_constant_subtrees_fail_at_evaluation() {
    let expr = Engine::default().parse("x + 1/0").unwrap();

    assert!(matches!(expr.tree(), Expr::BinaryOp { .. }));
    assert!(matches!(expr.evaluate(&[("x", 1.0)]), Err(RuntimeError::Domain { .. })));
}

#[test]
fn canonical_rendering() {
    let engine = Engine::new(EngineConfig::default().with_optimize(false));

    assert_eq!(engine.parse("1+2*3").unwrap().tree().to_string(), "(1 + (2 * 3))");
    assert_eq!(engine.parse("2^3^2").unwrap().tree().to_string(), "(2 ^ (3 ^ 2))");
    assert_eq!(engine.parse("a-b-c").unwrap().tree().to_string(), "((a - b) - c)");
    assert_eq!(engine.parse("max(x, -1)").unwrap().tree().to_string(),
               "max(x, (-1))");
}

#[test]
fn infinite_literals_render_as_parseable_text() {
    let engine = Engine::default();

    let expr = engine.parse("x + 1e308 * 10").unwrap();
    let rendered = expr.tree().to_string();
    assert_eq!(rendered, "(x + 1e999)");
    let reparsed = engine.parse(&rendered).unwrap();
    assert_eq!(reparsed.variables().len(), 1);
    assert_eq!(reparsed.evaluate(&[("x", 0.0)]), Ok(f64::INFINITY));

    let expr = engine.parse("x + -1e308 * 10").unwrap();
    let rendered = expr.tree().to_string();
    assert_eq!(rendered, "(x + (-1e999))");
    assert_eq!(engine.parse(&rendered).unwrap().evaluate(&[("x", 0.0)]),
               Ok(f64::NEG_INFINITY));
}

#[test]
fn degree_mode() {
    let engine = Engine::new(EngineConfig::default().with_angle_unit(AngleUnit::Degrees));
    let eval = |src: &str| engine.parse(src).unwrap().evaluate(&()).unwrap();

    assert_eq!(eval("sin(90)"), 1.0);
    assert_eq!(eval("sin(180)"), 0.0);
    assert_eq!(eval("cos(90)"), 0.0);
    assert!(close(eval("tan(45)"), 1.0));
    assert!(close(eval("asin(1)"), 90.0));
    assert!(close(eval("atan2(1, 1)"), 45.0));
    assert!(engine.parse("tan(90)").unwrap().evaluate(&()).is_err());

    // Constants and unit conversions ignore the angle unit.
    assert!(close(eval("pi"), std::f64::consts::PI));
    assert!(close(eval("degrees(pi)"), 180.0));
}

#[test]
fn engines_with_different_configs_coexist() {
    let radians = Engine::default();
    let degrees = Engine::new(EngineConfig::default().with_angle_unit(AngleUnit::Degrees));

    let r = radians.parse("sin(x)").unwrap();
    let d = degrees.parse("sin(x)").unwrap();

    assert!(close(r.evaluate(&[("x", std::f64::consts::FRAC_PI_2)]).unwrap(), 1.0));
    assert_eq!(d.evaluate(&[("x", 90.0)]), Ok(1.0));
    assert_eq!(r.config().angle_unit, AngleUnit::Radians);
    assert_eq!(d.config().angle_unit, AngleUnit::Degrees);
}

#[test]
fn precision_controls_integer_guards() {
    let strict = Engine::new(EngineConfig::default().with_precision(0.0));
    let loose = Engine::new(EngineConfig::default().with_precision(1e-3));

    assert!(strict.parse("fact(3.0001)").unwrap().evaluate(&()).is_err());
    assert_eq!(loose.parse("fact(3.0001)").unwrap().evaluate(&()), Ok(6.0));
    assert_eq!(Engine::new(EngineConfig::default().with_precision(-1e-3)).config().precision,
               1e-3);
}

#[test]
fn non_finite_precision_falls_back_to_default() {
    let defaults = EngineConfig::default();

    for precision in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let built = Engine::new(defaults.with_precision(precision));
        let literal = Engine::new(EngineConfig { precision,
                                                 ..defaults });

        for engine in [built, literal] {
            assert_eq!(engine.config().precision, defaults.precision);
            assert!(engine.parse("tan(pi / 2)").unwrap().evaluate(&()).is_err());
        }
    }
}

#[test]
fn declared_variables() {
    let engine = Engine::default();
    let expr = engine.parse_with_variables("a * b - c", ["c", "a", "b"]).unwrap();

    assert_eq!(expr.parameters(), ["c", "a", "b"]);
    assert_eq!(expr.call(&[1.0, 2.0, 3.0]), Ok(5.0));
    assert_eq!(expr.call(&[1.0, 2.0]),
               Err(RuntimeError::ArgumentCountMismatch { expected: 3,
                                                         found:    2, }));
}

#[test]
fn declared_variables_need_not_all_appear() {
    let expr = Engine::default().parse_with_variables("x + 1", ["x", "y"]).unwrap();

    assert_eq!(expr.call(&[1.0, 100.0]), Ok(2.0));
    assert_eq!(expr.variables().len(), 1);
}

#[test]
fn declared_variable_list() {
    let engine = Engine::default();

    let expr = engine.parse_with_variable_list("a * b - c", "c, a,b").unwrap();
    assert_eq!(expr.parameters(), ["c", "a", "b"]);
    assert_eq!(expr.call(&[1.0, 2.0, 3.0]), Ok(5.0));

    let constant = engine.parse_with_variable_list("2 * pi", "  ").unwrap();
    assert!(constant.parameters().is_empty());
    assert!(close(constant.call(&[]).unwrap(), std::f64::consts::TAU));

    assert_eq!(engine.parse_with_variable_list("x", "").unwrap_err(),
               ParseError::UndefinedSymbol { name:     "x".to_string(),
                                             position: 0, });
    assert!(matches!(engine.parse_with_variable_list("x", "x,,y"),
                     Err(ParseError::BadName { .. })));
    assert_eq!(engine.parse_with_variable_list("x", "x, x").unwrap_err(),
               ParseError::DuplicateName { name: "x".to_string() });
}

#[test]
fn declared_variable_errors() {
    let engine = Engine::default();

    assert_eq!(engine.parse_with_variables("x + y", ["x"]).unwrap_err(),
               ParseError::UndefinedSymbol { name:     "y".to_string(),
                                             position: 4, });
    assert!(matches!(engine.parse_with_variables("pi", ["pi"]),
                     Err(ParseError::BadName { .. })));
    assert!(matches!(engine.parse_with_variables("sin", ["sin"]),
                     Err(ParseError::BadName { .. })));
    assert!(matches!(engine.parse_with_variables("x", ["x y"]),
                     Err(ParseError::BadName { .. })));
    assert_eq!(engine.parse_with_variables("x", ["x", "x"]).unwrap_err(),
               ParseError::DuplicateName { name: "x".to_string() });
    assert_eq!(engine.parse_with_variables("x", [""]).unwrap_err().kind(),
               ParseErrorKind::Name);
}

#[test]
fn call_uses_sorted_free_variables_without_declaration() {
    let expr = Engine::default().parse("b - a").unwrap();

    assert_eq!(expr.parameters(), ["a", "b"]);
    assert_eq!(expr.call(&[1.0, 10.0]), Ok(9.0));
}

#[test]
fn expression_identity() {
    let engine = Engine::default();
    let a = engine.parse("x + 1").unwrap();
    let b: Expression = "x + 1".parse().unwrap();
    let c = engine.parse("x+1").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string(), "x + 1");
    assert_eq!(a.source(), "x + 1");
}

#[test]
fn expression_identity_includes_configuration() {
    let radians = Engine::default().parse("sin(x)").unwrap();
    let degrees = Engine::new(EngineConfig::default().with_angle_unit(AngleUnit::Degrees))
        .parse("sin(x)")
        .unwrap();
    let unfolded = Engine::new(EngineConfig::default().with_optimize(false))
        .parse("sin(x)")
        .unwrap();

    assert_ne!(radians, degrees);
    assert_ne!(radians, unfolded);
    assert_eq!(radians, Engine::default().parse("sin(x)").unwrap());
    assert_ne!(radians.evaluate(&[("x", 90.0)]), degrees.evaluate(&[("x", 90.0)]));
}

#[test]
fn builtins_reject_wrong_operand_counts() {
    let engine = Engine::default();
    let registry = engine.registry();
    let config = engine.config();

    let div = registry.operator("/", OperatorArity::Binary).unwrap();
    assert!(div.apply(&[1.0], config).is_err());
    assert!(div.apply(&[], config).is_err());
    assert!(div.apply(&[1.0, 2.0, 3.0], config).is_err());
    assert_eq!(div.apply(&[1.0, 2.0], config), Ok(0.5));

    let neg = registry.operator("-", OperatorArity::Unary).unwrap();
    assert!(neg.apply(&[], config).is_err());

    for function in registry.functions() {
        assert!(function.apply(&[], config).is_err(), "{}", function.name);
        let too_many = vec![1.0; function.arity + 1];
        assert!(function.apply(&too_many, config).is_err(), "{}", function.name);
    }
}

#[test]
fn shared_expression_across_threads() {
    let expr = Arc::new(Engine::default().parse("x^2 + 2*x + 1").unwrap());

    let handles: Vec<_> = (0..8_i32).map(|i| {
                                        let expr = Arc::clone(&expr);
                                        thread::spawn(move || {
                                            let x = f64::from(i);
                                            (0..100).map(|_| expr.evaluate(&[("x", x)]).unwrap())
                                                    .all(|v| v == (x + 1.0) * (x + 1.0))
                                        })
                                    })
                                    .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn query_listings() {
    let engine = Engine::default();

    assert_eq!(engine.list_constants(), ["pi", "e", "tau", "phi"]);
    assert_eq!(engine.list_operators(), ["+", "-", "*", "/", "%", "^", "**"]);

    let functions = engine.list_functions();
    assert_eq!(functions.len(), 31);
    assert_eq!(functions.first().map(String::as_str), Some("sin"));
    assert_eq!(functions.last().map(String::as_str), Some("clamp"));
    assert_eq!(functions, engine.list_functions());
}

#[test]
fn query_metadata() {
    let engine = Engine::default();
    let query = engine.query();

    let pow = query.operators()
                   .into_iter()
                   .find(|op| op.symbol == "^")
                   .unwrap();
    assert_eq!(pow.precedence, 30);
    assert_eq!(query.function("log").map(|f| f.arity), Some(2));
    assert_eq!(query.function("nope"), None);

    let json = serde_json::to_value(query.operators()).unwrap();
    assert_eq!(json[0]["arity"], "unary");
    assert_eq!(json[2]["associativity"], "left");
}

#[test]
fn config_round_trips_through_json() {
    let config = EngineConfig::default().with_angle_unit(AngleUnit::Degrees)
                                        .with_max_depth(32);
    let json = serde_json::to_string(&config).unwrap();
    let back: EngineConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);

    let partial: EngineConfig = serde_json::from_str(r#"{"optimize": false}"#).unwrap();
    assert_eq!(partial, EngineConfig::default().with_optimize(false));
}

#[test]
fn error_messages_carry_positions() {
    let err = assert_parse_failure("1 + (2 * 3");
    assert_eq!(err.position(), Some(10));
    assert!(err.to_string().contains("position 10"), "{err}");
}
