use stepcalc_engine::{solve, Engine, SolverOptions, StepKind};

fn solution(input: &str) -> String {
    solve(input).solution
}

#[test]
fn test_linear_equation() {
    let result = solve("2x + 5 = 15");
    assert_eq!(result.solution, "x = 5");
    assert_eq!(result.last_answer.as_deref(), Some("5"));
}

#[test]
fn test_quadratic_roots_and_discriminant() {
    let result = solve("x² − 5x + 6 = 0");
    assert!(result.solution.contains('2'));
    assert!(result.solution.contains('3'));
    assert!(result
        .steps_of(StepKind::Calculate)
        .any(|s| s.expression == "Δ = 1"));
}

#[test]
fn test_factorial_expansion_and_limit() {
    let result = solve("5!");
    assert_eq!(result.solution, "120");
    let expansion = result
        .steps_of(StepKind::Calculate)
        .find(|s| s.expression.starts_with("5! ="))
        .expect("factorial step");
    let factors = expansion.expression.split('=').nth(1).unwrap();
    assert_eq!(factors.split('×').count(), 5);

    let too_big = solve("25!");
    assert!(too_big.is_error());
    assert!(too_big.solution.contains("too large"));
}

#[test]
fn test_percent_of() {
    assert_eq!(solution("20% of 50"), "10");
    assert_eq!(solution("What is 15% of 200?"), "30");
}

#[test]
fn test_derivatives_and_integrals() {
    assert_eq!(solution("derivative of 3x^2"), "f'(x) = 6x");
    assert_eq!(solution("d/dx(sin(x))"), "f'(x) = cos(x)");
    assert_eq!(solution("∫ x^2 dx"), "x^3/3 + C");
    assert_eq!(solution("integrate cos(x) dx"), "sin(x) + C");
}

#[test]
fn test_limits() {
    assert_eq!(solution("lim x→3 x^2 + 1"), "10");
    let indeterminate = solve("lim x->2 (x^2-4)/(x-2)");
    assert!(indeterminate.solution.contains("L'Hôpital"));
    assert_eq!(indeterminate.final_step().unwrap().kind, StepKind::Note);
}

#[test]
fn test_trigonometry() {
    let eq = solve("sin(x) = 0.5");
    assert_eq!(eq.solution, "x = 30° + 360°n or x = 150° + 360°n");
    assert_eq!(solution("sin(30)"), "0.5");
    assert_eq!(solution("cos(60) + 1"), "1.5");
    assert_eq!(solution("sin(x)^2 = 0.5"), "x = ±45° + 180°n");
}

#[test]
fn test_logs_roots_and_combinatorics() {
    assert_eq!(solution("log(1000)"), "3");
    assert_eq!(solution("log_2(32)"), "5");
    assert_eq!(solution("√16"), "4");
    assert_eq!(solution("2^10"), "1024");
    assert_eq!(solution("5 choose 2"), "10");
    assert_eq!(solution("nPr(5,2)"), "20");
}

#[test]
fn test_arithmetic_precedence() {
    assert_eq!(solution("2 + 3 × 4"), "14");
    assert_eq!(solution("(2 + 3) × 4"), "20");
    assert_eq!(solution("10 ÷ 4"), "2.5");
    assert_eq!(solution("2 x 3"), "6");
}

#[test]
fn test_guidance_solvers_end_with_note() {
    for input in ["x^3 - 6x^2 + 11x - 6 = 0", "x + y = 3; x - y = 1"] {
        let result = solve(input);
        assert_eq!(result.final_step().unwrap().kind, StepKind::Note, "{}", input);
        assert!(result.last_answer.is_none());
    }
}

#[test]
fn test_failures_are_traces_not_panics() {
    let zero = solve("10/0");
    assert!(zero.is_error());
    assert!(zero.solution.starts_with("Could not solve"));

    let gibberish = solve("hello world");
    assert!(gibberish.solution.starts_with("Could not solve"));
    assert!(!gibberish.is_error());
}

#[test]
fn test_options_change_angle_interpretation() {
    let radians = Engine::with_options(SolverOptions {
        angle_mode: stepcalc_engine::AngleMode::Degrees,
        ..SolverOptions::default()
    });
    assert_eq!(radians.solve("sin(1)").solution, "0.017452");
}

#[test]
fn test_every_trace_has_at_most_one_answer_step() {
    for input in ["2x+5=15", "x^2-4=0", "sqrt(-1)", "lim x->0 x", "abc", "5!"] {
        let result = solve(input);
        let answers = result
            .steps
            .iter()
            .filter(|s| s.kind.is_terminal_answer())
            .count();
        assert_eq!(answers, 1, "{}", input);
    }
}

#[test]
fn test_deep_nesting_fails_without_aborting() {
    let deep_inputs = [
        format!("{}1{}", "(".repeat(2000), ")".repeat(2000)),
        format!("{}16{}", "sqrt(".repeat(2000), ")".repeat(2000)),
        format!("{}30{}", "sin(".repeat(2000), ")".repeat(2000)),
        "-".repeat(20_000),
    ];
    for input in &deep_inputs {
        let result = solve(input);
        assert!(result.solution.starts_with("Could not solve"), "{}", &input[..20]);
        assert_eq!(result.last_answer, None);
        assert_eq!(result.steps.last().map(|s| s.kind), Some(StepKind::Note));
    }

    let shallow = format!("{}2+3{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(solution(&shallow), "5");
}

#[test]
fn test_double_decimal_is_not_a_number() {
    for input in ["3.5.2", "1.2.3"] {
        let result = solve(input);
        assert!(result.solution.starts_with("Could not solve"), "{}", input);
        assert_eq!(result.last_answer, None);
    }
    assert_eq!(solution("3.5*0.2"), "0.7");
}
