//! Trigonometric equations and evaluations.

use crate::error::SolveError;
use crate::numeric::{self, Func};
use crate::options::{AngleMode, SolverOptions};
use crate::trace::{Outcome, StepTrace};
use regex::Regex;
use std::sync::LazyLock;
use stepcalc_types::format_number;
use tracing::debug;

const TRIG_EQUATION_HINT: &str =
    "Supported forms: a·sin(x) = v, cos(x) = v, tan(x) = v and squared forms such as sin(x)^2 = v.";

/// `[k][*](sin|cos|tan)[^2](x)[^2]=rhs`, evaluated with whitespace removed.
static TRIG_EQUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?(?:\d+(?:\.\d+)?)?)\*?(sin|cos|tan)(\^2)?\(?([a-z])\)?(\^2)?=(.+)$")
        .expect("valid regex literal")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ratio {
    Sin,
    Cos,
    Tan,
}

impl Ratio {
    fn name(self) -> &'static str {
        match self {
            Ratio::Sin => "sin",
            Ratio::Cos => "cos",
            Ratio::Tan => "tan",
        }
    }

    fn inverse(self) -> (&'static str, fn(f64) -> f64) {
        match self {
            Ratio::Sin => ("arcsin", f64::asin),
            Ratio::Cos => ("arccos", f64::acos),
            Ratio::Tan => ("arctan", f64::atan),
        }
    }

    fn range_limited(self) -> bool {
        !matches!(self, Ratio::Tan)
    }
}

/// Angle formatting in the unit the caller asked for.
struct Angles {
    degrees: bool,
}

impl Angles {
    fn new(mode: AngleMode) -> Self {
        Self {
            degrees: mode.reports_degrees(),
        }
    }

    fn from_radians(&self, radians: f64) -> f64 {
        if self.degrees {
            radians.to_degrees()
        } else {
            radians
        }
    }

    fn half_turn(&self) -> f64 {
        if self.degrees {
            180.0
        } else {
            std::f64::consts::PI
        }
    }

    fn show(&self, angle: f64) -> String {
        if self.degrees {
            format!("{}°", format_number(angle))
        } else {
            format_number(angle)
        }
    }

    fn period(&self, half_turns: u32) -> &'static str {
        match (self.degrees, half_turns) {
            (true, 1) => "180°n",
            (true, _) => "360°n",
            (false, 1) => "πn",
            (false, _) => "2πn",
        }
    }
}

fn same_angle(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn solve_equation(
    problem: &str,
    trace: &mut StepTrace,
    options: &SolverOptions,
) -> Result<Outcome, SolveError> {
    let compact: String = problem.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = TRIG_EQUATION_RE.captures(&compact).ok_or_else(|| {
        SolveError::unsupported(format!("Could not solve: {}", problem), TRIG_EQUATION_HINT)
    })?;

    let coeff: f64 = match &caps[1] {
        "" | "+" => 1.0,
        "-" => -1.0,
        other => other.parse().map_err(|_| {
            SolveError::unsupported(format!("Could not solve: {}", problem), TRIG_EQUATION_HINT)
        })?,
    };
    let ratio = match &caps[2] {
        "sin" => Ratio::Sin,
        "cos" => Ratio::Cos,
        _ => Ratio::Tan,
    };
    let squared = caps.get(3).is_some() || caps.get(5).is_some();
    let var = caps[4].chars().next().unwrap_or('x');
    let rhs = numeric::evaluate(&caps[6])?;
    debug!(?ratio, coeff, squared, rhs, "trig equation parsed");

    let call = if squared {
        format!("{}²({})", ratio.name(), var)
    } else {
        format!("{}({})", ratio.name(), var)
    };

    if coeff == 0.0 {
        return Err(SolveError::unsupported(
            format!("Could not solve: {}", problem),
            TRIG_EQUATION_HINT,
        ));
    }
    let mut value = rhs;
    if coeff != 1.0 {
        value = rhs / coeff;
        trace.rule(
            format!("{} = {} / {}", call, format_number(rhs), format_number(coeff)),
            format!(
                "Division Property of Equality: divide both sides by {}",
                format_number(coeff)
            ),
        );
    }
    trace.simplify(
        format!("{} = {}", call, format_number(value)),
        "Isolate the trigonometric function",
    );

    if squared {
        if value < 0.0 {
            trace.rule(
                format!("{} ≥ 0", call),
                "A square of a real number is never negative",
            );
            return Ok(Outcome::answer("No real solution"));
        }
        value = value.sqrt();
        trace.rule(
            format!("{}({}) = ±{}", ratio.name(), var, format_number(value)),
            "Square Root Property: take the square root of both sides",
        );
    }

    if ratio.range_limited() && value.abs() > 1.0 {
        trace.rule(
            format!("-1 ≤ {}({}) ≤ 1", ratio.name(), var),
            format!(
                "The range of {} is [-1, 1], and {} lies outside it",
                ratio.name(),
                format_number(value)
            ),
        );
        return Ok(Outcome::answer("No real solution"));
    }

    let angles = Angles::new(options.angle_mode);
    let (inverse_name, inverse) = ratio.inverse();
    let theta = angles.from_radians(inverse(value));
    trace.rule(
        format!(
            "{} = {}({}) = {}",
            var,
            inverse_name,
            format_number(value),
            angles.show(theta)
        ),
        format!("Inverse {}: principal value", ratio.name()),
    );

    let family = if squared {
        let quarter = angles.half_turn() / 2.0;
        if same_angle(theta, 0.0) || same_angle(theta, quarter) {
            format!("{} = {} + {}", var, angles.show(theta), angles.period(1))
        } else {
            format!("{} = ±{} + {}", var, angles.show(theta), angles.period(1))
        }
    } else {
        match ratio {
            Ratio::Sin => {
                let supplement = angles.half_turn() - theta;
                if same_angle(theta, supplement) {
                    format!("{} = {} + {}", var, angles.show(theta), angles.period(2))
                } else {
                    format!(
                        "{v} = {} + {p} or {v} = {} + {p}",
                        angles.show(theta),
                        angles.show(supplement),
                        v = var,
                        p = angles.period(2)
                    )
                }
            }
            Ratio::Cos => {
                if same_angle(theta, 0.0) || same_angle(theta, angles.half_turn()) {
                    format!("{} = {} + {}", var, angles.show(theta), angles.period(2))
                } else {
                    format!("{} = ±{} + {}", var, angles.show(theta), angles.period(2))
                }
            }
            Ratio::Tan => format!("{} = {} + {}", var, angles.show(theta), angles.period(1)),
        }
    };

    let periodicity = match (squared, ratio) {
        (true, _) => "The squared function repeats every half turn and is symmetric about 0",
        (false, Ratio::Sin) => "Sine repeats every full turn and sin(180° - θ) = sin(θ)",
        (false, Ratio::Cos) => "Cosine repeats every full turn and cos(-θ) = cos(θ)",
        (false, Ratio::Tan) => "Tangent repeats every half turn",
    };
    trace.rule(family.clone(), format!("General solution: {}", periodicity));

    Ok(Outcome::numeric(family, theta))
}

/// Evaluate trig calls, converting degree arguments and recording each call.
pub fn evaluate(
    problem: &str,
    trace: &mut StepTrace,
    options: &SolverOptions,
) -> Result<Outcome, SolveError> {
    let mode = options.angle_mode;
    let angles = Angles::new(mode);
    let mut calls = 0usize;

    let mut handler = |func: Func, arg: f64| -> Result<f64, SolveError> {
        calls += 1;
        let name = func.name();

        if func.is_circular() {
            let (radians, shown) = if mode.reads_as_degrees(arg) {
                let radians = arg.to_radians();
                trace.rule(
                    format!(
                        "{}° × π/180 = {} rad",
                        format_number(arg),
                        format_number(radians)
                    ),
                    "Degree Conversion",
                );
                (radians, format!("{}°", format_number(arg)))
            } else {
                let reason = match mode {
                    AngleMode::Radians => "Radian Measure: angles are read as radians",
                    _ => "Radian Measure: arguments up to 2π are read as radians",
                };
                trace.rule_once("θ in radians", reason);
                (arg, format_number(arg))
            };
            match func {
                Func::Sec => trace.rule_once("sec(θ) = 1 / cos(θ)", "Reciprocal Identity"),
                Func::Csc => trace.rule_once("csc(θ) = 1 / sin(θ)", "Reciprocal Identity"),
                Func::Cot => trace.rule_once("cot(θ) = cos(θ) / sin(θ)", "Reciprocal Identity"),
                _ => {}
            }
            let value = numeric::apply_standard(func, radians)
                .map_err(|_| SolveError::domain(format!("{}({}) is undefined", name, shown)))?;
            trace.calculate(
                format!("{}({}) = {}", name, shown, format_number(value)),
                format!("Evaluate {}", name),
            );
            return Ok(value);
        }

        if func.is_inverse_circular() {
            let range = match func {
                Func::Asin => "arcsin(y) ∈ [-π/2, π/2]",
                Func::Acos => "arccos(y) ∈ [0, π]",
                _ => "arctan(y) ∈ (-π/2, π/2)",
            };
            trace.rule_once(
                range,
                "Principal Value: the inverse returns the one angle in this range",
            );
            let value = angles.from_radians(numeric::apply_standard(func, arg)?);
            trace.calculate(
                format!("{}({}) = {}", name, format_number(arg), angles.show(value)),
                "Principal value of the inverse function",
            );
            return Ok(value);
        }

        let value = numeric::apply_standard(func, arg)?;
        trace.calculate(
            format!("{}({}) = {}", name, format_number(arg), format_number(value)),
            format!("Evaluate {}", name),
        );
        Ok(value)
    };

    let value = numeric::evaluate_with(problem, &mut handler)?;
    if calls != 1 || !numeric::is_single_call(problem) {
        trace.calculate(
            format!("{} = {}", problem, format_number(value)),
            "Combine the results",
        );
    }
    Ok(Outcome::value(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepcalc_types::StepKind;

    fn equation(problem: &str) -> Outcome {
        let mut trace = StepTrace::new();
        solve_equation(problem, &mut trace, &SolverOptions::default()).unwrap()
    }

    fn evaluated(problem: &str) -> (Outcome, StepTrace) {
        let mut trace = StepTrace::new();
        let outcome = evaluate(problem, &mut trace, &SolverOptions::default()).unwrap();
        (outcome, trace)
    }

    #[test]
    fn sine_equation_has_two_families() {
        match equation("sin(x)=0.5") {
            Outcome::Answer { solution, value } => {
                assert_eq!(solution, "x = 30° + 360°n or x = 150° + 360°n");
                assert!((value.unwrap() - 30.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn cosine_and_tangent_families() {
        match equation("cos(x)=0.5") {
            Outcome::Answer { solution, .. } => assert_eq!(solution, "x = ±60° + 360°n"),
            other => panic!("unexpected {:?}", other),
        }
        match equation("tan(x)=1") {
            Outcome::Answer { solution, .. } => assert_eq!(solution, "x = 45° + 180°n"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn coefficient_is_divided_out() {
        match equation("2sin(x)=1") {
            Outcome::Answer { solution, .. } => {
                assert_eq!(solution, "x = 30° + 360°n or x = 150° + 360°n")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn squared_equation() {
        match equation("sin(x)^2=0.25") {
            Outcome::Answer { solution, .. } => assert_eq!(solution, "x = ±30° + 180°n"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn out_of_range_has_no_real_solution() {
        assert_eq!(equation("sin(x)=2"), Outcome::answer("No real solution"));
        assert_eq!(equation("cos(x)^2=-1"), Outcome::answer("No real solution"));
    }

    #[test]
    fn radians_mode_reports_radians() {
        let mut trace = StepTrace::new();
        let options = SolverOptions {
            angle_mode: AngleMode::Radians,
            ..SolverOptions::default()
        };
        match solve_equation("tan(x)=0", &mut trace, &options).unwrap() {
            Outcome::Answer { solution, .. } => assert_eq!(solution, "x = 0 + πn"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn degree_arguments_are_converted() {
        let (outcome, trace) = evaluated("sin(30)");
        assert_eq!(outcome, Outcome::value(30f64.to_radians().sin()));
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.kind == StepKind::Rule && s.explanation == "Degree Conversion"));
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn small_arguments_are_radians() {
        let (outcome, trace) = evaluated("cos(0)");
        assert_eq!(outcome, Outcome::value(1.0));
        let rules: Vec<_> = trace
            .steps()
            .iter()
            .filter(|s| s.kind == StepKind::Rule)
            .collect();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].explanation.starts_with("Radian Measure"));
    }

    #[test]
    fn inverse_functions_name_their_principal_range() {
        let (outcome, trace) = evaluated("acos(0.5)");
        match outcome {
            Outcome::Answer { solution, value } => {
                assert_eq!(solution, "60");
                assert!((value.unwrap() - 60.0).abs() < 1e-9);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.kind == StepKind::Rule && s.expression == "arccos(y) ∈ [0, π]"));
    }

    #[test]
    fn compound_expression() {
        let (outcome, trace) = evaluated("sin(30)+cos(60)");
        match outcome {
            Outcome::Answer { solution, .. } => assert_eq!(solution, "1"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            trace.steps().last().map(|s| s.explanation.as_str()),
            Some("Combine the results")
        );
    }

    #[test]
    fn tangent_pole_is_a_domain_error() {
        let mut trace = StepTrace::new();
        let err = evaluate("tan(90)", &mut trace, &SolverOptions::default()).unwrap_err();
        assert_eq!(err, SolveError::domain("tan(90°) is undefined"));
    }
}
