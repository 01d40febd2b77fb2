use serde::{Deserialize, Serialize};

/// How bare trigonometric arguments are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    /// Magnitudes above 2π are read as degrees, everything else as radians.
    #[default]
    Auto,
    Degrees,
    Radians,
}

impl AngleMode {
    /// Whether `angle` should be converted from degrees before evaluation.
    pub fn reads_as_degrees(self, angle: f64) -> bool {
        match self {
            AngleMode::Auto => angle.abs() > std::f64::consts::TAU,
            AngleMode::Degrees => true,
            AngleMode::Radians => false,
        }
    }

    /// Whether inverse functions and equation families report degrees.
    pub fn reports_degrees(self) -> bool {
        !matches!(self, AngleMode::Radians)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    pub angle_mode: AngleMode,
    /// Largest `n` accepted by `n!`, `nCr` and `nPr`.
    pub max_factorial: u64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Auto,
            max_factorial: 20,
        }
    }
}
