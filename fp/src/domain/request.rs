//! PlanRequest domain type
//!
//! A PlanRequest carries everything the plan prompt needs: body metrics,
//! preferences, and free-text instructions. Fields are immutable once
//! submitted for a generation call.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest accepted body weight in kilograms
pub const WEIGHT_MIN_KG: f64 = 30.0;

/// Highest accepted body weight in kilograms
pub const WEIGHT_MAX_KG: f64 = 200.0;

/// Lowest accepted age in years
pub const AGE_MIN: u32 = 10;

/// Highest accepted age in years
pub const AGE_MAX: u32 = 100;

/// Shortest plan horizon in weeks
pub const WEEKS_MIN: u32 = 1;

/// Longest plan horizon in weeks
pub const WEEKS_MAX: u32 = 12;

/// Default current body weight offered by the interactive form
pub const DEFAULT_CURRENT_WEIGHT_KG: f64 = 75.0;

/// Default target weight offered by the interactive form
pub const DEFAULT_TARGET_WEIGHT_KG: f64 = 68.0;

/// Default age offered by the interactive form
pub const DEFAULT_AGE: u32 = 30;

/// Default plan horizon offered by the interactive form
pub const DEFAULT_NUMBER_OF_WEEKS: u32 = 4;

/// Errors produced by [`PlanRequest::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
}

/// Gender as reported by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            "other" | "o" => Ok(Self::Other),
            _ => Err(format!("Unknown gender: {} (expected male, female, or other)", s)),
        }
    }
}

/// Inputs for one plan generation call
///
/// Serializes directly into the `plan` template context, so the field
/// names here are the template's parameter names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Training goal, e.g. "Weight Loss" or "Muscle Gain"
    pub workout_type: String,

    /// Cuisine or diet style, e.g. "Indian" or "Mediterranean"
    pub diet_type: String,

    /// Current body weight in kilograms
    pub current_weight: f64,

    /// Target weight in kilograms
    pub target_weight: f64,

    /// Free-text dietary restrictions
    #[serde(default)]
    pub dietary_restrictions: String,

    /// Free-text health conditions
    #[serde(default)]
    pub health_conditions: String,

    /// Age in years
    pub age: u32,

    /// Reported gender
    pub gender: Gender,

    /// Plan horizon in weeks
    pub number_of_weeks: u32,

    /// Additional free-text instructions
    #[serde(default)]
    pub comments: String,
}

impl PlanRequest {
    /// Check the numeric fields against their accepted ranges
    ///
    /// The free-text fields are passed through verbatim and are not
    /// inspected here.
    pub fn validate(&self) -> Result<(), RequestError> {
        range_check("current weight (kg)", self.current_weight, WEIGHT_MIN_KG, WEIGHT_MAX_KG)?;
        range_check("target weight (kg)", self.target_weight, WEIGHT_MIN_KG, WEIGHT_MAX_KG)?;
        range_check("age", f64::from(self.age), f64::from(AGE_MIN), f64::from(AGE_MAX))?;
        range_check(
            "number of weeks",
            f64::from(self.number_of_weeks),
            f64::from(WEEKS_MIN),
            f64::from(WEEKS_MAX),
        )?;
        Ok(())
    }
}

fn range_check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), RequestError> {
    if value < min || value > max {
        return Err(RequestError::OutOfRange { field, min, max, value });
    }
    Ok(())
}
