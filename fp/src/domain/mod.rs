//! Domain types for fitness plan generation

mod plan;
mod request;

pub use plan::Plan;
pub use request::{
    AGE_MAX, AGE_MIN, DEFAULT_AGE, DEFAULT_CURRENT_WEIGHT_KG, DEFAULT_NUMBER_OF_WEEKS, DEFAULT_TARGET_WEIGHT_KG,
    Gender, PlanRequest, RequestError, WEEKS_MAX, WEEKS_MIN, WEIGHT_MAX_KG, WEIGHT_MIN_KG,
};
