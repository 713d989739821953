//! Data types produced by the grading pipeline.

use crate::grading::grade::Grade;
use serde::Serialize;

/// Outcome for a single record: the aggregate result and its grade.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Evaluation {
    pub result: Option<f64>,
    pub grade: Option<Grade>,
}
