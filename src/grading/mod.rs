//! Record reduction and grading.
//!
//! Each record's paired score and reliability cells are coerced to numbers,
//! reduced to one aggregate result via the highest-reliability rule, and
//! classified into an ordinal grade by the selected category's thresholds.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod types;
pub mod utility;
