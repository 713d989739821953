use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::grading::grade::{Category, Grade};
use crate::grading::types::Evaluation;
use crate::grading::utility::mean;

/// Number of records that received one grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeCount {
    pub grade: Grade,
    pub count: usize,
}

/// Run-level summary of a graded table.
#[derive(Debug, Serialize)]
pub struct GradeSummary {
    pub generated_at: DateTime<Utc>,
    pub category: Category,
    pub category_label: String,
    pub records: usize,
    pub with_result: usize,
    pub graded: usize,

    /// Most frequent grade first; grades nobody received are left out.
    pub counts: Vec<GradeCount>,
    /// Mean of the present results, `None` when no record has one.
    pub mean_result: Option<f64>,
}

impl GradeSummary {
    pub fn from_evaluations(category: Category, evaluations: &[Evaluation]) -> Self {
        let results: Vec<f64> = evaluations.iter().filter_map(|e| e.result).collect();

        let mut counts: Vec<GradeCount> = category
            .thresholds()
            .labels()
            .into_iter()
            .map(|grade| GradeCount {
                grade,
                count: evaluations.iter().filter(|e| e.grade == Some(grade)).count(),
            })
            .filter(|c| c.count > 0)
            .collect();
        // stable sort keeps label order among equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        GradeSummary {
            generated_at: Utc::now(),
            category,
            category_label: category.label().to_string(),
            records: evaluations.len(),
            with_result: results.len(),
            graded: counts.iter().map(|c| c.count).sum(),
            counts,
            mean_result: mean(&results),
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn graded_pct(&self) -> f64 {
        Self::pct(self.graded, self.records)
    }

    pub fn count_of(&self, grade: Grade) -> usize {
        self.counts
            .iter()
            .find(|c| c.grade == grade)
            .map_or(0, |c| c.count)
    }
}
