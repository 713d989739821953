use crate::columns::ColumnPairing;
use crate::grading::grade::Category;
use crate::grading::types::Evaluation;
use crate::grading::utility::{coerce, mean};
use crate::table::Record;
use rayon::prelude::*;

/// Reduces paired reliabilities and scores to one aggregate value.
///
/// Selects every position whose reliability equals the greatest non-missing
/// reliability (exact equality) and averages the non-missing scores there.
/// Returns `None` when no reliability is present or every winning score is
/// missing.
pub fn reduce(reliabilities: &[Option<f64>], scores: &[Option<f64>]) -> Option<f64> {
    let max = reliabilities
        .iter()
        .flatten()
        .copied()
        .reduce(f64::max)?;

    let candidates: Vec<f64> = reliabilities
        .iter()
        .zip(scores)
        .filter(|(r, _)| **r == Some(max))
        .filter_map(|(_, s)| *s)
        .collect();

    mean(&candidates)
}

/// Coerces the paired cells of `record`, reduces them and grades the result.
pub fn evaluate_record(record: &Record, pairing: &ColumnPairing, category: Category) -> Evaluation {
    let (reliabilities, scores): (Vec<_>, Vec<_>) = pairing
        .pairs()
        .iter()
        .map(|p| {
            (
                coerce(record.get(p.reliability_index)),
                coerce(record.get(p.score_index)),
            )
        })
        .unzip();

    let result = reduce(&reliabilities, &scores);
    Evaluation {
        result,
        grade: category.grade(result),
    }
}

/// Evaluates every record, in input order.
///
/// Records are independent, so by default they are spread over the rayon
/// pool; `parallel = false` runs on the calling thread. Output is identical
/// either way.
pub fn evaluate_records(
    records: &[Record],
    pairing: &ColumnPairing,
    category: Category,
    parallel: bool,
) -> Vec<Evaluation> {
    if parallel {
        records
            .par_iter()
            .map(|r| evaluate_record(r, pairing, category))
            .collect()
    } else {
        records
            .iter()
            .map(|r| evaluate_record(r, pairing, category))
            .collect()
    }
}
