//! Property-based tests for record reduction and grading
//!
//! - The aggregate is the mean of non-missing scores at maximal reliability
//! - No reliability means no result and no grade
//! - Grades stay within the category's labels and the [1, 3] scale
//! - Parallel and sequential evaluation agree

use proptest::prelude::*;
use vega_grader::columns::ColumnPairing;
use vega_grader::config::ColumnConfig;
use vega_grader::grading::aggregate::{evaluate_records, reduce};
use vega_grader::grading::grade::Category;
use vega_grader::table::{Cell, Record};

/// Reliability drawn from a small set so ties are common
fn reliability() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => prop::sample::select(vec![0.1, 0.5, 0.9, 1.0]).prop_map(Some),
    ]
}

fn score() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        1 => Just(None),
        4 => (0.0f64..4.0).prop_map(Some),
    ]
}

fn pairs() -> impl Strategy<Value = Vec<(Option<f64>, Option<f64>)>> {
    prop::collection::vec((reliability(), score()), 1..6)
}

fn category() -> impl Strategy<Value = Category> {
    prop_oneof![Just(Category::A), Just(Category::B)]
}

fn to_cell(v: Option<f64>) -> Cell {
    v.map_or(Cell::Empty, |n| Cell::Text(n.to_string()))
}

proptest! {
    #[test]
    fn prop_result_is_mean_of_max_reliability_scores(pairs in pairs()) {
        let (r, s): (Vec<_>, Vec<_>) = pairs.iter().copied().unzip();
        let result = reduce(&r, &s);

        let max = r.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
        let winners: Vec<f64> = pairs
            .iter()
            .filter(|(rel, _)| *rel == Some(max))
            .filter_map(|(_, sc)| *sc)
            .collect();

        if winners.is_empty() {
            prop_assert_eq!(result, None);
        } else {
            let expected = winners.iter().sum::<f64>() / winners.len() as f64;
            prop_assert_eq!(result, Some(expected));
        }
    }

    #[test]
    fn prop_no_reliability_means_no_result(scores in prop::collection::vec(score(), 1..6)) {
        let r = vec![None; scores.len()];
        prop_assert_eq!(reduce(&r, &scores), None);
    }

    #[test]
    fn prop_grade_within_scale(x in -1.0f64..5.0, category in category()) {
        let grade = category.grade(Some(x));
        if (1.0..=3.0).contains(&x) {
            let grade = grade.expect("in-range result must be graded");
            prop_assert!(category.thresholds().labels().contains(&grade));
        } else {
            prop_assert_eq!(grade, None);
        }
    }

    #[test]
    fn prop_parallel_matches_sequential(
        rows in prop::collection::vec(prop::collection::vec((reliability(), score()), 3), 0..40),
        category in category(),
    ) {
        let headers: Vec<String> = (0..3)
            .flat_map(|i| [format!("Score_{i}"), format!("Reliability_{i}")])
            .collect();
        let pairing = ColumnPairing::from_headers(&headers, &ColumnConfig::default()).unwrap();
        let records: Vec<Record> = rows
            .iter()
            .map(|row| Record::new(row.iter().flat_map(|(r, s)| [to_cell(*s), to_cell(*r)]).collect()))
            .collect();

        let seq = evaluate_records(&records, &pairing, category, false);
        let par = evaluate_records(&records, &pairing, category, true);
        prop_assert_eq!(seq, par);
    }
}
