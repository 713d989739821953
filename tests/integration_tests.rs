use std::path::Path;
use vega_grader::config::ColumnConfig;
use vega_grader::grading::analyzer::{RunOptions, run};
use vega_grader::grading::grade::{Category, Grade};
use vega_grader::parser::read_table;
use vega_grader::table::Cell;

const FIXTURE: &str = "tests/fixtures/sample_scores.csv";

fn derived_columns(path: &Path) -> (Vec<Cell>, Vec<Cell>) {
    let table = read_table(path).expect("Failed to read graded output");
    let results = table.column_index("Results").unwrap();
    let grade = table.column_index("Grade").unwrap();
    table
        .records
        .iter()
        .map(|r| (r.get(results).clone(), r.get(grade).clone()))
        .unzip()
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_string())
}

#[test]
fn test_full_pipeline_two_tier() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("graded.csv");
    let summary_path = dir.path().join("summary.json");
    let config = ColumnConfig::default();

    let summary = run(&RunOptions {
        input: Path::new(FIXTURE),
        output: Some(output.as_path()),
        summary_json: Some(summary_path.as_path()),
        category: Category::A,
        config: &config,
        parallel: true,
    })
    .expect("Failed to grade fixture");

    assert_eq!(summary.records, 7);
    assert_eq!(summary.with_result, 5);
    assert_eq!(summary.count_of(Grade::L), 3);
    assert_eq!(summary.count_of(Grade::M), 1);
    assert!(summary_path.exists());

    let (results, grades) = derived_columns(&output);
    assert_eq!(
        results,
        vec![text("2"), text("2"), Cell::Empty, text("1.7"), text("2.4"), text("4"), Cell::Empty]
    );
    assert_eq!(
        grades,
        vec![text("L"), text("L"), Cell::Empty, text("L"), text("M"), Cell::Empty, Cell::Empty]
    );
}

#[test]
fn test_full_pipeline_three_tier_keeps_input_columns() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("graded.xlsx");
    let config = ColumnConfig::default();

    run(&RunOptions {
        input: Path::new(FIXTURE),
        output: Some(output.as_path()),
        summary_json: None,
        category: Category::B,
        config: &config,
        parallel: false,
    })
    .expect("Failed to grade fixture");

    let input = read_table(Path::new(FIXTURE)).unwrap();
    let graded = read_table(&output).unwrap();
    assert_eq!(graded.headers[..input.headers.len()], input.headers[..]);
    assert_eq!(graded.headers.len(), input.headers.len() + 2);

    let (_, grades) = derived_columns(&output);
    assert_eq!(
        grades,
        vec![text("M"), text("M"), Cell::Empty, text("M"), text("H"), Cell::Empty, Cell::Empty]
    );
}

#[test]
fn test_regrading_output_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");
    let config = ColumnConfig::default();

    for (input, output) in [(Path::new(FIXTURE), &first), (first.as_path(), &second)] {
        run(&RunOptions {
            input,
            output: Some(output.as_path()),
            summary_json: None,
            category: Category::B,
            config: &config,
            parallel: true,
        })
        .unwrap();
    }

    assert_eq!(
        std::fs::read_to_string(&first).unwrap(),
        std::fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_mismatched_columns_fail_fast() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    let output = dir.path().join("out.csv");
    std::fs::write(&input, "Score_A,Score_B,Reliability_A\n1,2,0.5\n").unwrap();
    let config = ColumnConfig::default();

    let err = run(&RunOptions {
        input: &input,
        output: Some(output.as_path()),
        summary_json: None,
        category: Category::A,
        config: &config,
        parallel: true,
    })
    .unwrap_err();

    assert!(err.to_string().contains("2 score columns but 1 reliability"));
    assert!(!output.exists());
}
