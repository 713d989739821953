use crate::table::Cell;

/// Coerces a raw cell to a finite number. Anything else is missing (`None`).
///
/// Text is trimmed before parsing. Booleans count as 1 and 0.
pub fn coerce(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Empty => return None,
        Cell::Number(n) => *n,
        Cell::Bool(b) => f64::from(u8::from(*b)),
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    #[test]
    fn test_coerce_numbers_and_text() {
        assert_eq!(coerce(&Cell::Number(2.5)), Some(2.5));
        assert_eq!(coerce(&text("0.9")), Some(0.9));
        assert_eq!(coerce(&text(" 3 ")), Some(3.0));
        assert_eq!(coerce(&text("-1e2")), Some(-100.0));
        assert_eq!(coerce(&Cell::Bool(true)), Some(1.0));
        assert_eq!(coerce(&Cell::Bool(false)), Some(0.0));
    }

    #[test]
    fn test_coerce_missing() {
        assert_eq!(coerce(&Cell::Empty), None);
        assert_eq!(coerce(&text("")), None);
        assert_eq!(coerce(&text("n/a")), None);
        assert_eq!(coerce(&text("1,5")), None);
        assert_eq!(coerce(&text("NaN")), None);
        assert_eq!(coerce(&text("inf")), None);
        assert_eq!(coerce(&Cell::Number(f64::NAN)), None);
        assert_eq!(coerce(&Cell::Number(f64::NEG_INFINITY)), None);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[2.5]), Some(2.5));
    }
}
