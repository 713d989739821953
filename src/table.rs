//! In-memory tabular records.
//!
//! A [`Table`] is an ordered header list shared by every [`Record`]. Records
//! are rows of raw [`Cell`]s in header order.

use std::fmt;

/// A raw cell value as read from the source table.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Wraps a CSV field: blank fields become [`Cell::Empty`].
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Number)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// One row of a [`Table`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub cells: Vec<Cell>,
}

impl Record {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Cell at column `index`; short rows read as blank.
    pub fn get(&self, index: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.cells.get(index).unwrap_or(&EMPTY)
    }

    fn set(&mut self, index: usize, cell: Cell) {
        if self.cells.len() <= index {
            self.cells.resize(index + 1, Cell::Empty);
        }
        self.cells[index] = cell;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Writes `values` into column `name`, one per record.
    ///
    /// An existing column of that name is overwritten in place; otherwise the
    /// column is appended after the last header. Values beyond the record
    /// count are ignored.
    pub fn set_column(&mut self, name: &str, values: impl IntoIterator<Item = Cell>) {
        let index = match self.column_index(name) {
            Some(i) => i,
            None => {
                self.headers.push(name.to_string());
                self.headers.len() - 1
            }
        };

        let mut values = values.into_iter();
        for record in &mut self.records {
            record.set(index, values.next().unwrap_or_default());
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
