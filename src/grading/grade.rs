use serde::Serialize;
use std::fmt;

/// Ordinal grade assigned to an aggregate result. `L < M < H`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    L,
    M,
    H,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::L => "L",
            Grade::M => "M",
            Grade::H => "H",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Threshold scheme selector, fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
pub enum Category {
    /// Two-tier grading (I类): L, M
    #[value(alias = "i")]
    A,
    /// Three-tier grading (II类): L, M, H
    #[value(alias = "ii")]
    B,
}

impl Category {
    /// Human label used in reports and default output file names.
    pub fn label(self) -> &'static str {
        match self {
            Category::A => "I类",
            Category::B => "II类",
        }
    }

    pub fn thresholds(self) -> &'static ThresholdTable {
        match self {
            Category::A => &TWO_TIER,
            Category::B => &THREE_TIER,
        }
    }

    /// Grades an aggregate result under this category.
    pub fn grade(self, result: Option<f64>) -> Option<Grade> {
        self.thresholds().grade(result?)
    }
}

/// One contiguous range of the grading scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub lower_inclusive: bool,
    pub upper: f64,
    pub grade: Grade,
}

impl Band {
    /// Upper bounds are always inclusive.
    pub fn contains(&self, x: f64) -> bool {
        let above = if self.lower_inclusive {
            x >= self.lower
        } else {
            x > self.lower
        };
        above && x <= self.upper
    }
}

/// Ordered, non-overlapping bands for one category.
#[derive(Debug)]
pub struct ThresholdTable {
    pub bands: &'static [Band],
}

impl ThresholdTable {
    /// Returns the grade of the band containing `x`, or `None` outside every band.
    pub fn grade(&self, x: f64) -> Option<Grade> {
        self.bands.iter().find(|b| b.contains(x)).map(|b| b.grade)
    }

    /// Grades this table can produce, lowest first.
    pub fn labels(&self) -> Vec<Grade> {
        self.bands.iter().map(|b| b.grade).collect()
    }
}

impl fmt::Display for ThresholdTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for band in self.bands {
            let op = if band.lower_inclusive { "≤" } else { "<" };
            writeln!(
                f,
                "{}: {} {} result ≤ {}",
                band.grade, band.lower, op, band.upper
            )?;
        }
        Ok(())
    }
}

/// Category A scale.
///
/// | Range          | Grade |
/// |----------------|-------|
/// | 1 ≤ x ≤ 2      | L     |
/// | 2 < x ≤ 3      | M     |
static TWO_TIER: ThresholdTable = ThresholdTable {
    bands: &[
        Band {
            lower: 1.0,
            lower_inclusive: true,
            upper: 2.0,
            grade: Grade::L,
        },
        Band {
            lower: 2.0,
            lower_inclusive: false,
            upper: 3.0,
            grade: Grade::M,
        },
    ],
};

/// Category B scale.
///
/// | Range            | Grade |
/// |------------------|-------|
/// | 1 ≤ x ≤ 1.67     | L     |
/// | 1.67 < x ≤ 2.33  | M     |
/// | 2.33 < x ≤ 3     | H     |
static THREE_TIER: ThresholdTable = ThresholdTable {
    bands: &[
        Band {
            lower: 1.0,
            lower_inclusive: true,
            upper: 1.67,
            grade: Grade::L,
        },
        Band {
            lower: 1.67,
            lower_inclusive: false,
            upper: 2.33,
            grade: Grade::M,
        },
        Band {
            lower: 2.33,
            lower_inclusive: false,
            upper: 3.0,
            grade: Grade::H,
        },
    ],
};
