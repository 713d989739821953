//! Score/reliability column discovery.

use crate::config::ColumnConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PairingError {
    #[error("found {scores} score columns but {reliabilities} reliability columns")]
    CountMismatch { scores: usize, reliabilities: usize },
    #[error("no score/reliability columns found (markers '{score_marker}' and '{reliability_marker}')")]
    NoPairs {
        score_marker: String,
        reliability_marker: String,
    },
}

/// Splits column names into score and reliability groups, each in
/// first-appearance order.
///
/// A name containing the reliability marker is a reliability column even if it
/// also contains the score marker. Names in neither group, and the derived
/// output columns, are ignored.
pub fn classify(names: &[String], config: &ColumnConfig) -> (Vec<String>, Vec<String>) {
    let mut scores = Vec::new();
    let mut reliabilities = Vec::new();

    for name in names {
        if config.is_derived(name) {
            continue;
        }
        if name.contains(&config.reliability_marker) {
            reliabilities.push(name.clone());
        } else if name.contains(&config.score_marker) {
            scores.push(name.clone());
        }
    }

    (scores, reliabilities)
}

/// A score column and the reliability column reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPair {
    pub score: String,
    pub score_index: usize,
    pub reliability: String,
    pub reliability_index: usize,
}

/// Immutable, validated positional pairing built once per table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPairing {
    pairs: Vec<ColumnPair>,
}

impl ColumnPairing {
    /// Classifies `headers` and pairs the i-th score column with the i-th
    /// reliability column.
    ///
    /// # Errors
    ///
    /// Fails when the two groups differ in size or are both empty.
    pub fn from_headers(headers: &[String], config: &ColumnConfig) -> Result<Self, PairingError> {
        let (scores, reliabilities) = classify(headers, config);

        if scores.len() != reliabilities.len() {
            return Err(PairingError::CountMismatch {
                scores: scores.len(),
                reliabilities: reliabilities.len(),
            });
        }
        if scores.is_empty() {
            return Err(PairingError::NoPairs {
                score_marker: config.score_marker.clone(),
                reliability_marker: config.reliability_marker.clone(),
            });
        }

        let score_idx = slot_indices(headers, &scores);
        let rel_idx = slot_indices(headers, &reliabilities);

        let pairs = scores
            .into_iter()
            .zip(score_idx)
            .zip(reliabilities.into_iter().zip(rel_idx))
            .map(|((score, score_index), (reliability, reliability_index))| ColumnPair {
                score,
                score_index,
                reliability,
                reliability_index,
            })
            .collect();

        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[ColumnPair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Header positions of `group`, in order. Duplicate names each claim their own slot.
fn slot_indices(headers: &[String], group: &[String]) -> Vec<usize> {
    let mut used = vec![false; headers.len()];
    let mut indices = Vec::with_capacity(group.len());

    for name in group {
        if let Some(i) = (0..headers.len()).find(|&i| !used[i] && &headers[i] == name) {
            used[i] = true;
            indices.push(i);
        }
    }

    indices
}
