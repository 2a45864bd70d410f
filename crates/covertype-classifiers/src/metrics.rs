//! Scoring of predicted against actual class labels.
//!
//! All functions are pure: they only read the label slices they are given.
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::error::MetricsError;

fn check_lengths(actual: &[usize], predicted: &[usize]) -> Result<(), MetricsError> {
    if actual.len() != predicted.len() {
        return Err(MetricsError::LengthMismatch {
            actual: actual.len(),
            predicted: predicted.len(),
        });
    }
    if actual.is_empty() {
        return Err(MetricsError::EmptyInput);
    }
    Ok(())
}

/// Fraction of positions where `predicted` equals `actual`.
pub fn accuracy(actual: &[usize], predicted: &[usize]) -> Result<f64, MetricsError> {
    check_lengths(actual, predicted)?;
    let correct = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a == p)
        .count();
    Ok(correct as f64 / actual.len() as f64)
}

/// Square count matrix indexed by class label.
///
/// Entry `(i, j)` counts samples of true class `labels[i]` predicted as class
/// `labels[j]`. `labels` is the sorted union of actual and predicted labels,
/// so a class that was only ever predicted still gets a (zero-support) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    labels: Vec<usize>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[usize], predicted: &[usize]) -> Result<Self, MetricsError> {
        check_lengths(actual, predicted)?;

        let index: BTreeMap<usize, usize> = actual
            .iter()
            .chain(predicted)
            .copied()
            .collect::<BTreeSet<usize>>()
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect();

        let n = index.len();
        let mut counts = vec![vec![0usize; n]; n];
        for (a, p) in actual.iter().zip(predicted) {
            counts[index[a]][index[p]] += 1;
        }

        let labels = index.into_keys().collect();
        Ok(ConfusionMatrix { labels, counts })
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Row-major counts, rows are actual classes.
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    fn index_of(&self, label: usize) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Count of samples of class `actual` predicted as `predicted`.
    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        match (self.index_of(actual), self.index_of(predicted)) {
            (Some(i), Some(j)) => self.counts[i][j],
            _ => 0,
        }
    }

    /// Number of samples whose true class is `label` (the row sum).
    pub fn support(&self, label: usize) -> usize {
        self.index_of(label)
            .map(|i| self.counts[i].iter().sum())
            .unwrap_or(0)
    }

    fn predicted_count(&self, label: usize) -> usize {
        self.index_of(label)
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.correct() as f64 / total as f64
    }

    /// Precision for `label`; 0.0 when the class was never predicted.
    pub fn precision(&self, label: usize) -> f64 {
        let predicted = self.predicted_count(label);
        if predicted == 0 {
            return 0.0;
        }
        self.get(label, label) as f64 / predicted as f64
    }

    /// Recall for `label`; 0.0 when the class has no support.
    pub fn recall(&self, label: usize) -> f64 {
        let support = self.support(label);
        if support == 0 {
            return 0.0;
        }
        self.get(label, label) as f64 / support as f64
    }

    pub fn f1_score(&self, label: usize) -> f64 {
        let p = self.precision(label);
        let r = self.recall(label);
        if p + r == 0.0 {
            return 0.0;
        }
        2.0 * p * r / (p + r)
    }
}

/// Per-class precision/recall/F1 and support.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Averaged precision/recall/F1 over classes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AveragedMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Text classification report in the familiar per-class table layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AveragedMetrics,
    pub weighted_avg: AveragedMetrics,
    pub support: usize,
}

impl ClassificationReport {
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let classes: Vec<ClassMetrics> = cm
            .labels()
            .iter()
            .map(|&label| ClassMetrics {
                label,
                precision: cm.precision(label),
                recall: cm.recall(label),
                f1_score: cm.f1_score(label),
                support: cm.support(label),
            })
            .collect();

        let n = classes.len().max(1) as f64;
        let macro_avg = AveragedMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1_score: classes.iter().map(|c| c.f1_score).sum::<f64>() / n,
        };

        let support = cm.total();
        let weight = |c: &ClassMetrics| c.support as f64 / support.max(1) as f64;
        let weighted_avg = AveragedMetrics {
            precision: classes.iter().map(|c| c.precision * weight(c)).sum(),
            recall: classes.iter().map(|c| c.recall * weight(c)).sum(),
            f1_score: classes.iter().map(|c| c.f1_score * weight(c)).sum(),
        };

        ClassificationReport {
            classes,
            accuracy: cm.accuracy(),
            macro_avg,
            weighted_avg,
            support,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10} {:>10}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.label, c.precision, c.recall, c.f1_score, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.support
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>12} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, avg.precision, avg.recall, avg.f1_score, self.support
            )?;
        }
        Ok(())
    }
}
