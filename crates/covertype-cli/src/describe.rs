//! Quick look at an input table before training.
use std::fmt::Write;

use ndarray::Axis;

use covertype_classifiers::data_handling::TabularData;

/// Row/column counts, the class distribution and per-feature statistics.
pub fn describe(data: &TabularData) -> String {
    let mut out = String::new();
    let n = data.nsamples();

    let _ = writeln!(out, "rows: {}", n);
    let _ = writeln!(out, "features: {}", data.nfeatures());
    let _ = writeln!(out, "label column: {}", data.label_column);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>8} {:>10} {:>8}", "class", "count", "share");
    for (label, count) in data.class_counts() {
        let share = count as f64 / n.max(1) as f64;
        let _ = writeln!(out, "{:>8} {:>10} {:>7.1}%", label, count, share * 100.0);
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<40} {:>12} {:>12} {:>12} {:>12}",
        "feature", "mean", "std", "min", "max"
    );
    for (name, column) in data.feature_names.iter().zip(data.x.axis_iter(Axis(1))) {
        let mean = column.mean().unwrap_or(f64::NAN);
        let std = column.std(0.0);
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let _ = writeln!(
            out,
            "{:<40} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            name, mean, std, min, max
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array1};

    #[test]
    fn describe_lists_classes_and_features() {
        let data = TabularData::new(
            array![[1.0, 10.0], [3.0, 30.0], [5.0, 50.0]],
            Array1::from_vec(vec![2, 2, 5]),
            vec!["Elevation".into(), "Slope".into()],
            "Cover_Type",
        )
        .unwrap();

        let text = describe(&data);
        assert!(text.contains("rows: 3"));
        assert!(text.contains("features: 2"));
        assert!(text.contains("66.7%"));
        assert!(text.contains("33.3%"));
        assert!(text.contains("Elevation"));
        assert!(text.contains("50.000"));
    }
}
