use plotly::common::{ColorScale, ColorScalePalette};
use plotly::layout::{Axis, Layout};
use plotly::{Bar, HeatMap, Plot};

use crate::evaluation::ModelResult;
use crate::metrics::ConfusionMatrix;

/// Plot a confusion matrix as a heatmap (x = predicted class, y = true class).
pub fn plot_confusion_matrix(cm: &ConfusionMatrix, title: &str) -> Plot {
    let labels: Vec<String> = cm.labels().iter().map(|l| l.to_string()).collect();

    let trace = HeatMap::new(labels.clone(), labels, cm.counts().to_vec())
        .name("count")
        .color_scale(ColorScale::Palette(ColorScalePalette::Blues));

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Predicted class"))
        .y_axis(Axis::new().title("True class"));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

/// Bar chart of test accuracy per model.
pub fn plot_model_comparison(results: &[ModelResult], title: &str) -> Plot {
    let names: Vec<String> = results.iter().map(|r| r.model_name.clone()).collect();
    let accuracy: Vec<f64> = results.iter().map(|r| r.accuracy).collect();

    let trace = Bar::new(names, accuracy).name("Accuracy");

    let layout = Layout::new()
        .title(title)
        .x_axis(Axis::new().title("Model"))
        .y_axis(Axis::new().title("Accuracy").range(vec![0.0, 1.0]));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    plot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_matrix_heatmap() {
        let cm = ConfusionMatrix::from_predictions(&[1, 2, 2], &[1, 2, 1]).unwrap();
        let json = plot_confusion_matrix(&cm, "Gradient Boosting").to_json();
        assert!(json.contains("heatmap"));
        assert!(json.contains("Gradient Boosting"));
        assert!(json.contains("Predicted class"));
    }
}
