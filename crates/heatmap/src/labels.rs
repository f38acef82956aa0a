//! Y-axis labeling of heatmap rows.

use std::fmt;

use serde::Serialize;

/// Which row of the labeling table a decomposition falls in.
///
/// | Rule | Labels top -> bottom |
/// |------|----------------------|
/// | [`LabelRule::FullDepth`] | `max, ..., 1` |
/// | [`LabelRule::FullDepthWithApprox`] | `approx, max, ..., 1` |
/// | [`LabelRule::Window`] | `max, ..., max - n + 1` |
/// | [`LabelRule::WindowWithApprox`] | `approx, max, ..., max - n + 2` |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelRule {
    /// All detail levels, no approximation band.
    FullDepth,
    /// Approximation band plus all detail levels.
    FullDepthWithApprox,
    /// A window of detail levels anchored at `max`.
    Window,
    /// Approximation band plus a window anchored at `max`.
    WindowWithApprox,
}

impl LabelRule {
    /// Picks the rule for `n_levels` rows against the filter's `max_level`.
    pub fn select(approx: bool, n_levels: usize, max_level: usize) -> Self {
        let full = n_levels == max_level + usize::from(approx);
        match (approx, full) {
            (false, true) => Self::FullDepth,
            (true, true) => Self::FullDepthWithApprox,
            (false, false) => Self::Window,
            (true, false) => Self::WindowWithApprox,
        }
    }

    /// Returns `true` when the first row is the approximation band.
    pub fn has_approx(&self) -> bool {
        matches!(self, Self::FullDepthWithApprox | Self::WindowWithApprox)
    }

    /// Produces one label per row, top row first.
    pub fn labels(&self, n_levels: usize, max_level: usize) -> Vec<YLabel> {
        let max = max_level as i64;
        let n = n_levels as i64;
        let mut labels = Vec::with_capacity(n_levels);
        let numeric = match self {
            Self::FullDepth => (1..=max).rev().collect::<Vec<_>>(),
            Self::FullDepthWithApprox => {
                labels.push(YLabel::Approx);
                (1..=max).rev().collect()
            }
            Self::Window => (max - n + 1..=max).rev().collect(),
            Self::WindowWithApprox => {
                labels.push(YLabel::Approx);
                (max - n + 2..=max).rev().collect()
            }
        };
        labels.extend(numeric.into_iter().map(YLabel::Level));
        labels
    }
}

/// A single row label.
///
/// Serializes as the string `"approx"` or as a bare integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum YLabel {
    /// The approximation band.
    Approx,
    /// A detail level number; negative past the DWT maximum.
    Level(i64),
}

impl Serialize for YLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Approx => serializer.serialize_str("approx"),
            Self::Level(l) => serializer.serialize_i64(*l),
        }
    }
}

impl fmt::Display for YLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approx => f.write_str("approx"),
            Self::Level(l) => write!(f, "{l}"),
        }
    }
}

/// Labels `n_levels` rows, selecting the rule first.
pub fn y_labels(approx: bool, n_levels: usize, max_level: usize) -> Vec<YLabel> {
    LabelRule::select(approx, n_levels, max_level).labels(n_levels, max_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(labels: &[YLabel]) -> Vec<i64> {
        labels
            .iter()
            .filter_map(|l| match l {
                YLabel::Level(v) => Some(*v),
                YLabel::Approx => None,
            })
            .collect()
    }

    #[test]
    fn select_rules() {
        assert_eq!(LabelRule::select(false, 3, 3), LabelRule::FullDepth);
        assert_eq!(LabelRule::select(true, 4, 3), LabelRule::FullDepthWithApprox);
        assert_eq!(LabelRule::select(false, 2, 3), LabelRule::Window);
        assert_eq!(LabelRule::select(true, 2, 3), LabelRule::WindowWithApprox);
        // approx hidden but the row count happens to equal max + 1
        assert_eq!(LabelRule::select(false, 4, 3), LabelRule::Window);
    }

    #[test]
    fn full_depth() {
        let labels = y_labels(false, 3, 3);
        assert_eq!(levels(&labels), vec![3, 2, 1]);
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn full_depth_with_approx() {
        let labels = y_labels(true, 4, 3);
        assert_eq!(labels[0], YLabel::Approx);
        assert_eq!(levels(&labels), vec![3, 2, 1]);
    }

    #[test]
    fn window_without_approx() {
        assert_eq!(levels(&y_labels(false, 2, 5)), vec![5, 4]);
    }

    #[test]
    fn window_with_approx() {
        let labels = y_labels(true, 2, 3);
        assert_eq!(labels, vec![YLabel::Approx, YLabel::Level(3)]);
    }

    #[test]
    fn window_past_max_goes_negative() {
        // stationary depth 5 on a filter whose DWT max is 2
        assert_eq!(levels(&y_labels(false, 5, 2)), vec![2, 1, 0, -1, -2]);
    }

    #[test]
    fn approx_only() {
        assert_eq!(y_labels(true, 1, 3), vec![YLabel::Approx]);
        assert_eq!(y_labels(true, 1, 0), vec![YLabel::Approx]);
    }

    #[test]
    fn label_count_matches_rows() {
        for max in 0..6 {
            for n in 1..8 {
                for approx in [false, true] {
                    assert_eq!(y_labels(approx, n, max).len(), n, "{approx} {n} {max}");
                }
            }
        }
    }

    #[test]
    fn display() {
        assert_eq!(YLabel::Approx.to_string(), "approx");
        assert_eq!(YLabel::Level(-2).to_string(), "-2");
    }

    #[test]
    fn rule_has_approx() {
        assert!(LabelRule::WindowWithApprox.has_approx());
        assert!(!LabelRule::Window.has_approx());
    }
}
