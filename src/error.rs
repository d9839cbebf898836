//! Error types for operations that skip work instead of failing the frame.

use thiserror::Error;

use crate::series::YAxis;

/// Reasons a chart render was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlotError {
    /// No series carried any x data.
    #[error("the plot data is empty")]
    Empty,
    /// Numeric and categorical y data were mixed on one axis.
    #[error("mixing numerical and categorical data on the {axis} y axis, aborting plot")]
    MixedAxisKinds {
        /// Offending axis.
        axis: YAxis,
    },
}

/// Reasons an organizer rejected a child.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    /// The child is an organizer that was never closed.
    #[error("child has no finalized size")]
    Unfinalized,
    /// The child does not fit the remaining main-axis extent.
    #[error("child needs {needed} px along the main axis, {available} px left")]
    Overflow {
        /// Space the child would consume including spacing.
        needed: f32,
        /// Space still available.
        available: f32,
    },
    /// The child is wider than the organizer allows.
    #[error("child width {width} exceeds the limit of {limit}")]
    TooWide {
        /// Child width.
        width: f32,
        /// Width limit.
        limit: f32,
    },
    /// The child is taller than the organizer allows.
    #[error("child height {height} exceeds the limit of {limit}")]
    TooTall {
        /// Child height.
        height: f32,
        /// Height limit.
        limit: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_axis() {
        let err = PlotError::MixedAxisKinds {
            axis: YAxis::Secondary,
        };
        assert!(err.to_string().contains("secondary"));
        assert_eq!(PlotError::Empty.to_string(), "the plot data is empty");
    }
}
