//! Chart descriptors handed to a rendering surface.
//!
//! These describe what to draw (points, colors, labels, counts); they carry
//! no numeric meaning and are not a stable serialized interface.

use serde::{Deserialize, Serialize};

/// A single labelled point on a marker chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Present only on three-dimensional charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    /// A CSS-style color name, e.g. "red" or "lightblue".
    pub color: String,
    pub size: u16,
}

/// A scatter of labelled markers, in two or three dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerChart {
    pub title: String,
    pub markers: Vec<Marker>,
    /// Background color for the plot area, if the chart asks for one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl MarkerChart {
    /// True when every marker carries a `z` coordinate.
    pub fn is_three_d(&self) -> bool {
        !self.markers.is_empty() && self.markers.iter().all(|m| m.z.is_some())
    }
}

/// One labelled wedge of a pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of every slice value.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
}
