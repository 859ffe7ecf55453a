//! Algorithm steps as produced by the analysis backend.
//!
//! Each step is one JSON object tagged by `"type"`. Sorting steps usually
//! carry a full `array` snapshot taken after the step; searching steps never
//! do. Index fields are signed because the producer emits `-1` bounds once a
//! binary search window collapses.

use serde::{Deserialize, Serialize};

/// Array element value. The backend sends integers or floats.
pub type Value = f64;

/// One recorded step of a sorting or searching algorithm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Two elements (sorting) or one element (searching) are compared
    Compare {
        #[serde(default)]
        indices: Option<[i64; 2]>,
        #[serde(default)]
        index: Option<i64>,
        #[serde(default)]
        value: Option<Value>,
        #[serde(default)]
        target: Option<Value>,
        #[serde(default)]
        left: Option<i64>,
        #[serde(default)]
        right: Option<i64>,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    Swap {
        indices: [i64; 2],
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    Select {
        index: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    /// Selection sort found a smaller candidate
    NewMin {
        index: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    Found {
        index: i64,
        #[serde(default)]
        value: Option<Value>,
    },
    /// Binary search discarded everything left of `new_left`
    EliminateLeft { new_left: i64, right: i64 },
    /// Binary search discarded everything right of `new_right`
    EliminateRight { left: i64, new_right: i64 },
    NotFound {
        #[serde(default)]
        target: Option<Value>,
    },
    SelectPivot {
        pivot_index: i64,
        left: i64,
        right: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    PartitionCompare {
        comparing_index: i64,
        pivot_index: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    /// Element moved into the "less or equal than pivot" side
    PartitionMove {
        element_index: i64,
        pivot_index: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    /// Element stays on the "greater than pivot" side
    PartitionGreater {
        element_index: i64,
        pivot_index: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    PlacePivot {
        final_position: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    Divide {
        left_half: Vec<i64>,
        right_half: Vec<i64>,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    MergeCompare {
        left_index: i64,
        right_index: i64,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    MergePlace {
        target_index: i64,
        #[serde(default)]
        source_value: Option<Value>,
        #[serde(default)]
        merge_range: Option<[i64; 2]>,
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    MergeComplete {
        merged_range: [i64; 2],
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
    Complete {
        #[serde(default)]
        array: Option<Vec<Value>>,
    },
}

impl Step {
    /// Full array state carried by this step, if any
    pub fn snapshot(&self) -> Option<&[Value]> {
        match self {
            Step::Compare { array, .. }
            | Step::Swap { array, .. }
            | Step::Select { array, .. }
            | Step::NewMin { array, .. }
            | Step::SelectPivot { array, .. }
            | Step::PartitionCompare { array, .. }
            | Step::PartitionMove { array, .. }
            | Step::PartitionGreater { array, .. }
            | Step::PlacePivot { array, .. }
            | Step::Divide { array, .. }
            | Step::MergeCompare { array, .. }
            | Step::MergePlace { array, .. }
            | Step::MergeComplete { array, .. }
            | Step::Complete { array } => array.as_deref(),
            Step::Found { .. }
            | Step::EliminateLeft { .. }
            | Step::EliminateRight { .. }
            | Step::NotFound { .. } => None,
        }
    }

    /// Wire name of the step type
    pub fn name(&self) -> &'static str {
        match self {
            Step::Compare { .. } => "compare",
            Step::Swap { .. } => "swap",
            Step::Select { .. } => "select",
            Step::NewMin { .. } => "new_min",
            Step::Found { .. } => "found",
            Step::EliminateLeft { .. } => "eliminate_left",
            Step::EliminateRight { .. } => "eliminate_right",
            Step::NotFound { .. } => "not_found",
            Step::SelectPivot { .. } => "select_pivot",
            Step::PartitionCompare { .. } => "partition_compare",
            Step::PartitionMove { .. } => "partition_move",
            Step::PartitionGreater { .. } => "partition_greater",
            Step::PlacePivot { .. } => "place_pivot",
            Step::Divide { .. } => "divide",
            Step::MergeCompare { .. } => "merge_compare",
            Step::MergePlace { .. } => "merge_place",
            Step::MergeComplete { .. } => "merge_complete",
            Step::Complete { .. } => "complete",
        }
    }

    /// One-line caption shown under the bars
    pub fn describe(&self) -> String {
        match self {
            Step::Compare {
                indices: Some([a, b]),
                ..
            } => format!("Comparing positions {} and {}", a, b),
            Step::Compare {
                index: Some(i),
                value,
                target,
                ..
            } => match (value, target) {
                (Some(v), Some(t)) => format!("Checking position {}: {} vs target {}", i, v, t),
                _ => format!("Checking position {}", i),
            },
            Step::Compare { .. } => "Comparing".to_string(),
            Step::Swap { indices: [a, b], .. } => format!("Swapping positions {} and {}", a, b),
            Step::Select { index, .. } => format!("Selecting position {}", index),
            Step::NewMin { index, .. } => format!("New minimum at position {}", index),
            Step::Found { index, .. } => format!("Found target at position {}", index),
            Step::EliminateLeft { new_left, right } => {
                format!("Target is larger: searching {}..={}", new_left, right)
            }
            Step::EliminateRight { left, new_right } => {
                format!("Target is smaller: searching {}..={}", left, new_right)
            }
            Step::NotFound { target: Some(t) } => format!("{} is not in the array", t),
            Step::NotFound { target: None } => "Target is not in the array".to_string(),
            Step::SelectPivot { pivot_index, .. } => {
                format!("Pivot chosen at position {}", pivot_index)
            }
            Step::PartitionCompare {
                comparing_index, ..
            } => format!("Comparing position {} with the pivot", comparing_index),
            Step::PartitionMove { element_index, .. } => {
                format!("Position {} goes left of the pivot", element_index)
            }
            Step::PartitionGreater { element_index, .. } => {
                format!("Position {} stays right of the pivot", element_index)
            }
            Step::PlacePivot { final_position, .. } => {
                format!("Pivot placed at position {}", final_position)
            }
            Step::Divide {
                left_half,
                right_half,
                ..
            } => format!(
                "Dividing into {} and {} elements",
                left_half.len(),
                right_half.len()
            ),
            Step::MergeCompare {
                left_index,
                right_index,
                ..
            } => format!("Merging: comparing {} and {}", left_index, right_index),
            Step::MergePlace { target_index, .. } => {
                format!("Placing value at position {}", target_index)
            }
            Step::MergeComplete {
                merged_range: [a, b],
                ..
            } => format!("Merged positions {}..={}", a, b),
            Step::Complete { .. } => "Sorting complete".to_string(),
        }
    }
}
