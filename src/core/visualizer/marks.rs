//! Transient element highlighting.
//!
//! `MarkSet::for_step` is the only place that decides what a step *means*
//! visually. The replay engine just stores the result for the current frame.

use std::collections::BTreeMap;

use super::step::Step;

/// Visual class of one array element in the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementMark {
    Comparing,
    Swapping,
    Selected,
    Minimum,
    Found,
    Eliminated,
    Pivot,
    PartitionLess,
    PartitionGreater,
    PivotPlaced,
    LeftHalf,
    RightHalf,
    Merging,
    Merged,
    Sorted,
}

impl ElementMark {
    pub fn class_name(self) -> &'static str {
        match self {
            ElementMark::Comparing => "comparing",
            ElementMark::Swapping => "swapping",
            ElementMark::Selected => "selected",
            ElementMark::Minimum => "minimum",
            ElementMark::Found => "found",
            ElementMark::Eliminated => "eliminated",
            ElementMark::Pivot => "pivot",
            ElementMark::PartitionLess => "partition-less",
            ElementMark::PartitionGreater => "partition-greater",
            ElementMark::PivotPlaced => "pivot-placed",
            ElementMark::LeftHalf => "left-half",
            ElementMark::RightHalf => "right-half",
            ElementMark::Merging => "merging",
            ElementMark::Merged => "merged",
            ElementMark::Sorted => "sorted",
        }
    }
}

/// Marks for one frame, keyed by element index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSet {
    len: usize,
    marks: BTreeMap<usize, ElementMark>,
}

impl MarkSet {
    /// An empty set for an array of `len` elements
    pub fn new(len: usize) -> Self {
        Self {
            len,
            marks: BTreeMap::new(),
        }
    }

    /// Every element carries `mark`
    pub fn all(len: usize, mark: ElementMark) -> Self {
        let mut set = Self::new(len);
        set.fill(0, len as i64 - 1, mark);
        set
    }

    pub fn get(&self, index: usize) -> Option<ElementMark> {
        self.marks.get(&index).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, ElementMark)> + '_ {
        self.marks.iter().map(|(&i, &m)| (i, m))
    }

    /// Mark a single index; indices outside the array are dropped.
    pub fn set(&mut self, index: i64, mark: ElementMark) {
        match usize::try_from(index) {
            Ok(i) if i < self.len => {
                self.marks.insert(i, mark);
            }
            _ => tracing::trace!(index, len = self.len, "step index out of range, ignored"),
        }
    }

    /// Mark the inclusive range `[from, to]`, clipped to the array.
    pub fn fill(&mut self, from: i64, to: i64, mark: ElementMark) {
        let from = from.max(0);
        let to = to.min(self.len as i64 - 1);
        for i in from..=to {
            self.set(i, mark);
        }
    }

    /// Mark everything outside the inclusive window `[left, right]`.
    fn outside(&mut self, left: i64, right: i64, mark: ElementMark) {
        self.fill(0, left.saturating_sub(1), mark);
        self.fill(right.saturating_add(1), self.len as i64 - 1, mark);
    }

    /// Highlighting for `step` over an array of `len` elements.
    pub fn for_step(step: &Step, len: usize) -> Self {
        use ElementMark::*;

        let mut set = Self::new(len);
        match step {
            Step::Compare {
                indices,
                index,
                left,
                right,
                ..
            } => {
                if let (Some(l), Some(r)) = (left, right) {
                    set.outside(*l, *r, Eliminated);
                }
                if let Some([a, b]) = indices {
                    set.set(*a, Comparing);
                    set.set(*b, Comparing);
                }
                if let Some(i) = index {
                    set.set(*i, Comparing);
                }
            }
            Step::Swap { indices: [a, b], .. } => {
                set.set(*a, Swapping);
                set.set(*b, Swapping);
            }
            Step::Select { index, .. } => set.set(*index, Selected),
            Step::NewMin { index, .. } => set.set(*index, Minimum),
            Step::Found { index, .. } => set.set(*index, Found),
            Step::EliminateLeft { new_left, right } => set.outside(*new_left, *right, Eliminated),
            Step::EliminateRight { left, new_right } => set.outside(*left, *new_right, Eliminated),
            Step::NotFound { .. } => set.fill(0, len as i64 - 1, Eliminated),
            Step::SelectPivot {
                pivot_index,
                left,
                right,
                ..
            } => {
                set.outside(*left, *right, Eliminated);
                set.set(*pivot_index, Pivot);
            }
            Step::PartitionCompare {
                comparing_index,
                pivot_index,
                ..
            } => {
                set.set(*comparing_index, Comparing);
                set.set(*pivot_index, Pivot);
            }
            Step::PartitionMove {
                element_index,
                pivot_index,
                ..
            } => {
                set.set(*element_index, PartitionLess);
                set.set(*pivot_index, Pivot);
            }
            Step::PartitionGreater {
                element_index,
                pivot_index,
                ..
            } => {
                set.set(*element_index, PartitionGreater);
                set.set(*pivot_index, Pivot);
            }
            Step::PlacePivot { final_position, .. } => set.set(*final_position, PivotPlaced),
            Step::Divide {
                left_half,
                right_half,
                ..
            } => {
                for &i in left_half {
                    set.set(i, LeftHalf);
                }
                for &i in right_half {
                    set.set(i, RightHalf);
                }
            }
            Step::MergeCompare {
                left_index,
                right_index,
                ..
            } => {
                set.set(*left_index, Comparing);
                set.set(*right_index, Comparing);
            }
            Step::MergePlace {
                target_index,
                merge_range,
                ..
            } => {
                if let Some([from, to]) = merge_range {
                    set.fill(*from, *to, Merging);
                }
                set.set(*target_index, Selected);
            }
            Step::MergeComplete {
                merged_range: [from, to],
                ..
            } => set.fill(*from, *to, Merged),
            Step::Complete { .. } => set.fill(0, len as i64 - 1, Sorted),
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_marks_both() {
        let step = Step::Swap {
            indices: [0, 2],
            array: None,
        };
        let set = MarkSet::for_step(&step, 3);
        assert_eq!(set.get(0), Some(ElementMark::Swapping));
        assert_eq!(set.get(1), None);
        assert_eq!(set.get(2), Some(ElementMark::Swapping));
    }

    #[test]
    fn test_out_of_range_ignored() {
        let step = Step::Swap {
            indices: [-1, 7],
            array: None,
        };
        assert!(MarkSet::for_step(&step, 3).is_empty());
    }

    #[test]
    fn test_extreme_window_bounds() {
        let step = Step::EliminateLeft {
            new_left: i64::MIN,
            right: 1,
        };
        let set = MarkSet::for_step(&step, 4);
        let marks: Vec<_> = set.iter().collect();
        assert_eq!(
            marks,
            vec![(2, ElementMark::Eliminated), (3, ElementMark::Eliminated)]
        );

        let step = Step::Compare {
            indices: None,
            index: Some(1),
            value: None,
            target: None,
            left: Some(0),
            right: Some(i64::MAX),
            array: None,
        };
        let set = MarkSet::for_step(&step, 4);
        let marks: Vec<_> = set.iter().collect();
        assert_eq!(marks, vec![(1, ElementMark::Comparing)]);

        let step = Step::EliminateRight {
            left: i64::MAX,
            new_right: i64::MIN,
        };
        let set = MarkSet::for_step(&step, 3);
        assert!((0..3).all(|i| set.get(i) == Some(ElementMark::Eliminated)));
    }

    #[test]
    fn test_binary_search_window() {
        let step = Step::Compare {
            indices: None,
            index: Some(3),
            value: Some(7.0),
            target: Some(9.0),
            left: Some(2),
            right: Some(4),
            array: None,
        };
        let set = MarkSet::for_step(&step, 6);
        let marks: Vec<_> = set.iter().collect();
        assert_eq!(
            marks,
            vec![
                (0, ElementMark::Eliminated),
                (1, ElementMark::Eliminated),
                (3, ElementMark::Comparing),
                (5, ElementMark::Eliminated),
            ]
        );
    }

    #[test]
    fn test_collapsed_window_eliminates_all() {
        let step = Step::EliminateRight {
            left: 0,
            new_right: -1,
        };
        let set = MarkSet::for_step(&step, 4);
        assert!((0..4).all(|i| set.get(i) == Some(ElementMark::Eliminated)));
    }

    #[test]
    fn test_merge_place() {
        let step = Step::MergePlace {
            target_index: 1,
            source_value: Some(2.0),
            merge_range: Some([0, 2]),
            array: None,
        };
        let set = MarkSet::for_step(&step, 5);
        assert_eq!(set.get(0), Some(ElementMark::Merging));
        assert_eq!(set.get(1), Some(ElementMark::Selected));
        assert_eq!(set.get(2), Some(ElementMark::Merging));
        assert_eq!(set.get(3), None);
    }

    #[test]
    fn test_all_on_empty_array() {
        assert!(MarkSet::all(0, ElementMark::Sorted).is_empty());
    }
}
