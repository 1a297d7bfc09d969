use std::num::{NonZeroU64, ParseIntError};
use std::str::FromStr;

/// A selection of [`Frame`](super::Frame)s.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum FrameSelection {
    /// Include all frames that are in a trajectory.
    #[default]
    All,
    /// Include frames that lie within a certain [`Range`].
    Range(Range),
    /// Include frames that match the indices in this list.
    ///
    /// Invariant: The indices in the FrameList are _unique_ and _ascending_.
    FrameList(Vec<usize>),
}

impl FrameSelection {
    /// Determine whether some index `idx` is included in this [`FrameSelection`].
    ///
    /// Will return [`None`] once the index is beyond the scope of this `FrameSelection`.
    pub fn is_included(&self, idx: usize) -> Option<bool> {
        match self {
            FrameSelection::All => Some(true),
            FrameSelection::Range(range) => range.is_included(idx as u64),
            FrameSelection::FrameList(indices) => {
                if *indices.last()? < idx {
                    None
                } else {
                    Some(indices.binary_search(&idx).is_ok())
                }
            }
        }
    }
}

fn optional(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl FromStr for FrameSelection {
    type Err = ParseIntError;

    /// Parse a selection in the format `start:stop:step`, where each of the values is optional.
    ///
    /// - `:100` selects the first 100 frames.
    /// - `3:14` selects the frames with indices 3 up to and including 13.
    /// - `:100:2` selects every second frame from the first 100 frames, 50 in total.
    fn from_str(selection: &str) -> Result<Self, Self::Err> {
        let mut components = selection.split(':');
        let start = components.next().and_then(optional).map(str::parse).transpose()?;
        let end = components.next().and_then(optional).map(str::parse).transpose()?;
        let step = components
            .next()
            .and_then(optional)
            .map(NonZeroU64::from_str)
            .transpose()?;
        Ok(FrameSelection::Range(Range::new(start, end, step)))
    }
}

/// A range of frames, from `start` up to an optional `end`, taking every `step`-th frame.
///
/// The `start` of a [`Range`] is always bounded, and is zero by default.
/// The `end` may be bounded or unbounded. In case the end is unbounded ([`None`]), the range
/// continues up to and including the last frame of a trajectory.
/// The number of skipped frames between two included frames is equal to `step` - 1.
///
/// # Note
///
/// An instance where `start` > `end` is a valid `Range`, but it will select zero frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: u64,
    /// Exclusive bound, if any.
    pub end: Option<u64>,
    pub step: NonZeroU64,
}

impl Range {
    pub fn new(start: Option<u64>, end: Option<u64>, step: Option<NonZeroU64>) -> Self {
        let mut sel = Self {
            end,
            ..Self::default()
        };
        if let Some(start) = start {
            sel.start = start;
        }
        if let Some(step) = step {
            sel.step = step;
        }
        sel
    }

    fn is_included(&self, idx: u64) -> Option<bool> {
        if let Some(end) = self.end {
            // Determine whether `idx` is already beyond the defined range.
            if end <= idx {
                return None;
            }
        }
        let in_range = self.start <= idx;
        let in_step = in_range && (idx - self.start) % self.step == 0;
        Some(in_step)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            start: 0,
            end: None,
            step: NonZeroU64::MIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn included(selection: &FrameSelection, n: usize) -> Vec<usize> {
        (0..n)
            .map_while(|idx| selection.is_included(idx).map(|inc| (idx, inc)))
            .filter_map(|(idx, inc)| inc.then_some(idx))
            .collect()
    }

    #[test]
    fn zero_selection() {
        let list_empty = FrameSelection::FrameList(vec![]);
        let list_zero = FrameSelection::FrameList(vec![0]);
        let range_empty = FrameSelection::Range(Range::new(None, Some(0), None));

        for idx in 0..1000 {
            assert!(list_empty.is_included(idx).is_none());
            if idx > 0 {
                assert!(list_zero.is_included(idx).is_none());
            }
            assert!(range_empty.is_included(idx).is_none());
        }
    }

    #[test]
    fn first_n() {
        let n = 100;
        let step = NonZeroU64::new(17).unwrap();

        let list = FrameSelection::FrameList((0..n).collect());
        let until = FrameSelection::Range(Range::new(None, Some(n as u64), None));
        let from_n = FrameSelection::Range(Range::new(Some(n as u64), None, None));
        let until_stepped = FrameSelection::Range(Range::new(None, Some(n as u64), Some(step)));
        let from_n_stepped = FrameSelection::Range(Range::new(Some(n as u64), None, Some(step)));
        let all = FrameSelection::All;

        for idx in 0..2 * n {
            if idx < n {
                assert_eq!(list.is_included(idx), Some(true));
                assert_eq!(until.is_included(idx), Some(true));
                assert_eq!(
                    until_stepped.is_included(idx),
                    Some(idx as u64 % step.get() == 0),
                );
            } else {
                assert!(list.is_included(idx).is_none());
                assert!(until.is_included(idx).is_none());
                assert!(until_stepped.is_included(idx).is_none());
            }
            let from_n_included = idx >= n;
            assert_eq!(from_n.is_included(idx), Some(from_n_included));
            assert_eq!(
                from_n_stepped.is_included(idx),
                Some(from_n_included && (idx - n) as u64 % step.get() == 0),
            );
            assert_eq!(all.is_included(idx), Some(true));
        }
    }

    #[test]
    fn sparse_list() {
        let list = FrameSelection::FrameList(vec![1, 4, 5]);
        assert_eq!(included(&list, 10), [1, 4, 5]);
    }

    #[test]
    fn parse() {
        let parse = |s: &str| s.parse::<FrameSelection>().unwrap();
        assert_eq!(included(&parse(":5"), 10), [0, 1, 2, 3, 4]);
        assert_eq!(included(&parse("3:7"), 10), [3, 4, 5, 6]);
        assert_eq!(included(&parse("::3"), 10), [0, 3, 6, 9]);
        assert_eq!(included(&parse("2::4"), 12), [2, 6, 10]);
        assert_eq!(included(&parse("8"), 10), [8, 9]);
        assert_eq!(included(&parse(""), 3), [0, 1, 2]);
        assert!("a:b".parse::<FrameSelection>().is_err());
        assert!("::0".parse::<FrameSelection>().is_err());
    }
}
