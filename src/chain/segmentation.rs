//! Chain segmentation of per-token chain labels
//!
//! Each distinct label receives an index in sorted label order together with
//! its first and last occurrence. The span is taken from the extreme
//! occurrences, not from a contiguous run, so a label that reappears after
//! another chain spans everything in between.

use ndarray::{Array1, Array2, Axis};
use std::collections::BTreeMap;

/// Position and color index of one chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainSpan {
    /// Index of the label in sorted label order
    pub index: usize,
    /// First token carrying the label
    pub start: usize,
    /// Last token carrying the label
    pub end: usize,
    /// Number of tokens carrying the label
    pub occurrences: usize,
}

impl ChainSpan {
    /// Midpoint between first and last occurrence, where the label is drawn
    pub fn center(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }

    /// Whether a separator is drawn before this chain
    ///
    /// A chain starting at token 0 has nothing before it to separate from.
    pub const fn has_leading_separator(&self) -> bool {
        self.start != 0
    }

    /// Whether every token between first and last occurrence carries the label
    pub const fn is_contiguous(&self) -> bool {
        self.occurrences == self.end - self.start + 1
    }
}

/// Chain spans keyed by label plus the integer-coded label row
#[derive(Debug, Clone)]
pub struct ChainSegmentation {
    spans: BTreeMap<String, ChainSpan>,
    codes: Array2<usize>,
}

impl ChainSegmentation {
    /// Segment a sequence of per-token chain labels
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut spans: BTreeMap<String, ChainSpan> = BTreeMap::new();

        for (position, label) in labels.iter().enumerate() {
            let label = label.as_ref();
            if let Some(span) = spans.get_mut(label) {
                span.end = position;
                span.occurrences += 1;
            } else {
                spans.insert(
                    label.to_owned(),
                    ChainSpan {
                        index: 0,
                        start: position,
                        end: position,
                        occurrences: 1,
                    },
                );
            }
        }

        // Sorted label order gives deterministic color indices
        for (index, span) in spans.values_mut().enumerate() {
            span.index = index;
        }

        let codes: Array1<usize> = labels
            .iter()
            .map(|label| spans.get(label.as_ref()).map_or(0, |span| span.index))
            .collect();

        Self {
            spans,
            codes: codes.insert_axis(Axis(0)),
        }
    }

    /// Number of distinct chains
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether no labels were given
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of tokens the segmentation was built from
    pub fn token_count(&self) -> usize {
        self.codes.ncols()
    }

    /// Span of the chain with the given label
    pub fn get(&self, label: &str) -> Option<&ChainSpan> {
        self.spans.get(label)
    }

    /// Labels and spans in sorted label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChainSpan)> {
        self.spans.iter().map(|(label, span)| (label.as_str(), span))
    }

    /// Chain index of every token, shaped `(1, token_count)`
    pub const fn codes(&self) -> &Array2<usize> {
        &self.codes
    }

    /// Largest chain index, used to normalize the qualitative palette
    pub fn max_code(&self) -> usize {
        self.spans.len().saturating_sub(1)
    }

    /// Start positions of every chain that gets a leading separator
    pub fn separators(&self) -> Vec<usize> {
        self.spans
            .values()
            .filter(|span| span.has_leading_separator())
            .map(|span| span.start)
            .collect()
    }

    /// Labels whose occurrences do not form a single run
    ///
    /// Their separators and label positions do not bound a clean block.
    pub fn interleaved_labels(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, span)| !span.is_contiguous())
            .map(|(label, _)| label)
            .collect()
    }
}
