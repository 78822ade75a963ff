use std::ops::Range;

use crate::error::AnagramError;
use crate::types::*;

///Maps word lengths to the contiguous range of positions holding words of exactly that length in
///a dictionary that is sorted ascending by length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthIndex {
    ///offsets[l] is the first position of a word with length >= l; has max_length + 2 entries so
    ///the last one always holds the total number of words
    offsets: Vec<WordId>,
}

impl Default for LengthIndex {
    fn default() -> Self {
        Self { offsets: vec![0, 0] }
    }
}

impl LengthIndex {
    ///Build the index from the word lengths, in dictionary order.
    ///Fails if the lengths are not in ascending order or if there is an empty word.
    pub fn new(lengths: impl IntoIterator<Item = usize>) -> Result<Self, AnagramError> {
        let mut counts: Vec<usize> = vec![0];
        let mut previous = 0;
        for (position, length) in lengths.into_iter().enumerate() {
            if length == 0 {
                return Err(AnagramError::EmptyWord);
            } else if length < previous {
                return Err(AnagramError::UnsortedDictionary { position });
            }
            if length >= counts.len() {
                counts.resize(length + 1, 0);
            }
            counts[length] += 1;
            previous = length;
        }

        let mut offsets: Vec<WordId> = Vec::with_capacity(counts.len() + 1);
        let mut total = 0;
        offsets.push(0);
        for count in counts {
            total += count;
            offsets.push(total);
        }
        Ok(Self { offsets })
    }

    ///The length of the longest word (0 for an empty dictionary)
    pub fn max_length(&self) -> usize {
        self.offsets.len() - 2
    }

    ///The number of words covered by the index
    pub fn total(&self) -> usize {
        self.offsets[self.offsets.len() - 1]
    }

    ///Clamps a length onto the table: every length beyond the maximum behaves like max_length + 1
    fn clamp(&self, length: usize) -> usize {
        length.min(self.max_length() + 1)
    }

    ///Position of the first word with at least the specified length
    pub fn start(&self, length: usize) -> WordId {
        self.offsets[self.clamp(length)]
    }

    ///The half-open range of positions holding the words of exactly this length.
    ///This is empty for length 0 and for any length beyond the maximum.
    pub fn range(&self, length: usize) -> Range<WordId> {
        self.start(length)..self.start(length.saturating_add(1))
    }

    ///The range of positions of all words strictly shorter than the specified length
    pub fn shorter_than(&self, length: usize) -> Range<WordId> {
        self.start(1)..self.start(length.max(1))
    }

    ///Iterate over all non-empty length buckets, as (length, range) tuples, shortest first
    pub fn buckets(&self) -> impl Iterator<Item = (usize, Range<WordId>)> + '_ {
        (1..=self.max_length())
            .map(move |length| (length, self.range(length)))
            .filter(|(_, range)| !range.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holes_are_empty_ranges() {
        // lengths 1, 3, 3, 5: no words of length 2 or 4
        let index = LengthIndex::new(vec![1, 3, 3, 5]).expect("sorted");
        assert_eq!(index.max_length(), 5);
        assert_eq!(index.range(1), 0..1);
        assert_eq!(index.range(2), 1..1);
        assert_eq!(index.range(3), 1..3);
        assert_eq!(index.range(4), 3..3);
        assert_eq!(index.range(5), 3..4);
        assert_eq!(index.shorter_than(5), 0..3);
        assert_eq!(index.buckets().map(|(l, _)| l).collect::<Vec<_>>(), vec![1, 3, 5]);
    }

    #[test]
    fn out_of_range_lengths_clamp() {
        let index = LengthIndex::new(vec![2, 2, 3]).expect("sorted");
        assert_eq!(index.range(0), 0..0);
        assert_eq!(index.range(4), 3..3);
        assert_eq!(index.range(100), 3..3);
        assert_eq!(index.range(usize::MAX), 3..3);
        assert_eq!(index.shorter_than(0), 0..0);
        assert_eq!(index.shorter_than(usize::MAX), 0..3);
    }

    #[test]
    fn empty_index() {
        let index = LengthIndex::new(Vec::new()).expect("empty");
        assert_eq!(index, LengthIndex::default());
        assert_eq!(index.total(), 0);
        assert_eq!(index.range(1), 0..0);
        assert_eq!(index.buckets().count(), 0);
    }

    #[test]
    fn unsorted_lengths() {
        match LengthIndex::new(vec![1, 3, 2]) {
            Err(AnagramError::UnsortedDictionary { position }) => assert_eq!(position, 2),
            other => panic!("expected UnsortedDictionary, got {:?}", other),
        }
        assert!(matches!(LengthIndex::new(vec![0, 1]), Err(AnagramError::EmptyWord)));
    }
}
