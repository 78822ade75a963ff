use fnv::FnvHasher;
use std::fmt;
use std::hash::Hasher;
use std::ops::{Deref, Range};

use crate::error::AnagramError;
use crate::frequency::*;
use crate::index::LengthIndex;
use crate::types::*;

///A word normalized to the alphabet (lowercase a-z), never empty
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Word {
    text: String,
}

impl Word {
    pub fn new(text: &str) -> Result<Self, AnagramError> {
        let text = text.normalize_to_alphabet()?;
        if text.is_empty() {
            return Err(AnagramError::EmptyWord);
        }
        //rejects words that can't be counted
        text.letter_counts()?;
        Ok(Self { text })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    ///Computes the frequency vector, this can not fail as the word was validated on construction
    pub fn frequencies(&self) -> FrequencyVector {
        let mut vector = FrequencyVector::empty();
        for b in self.text.bytes() {
            vector.0[(b - b'a') as usize] += 1;
        }
        vector
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

///The word to find anagrams for, owns its frequency vector. Unlike dictionary words, a query may be
///empty (it simply has no anagrams).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Query {
    text: String,
    vector: FrequencyVector,
}

impl Query {
    ///Normalizes and encodes the query, fails on any character that is not in the alphabet
    pub fn new(text: &str) -> Result<Self, AnagramError> {
        let text = text.normalize_to_alphabet()?;
        let vector = text.letter_counts()?;
        Ok(Self { text, vector })
    }

    ///The normalized query text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn vector(&self) -> &FrequencyVector {
        &self.vector
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

///Provides the frequency vector for each position in a dictionary
pub trait Encoding {
    fn vector(&self, id: WordId) -> FrequencyVector;

    ///Checks that this encoding is aligned with the dictionary, returns `EncodingMismatch` if not
    fn verify(&self, dictionary: &Dictionary) -> Result<(), AnagramError>;
}

///The dictionary: all known words sorted ascending by length, bucketed by a LengthIndex.
///Immutable after construction.
#[derive(Clone, Debug)]
pub struct Dictionary {
    words: Vec<Word>,
    index: LengthIndex,
    fingerprint: u64,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            index: LengthIndex::default(),
            fingerprint: compute_fingerprint(&[]),
        }
    }
}

///Hash over all words in order (64-bit FNV-1a, newline separated)
fn compute_fingerprint(words: &[Word]) -> u64 {
    let mut hasher = FnvHasher::default();
    for word in words {
        hasher.write(word.as_bytes());
        hasher.write_u8(b'\n');
    }
    hasher.finish()
}

impl Dictionary {
    ///Build a dictionary from raw strings: entries are trimmed and normalized, blank entries are
    ///skipped, all others must be valid words. The result is sorted by length (stable).
    pub fn build<I, S>(words: I) -> Result<Self, AnagramError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validated: Vec<Word> = Vec::new();
        for text in words {
            let text = text.as_ref().trim();
            if !text.is_empty() {
                validated.push(Word::new(text)?);
            }
        }
        Self::from_words(validated)
    }

    ///Build a dictionary from validated words, sorting them by length (stable)
    pub fn from_words(mut words: Vec<Word>) -> Result<Self, AnagramError> {
        words.sort_by_key(|word| word.len());
        Self::from_sorted(words)
    }

    ///Build a dictionary from words that the caller guarantees to be sorted ascending by length.
    ///Returns `UnsortedDictionary` if they are not.
    pub fn from_sorted(words: Vec<Word>) -> Result<Self, AnagramError> {
        let index = LengthIndex::new(words.iter().map(|word| word.len()))?;
        let fingerprint = compute_fingerprint(&words);
        Ok(Self {
            words,
            index,
            fingerprint,
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get(id)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn index(&self) -> &LengthIndex {
        &self.index
    }

    pub fn max_length(&self) -> usize {
        self.index.max_length()
    }

    ///All words of exactly the specified length
    pub fn bucket(&self, length: usize) -> &[Word] {
        &self.words[self.index.range(length)]
    }

    pub fn range(&self, length: usize) -> Range<WordId> {
        self.index.range(length)
    }

    ///Tests if the dictionary has a specific entry, by text
    pub fn has(&self, text: &str) -> bool {
        self.bucket(text.len()).iter().any(|word| word.as_str() == text)
    }

    ///Hash over all words in dictionary order (64-bit FNV-1a), identifies the exact dictionary an
    ///encoding was computed for. Computed once on construction.
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    ///Returns all positions of words that are strictly shorter than the query and do not contain
    ///more of any letter than the query does. Such words may be part of a multi-word anagram, all
    ///others can not.
    pub fn feasible_candidates(&self, query: &FrequencyVector) -> Vec<WordId> {
        self.unchecked_candidates(self, query)
    }

    ///Like `feasible_candidates()` but reads the vectors from the specified encoding, which must
    ///belong to this dictionary
    pub fn feasible_candidates_with<E>(&self, encoding: &E, query: &FrequencyVector) -> Result<Vec<WordId>, AnagramError>
    where
        E: Encoding + ?Sized,
    {
        encoding.verify(self)?;
        Ok(self.unchecked_candidates(encoding, query))
    }

    pub(crate) fn unchecked_candidates<E>(&self, encoding: &E, query: &FrequencyVector) -> Vec<WordId>
    where
        E: Encoding + ?Sized,
    {
        self.index
            .shorter_than(query.char_count())
            .filter(|id| query.contains(&encoding.vector(*id)))
            .collect()
    }
}

impl Encoding for Dictionary {
    fn vector(&self, id: WordId) -> FrequencyVector {
        self.words[id].frequencies()
    }

    fn verify(&self, dictionary: &Dictionary) -> Result<(), AnagramError> {
        if std::ptr::eq(self, dictionary)
            || (self.len() == dictionary.len() && self.fingerprint == dictionary.fingerprint)
        {
            Ok(())
        } else {
            Err(AnagramError::EncodingMismatch(
                "encoding dictionary differs from the searched dictionary".to_string(),
            ))
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

///Determines how a word list is read
#[derive(Clone, Debug, Default)]
pub struct WordListParams {
    ///Skip entries with characters outside the alphabet rather than failing
    pub skip_invalid: bool,
    ///Skip words shorter than this (0 for no bound)
    pub min_length: usize,
    ///Skip words longer than this (0 for no bound)
    pub max_length: usize,
}

impl WordListParams {
    pub fn with_skip_invalid(mut self) -> Self {
        self.skip_invalid = true;
        self
    }
    pub fn with_min_length(mut self, length: usize) -> Self {
        self.min_length = length;
        self
    }
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = length;
        self
    }

    ///Is a word of this length accepted?
    pub fn accepts_length(&self, length: usize) -> bool {
        length >= self.min_length && (self.max_length == 0 || length <= self.max_length)
    }
}
