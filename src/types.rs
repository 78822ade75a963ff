use serde::{Deserialize, Serialize};
use std::fmt;

///Position of a word in the (sorted) dictionary, carries no further meaning
pub type WordId = usize;

///Index of a letter in the alphabet ('a' is 0, 'z' is 25)
pub type CharIndexType = u8;

///Occurrence count of a single letter within a word
pub type CountType = u16;

///The number of symbols in the alphabet
pub const ALPHABET_SIZE: usize = 26;

///The alphabet, the index of each letter corresponds to its position in a FrequencyVector
pub const ALPHABET: &[u8; ALPHABET_SIZE] = b"abcdefghijklmnopqrstuvwxyz";

///The anagram key: a bag-of-characters representation holding how often each letter of the
///alphabet occurs. Two words are anagrams of each other if and only if their frequency vectors
///are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct FrequencyVector(pub [CountType; ALPHABET_SIZE]);

///A single result of an anagram search, borrowing the words from the dictionary
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MatchResult<'a> {
    SingleWord(&'a str),
    WordPair(&'a str, &'a str),
}

impl<'a> MatchResult<'a> {
    pub fn is_pair(&self) -> bool {
        matches!(self, MatchResult::WordPair(..))
    }

    ///Returns the words that make up this match, in order
    pub fn words(&self) -> Vec<&'a str> {
        match *self {
            MatchResult::SingleWord(w) => vec![w],
            MatchResult::WordPair(w1, w2) => vec![w1, w2],
        }
    }
}

impl fmt::Display for MatchResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::SingleWord(w) => write!(f, "{}", w),
            MatchResult::WordPair(w1, w2) => write!(f, "{} {}", w1, w2),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchParams {
    /// Search for single words that are anagrams of the query
    pub single_words: bool,

    /// Search for ordered pairs of words that together are an anagram of the query
    pub word_pairs: bool,

    /// Only report one ordering of each pair: (w1, w2) is kept when w1 does not come after w2 in the
    /// dictionary. By default both orderings are reported.
    pub deduplicate_pairs: bool,

    /// Words shorter than this are not considered as part of a pair
    pub min_word_length: usize,

    /// Number of matches to return per query (set to 0 for unlimited). This truncates the
    /// deterministic result order, it does not rank anything.
    pub max_matches: usize,

    /// Use only a single thread when processing multiple queries instead of leveraging multiple cores
    pub single_thread: bool,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            single_words: true,
            word_pairs: true,
            deduplicate_pairs: false,
            min_word_length: 1,
            max_matches: 0,
            single_thread: false,
        }
    }
}

impl MatchParams {
    pub fn with_single_words(mut self, value: bool) -> Self {
        self.single_words = value;
        self
    }
    pub fn with_word_pairs(mut self, value: bool) -> Self {
        self.word_pairs = value;
        self
    }
    pub fn with_deduplicate_pairs(mut self) -> Self {
        self.deduplicate_pairs = true;
        self
    }
    pub fn with_min_word_length(mut self, length: usize) -> Self {
        self.min_word_length = length;
        self
    }
    pub fn with_max_matches(mut self, matches: usize) -> Self {
        self.max_matches = matches;
        self
    }
    pub fn with_single_thread(mut self) -> Self {
        self.single_thread = true;
        self
    }

    ///Has the maximum number of matches been reached?
    pub(crate) fn is_full(&self, count: usize) -> bool {
        self.max_matches > 0 && count >= self.max_matches
    }
}
