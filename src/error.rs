use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnagramError {
    /// The word contains a symbol outside of the alphabet (a-z, case-insensitive)
    #[error("invalid character {character:?} in {word:?}, only the letters a-z are supported")]
    InvalidCharacter { word: String, character: char },

    #[error("empty words can not be added to the dictionary")]
    EmptyWord,

    /// A single letter occurs more often than a FrequencyVector can count
    #[error("word {word:?} repeats a letter more than 65535 times")]
    WordTooLong { word: String },

    /// Internal invariant violation: the dictionary must be sorted ascending by word length
    #[error("dictionary is not sorted by word length (violation at position {position})")]
    UnsortedDictionary { position: usize },

    #[error("encoding does not match the dictionary: {0}")]
    EncodingMismatch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("unable to (de)serialize encoding: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for AnagramError {
    fn from(e: bincode::Error) -> Self {
        match *e {
            bincode::ErrorKind::Io(e) => AnagramError::Io(e),
            other => AnagramError::Serialization(other.to_string()),
        }
    }
}
