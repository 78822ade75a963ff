use std::ops::Index;

use crate::error::AnagramError;
use crate::types::*;

///Trait for objects that can be encoded as a frequency vector (string-like)
pub trait LetterCountable {
    fn letter_counts(&self) -> Result<FrequencyVector, AnagramError>;
    fn normalize_to_alphabet(&self) -> Result<String, AnagramError>;
}

///Maps a character onto its index in the alphabet, after case normalization
pub fn char_index(c: char) -> Option<CharIndexType> {
    let c = c.to_ascii_lowercase();
    if c.is_ascii_lowercase() {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

impl LetterCountable for str {
    ///Compute the frequency vector for a given string. Fails on the first character that is
    ///not in the alphabet.
    fn letter_counts(&self) -> Result<FrequencyVector, AnagramError> {
        let mut vector = FrequencyVector::empty();
        for c in self.chars() {
            let charindex = char_index(c).ok_or_else(|| AnagramError::InvalidCharacter {
                word: self.to_string(),
                character: c,
            })?;
            let count = &mut vector.0[charindex as usize];
            *count = count.checked_add(1).ok_or_else(|| AnagramError::WordTooLong {
                word: self.to_string(),
            })?;
        }
        Ok(vector)
    }

    ///Normalize a string to the alphabet (lowercase a-z), failing if that is not possible
    fn normalize_to_alphabet(&self) -> Result<String, AnagramError> {
        let mut result = String::with_capacity(self.len());
        for c in self.chars() {
            match char_index(c) {
                Some(charindex) => result.push(ALPHABET[charindex as usize] as char),
                None => {
                    return Err(AnagramError::InvalidCharacter {
                        word: self.to_string(),
                        character: c,
                    })
                }
            }
        }
        Ok(result)
    }
}

///Count the occurrences of each letter of the alphabet in a word
pub fn count(word: &str) -> Result<FrequencyVector, AnagramError> {
    word.letter_counts()
}

///Lenient normalization: lowercases the input and drops everything that is not in the alphabet.
///Used only when explicitly asked for, the strict path is `normalize_to_alphabet()`.
pub fn strip_to_alphabet(text: &str) -> String {
    text.chars()
        .filter_map(char_index)
        .map(|charindex| ALPHABET[charindex as usize] as char)
        .collect()
}

impl FrequencyVector {
    /// The vector of the empty word
    pub fn empty() -> Self {
        FrequencyVector([0; ALPHABET_SIZE])
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|x| *x == 0)
    }

    /// Computes the number of characters represented by this vector
    pub fn char_count(&self) -> usize {
        self.0.iter().map(|x| *x as usize).sum()
    }

    /// Insert the characters represented by the other vector, returning the result
    /// Returns None if a count would overflow
    pub fn insert(&self, other: &FrequencyVector) -> Option<FrequencyVector> {
        let mut result = *self;
        for (count, othercount) in result.0.iter_mut().zip(other.0.iter()) {
            *count = count.checked_add(*othercount)?;
        }
        Some(result)
    }

    /// Delete the characters represented by the other vector, returning the result
    /// Returns None if the other vector is not contained in this one
    pub fn delete(&self, other: &FrequencyVector) -> Option<FrequencyVector> {
        let mut result = *self;
        for (count, othercount) in result.0.iter_mut().zip(other.0.iter()) {
            *count = count.checked_sub(*othercount)?;
        }
        Some(result)
    }

    /// Tests if this vector contains the other one, i.e. every letter occurs at least as often
    /// here as it does in the other
    pub fn contains(&self, other: &FrequencyVector) -> bool {
        self.0.iter().zip(other.0.iter()).all(|(count, othercount)| count >= othercount)
    }
}

impl Index<CharIndexType> for FrequencyVector {
    type Output = CountType;

    fn index(&self, charindex: CharIndexType) -> &Self::Output {
        &self.0[charindex as usize]
    }
}
