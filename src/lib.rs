extern crate bincode;
extern crate rayon;
extern crate serde;
extern crate tempfile;

use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::SystemTime;

pub mod types;
pub mod error;
pub mod frequency;
pub mod index;
pub mod vocab;
pub mod search;
pub mod cache;
pub mod test;

pub use crate::types::*;
pub use crate::error::*;
pub use crate::frequency::*;
pub use crate::index::*;
pub use crate::vocab::*;
pub use crate::search::*;
pub use crate::cache::*;

pub struct AnagramModel {
    ///The indexed dictionary, only populated after `build()`
    dictionary: Dictionary,

    ///Precomputed frequency vectors for the dictionary, if available. Only set by `encode()` and
    ///`load_encoding()`, so always aligned with `dictionary`.
    matrix: Option<Matrix>,

    ///Words added since the last build
    pending: Vec<Word>,

    /// Stores the names of the loaded word lists
    pub wordlists: Vec<String>,

    ///Number of entries skipped while reading word lists
    pub skipped: usize,

    pub debug: bool,
}

impl AnagramModel {
    pub fn new(debug: bool) -> AnagramModel {
        AnagramModel {
            dictionary: Dictionary::default(),
            matrix: None,
            pending: Vec::new(),
            wordlists: Vec::new(),
            skipped: 0,
            debug,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn matrix(&self) -> Option<&Matrix> {
        self.matrix.as_ref()
    }

    ///Read a word list: one word per line, blank lines are skipped
    pub fn read_wordlist(&mut self, filename: &str, params: &WordListParams) -> Result<(), AnagramError> {
        if self.debug {
            eprintln!("Reading word list from {}...", filename);
        }
        let f = File::open(filename)?;
        let f_buffer = BufReader::new(f);
        let mut added = 0;
        for line in f_buffer.lines() {
            let line = line?;
            if self.add_to_wordlist(&line, params)? {
                added += 1;
            }
        }
        if self.debug {
            eprintln!(" - Read {} words ({} skipped so far)", added, self.skipped);
        }
        self.wordlists.push(filename.to_string());
        Ok(())
    }

    ///Adds a single entry, returns whether it was added. Blank entries and entries rejected by the
    ///parameters are skipped, invalid words are an error unless `params.skip_invalid` is set.
    pub fn add_to_wordlist(&mut self, text: &str, params: &WordListParams) -> Result<bool, AnagramError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        match Word::new(text) {
            Ok(word) => {
                if params.accepts_length(word.len()) {
                    self.pending.push(word);
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Err(e @ AnagramError::InvalidCharacter { .. }) | Err(e @ AnagramError::WordTooLong { .. }) => {
                if params.skip_invalid {
                    if self.debug {
                        eprintln!(" -- Skipping: {}", e);
                    }
                    self.skipped += 1;
                    Ok(false)
                } else {
                    Err(e)
                }
            }
            Err(e) => Err(e),
        }
    }

    ///Sorts all words by length and builds the length index. Any previously attached encoding is
    ///discarded.
    pub fn build(&mut self) -> Result<(), AnagramError> {
        eprintln!("Sorting {} words by length...", self.dictionary.len() + self.pending.len());
        let mut words: Vec<Word> = self.dictionary.words().to_vec();
        words.append(&mut self.pending);
        self.dictionary = Dictionary::from_words(words)?;
        self.matrix = None;

        eprintln!("Building length index...");
        for (length, range) in self.dictionary.index().buckets() {
            eprintln!(" - Found {} words of length {}", range.len(), length);
        }
        Ok(())
    }

    ///Computes the frequency vectors for all words in the dictionary
    pub fn encode(&mut self) {
        eprintln!("Computing frequency vectors for all words in the dictionary...");
        let begintime = SystemTime::now();
        let matrix = Matrix::encode_all(&self.dictionary);
        if self.debug {
            if let Ok(elapsed) = begintime.elapsed() {
                eprintln!(" (encoded {} words in {} ms)", matrix.len(), elapsed.as_millis());
            }
        }
        self.matrix = Some(matrix);
    }

    ///Loads a previously saved encoding, it must match the current dictionary
    pub fn load_encoding(&mut self, path: &Path) -> Result<(), AnagramError> {
        eprintln!("Loading encoding from {}...", path.display());
        self.matrix = Some(Matrix::load_for(path, &self.dictionary)?);
        Ok(())
    }

    ///Saves the encoding, computing it first if needed
    pub fn save_encoding(&mut self, path: &Path) -> Result<(), AnagramError> {
        if self.matrix.is_none() {
            self.encode();
        }
        if let Some(matrix) = self.matrix.as_ref() {
            eprintln!("Saving encoding to {}...", path.display());
            matrix.persist(path)?;
        }
        Ok(())
    }

    ///Find all anagrams for a given input string. Fails if it contains characters outside of the
    ///alphabet.
    pub fn find_anagrams(&self, input: &str, params: &MatchParams) -> Result<Vec<MatchResult<'_>>, AnagramError> {
        let query = Query::new(input)?;
        let begintime = if self.debug {
            eprintln!("(finding anagrams for {})", query.text());
            Some(SystemTime::now())
        } else {
            None
        };

        let results = match self.matrix.as_ref() {
            Some(matrix) => find_with(&self.dictionary, matrix, &query, params)?,
            None => find_with(&self.dictionary, &self.dictionary, &query, params)?,
        };

        if let Some(begintime) = begintime {
            if let Ok(elapsed) = begintime.elapsed() {
                eprintln!(" (found {} matches in {} μs)", results.len(), elapsed.as_micros());
            }
        }
        Ok(results)
    }

    ///Find anagrams for multiple inputs, using multiple threads unless `params.single_thread` is
    ///set. Results are returned in input order.
    pub fn find_all_anagrams<S>(&self, inputs: &[S], params: &MatchParams) -> Vec<Result<Vec<MatchResult<'_>>, AnagramError>>
    where
        S: AsRef<str> + Sync,
    {
        if params.single_thread {
            inputs.iter().map(|input| self.find_anagrams(input.as_ref(), params)).collect()
        } else {
            inputs.par_iter().map(|input| self.find_anagrams(input.as_ref(), params)).collect()
        }
    }
}
