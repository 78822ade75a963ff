use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::AnagramError;
use crate::types::*;
use crate::vocab::*;

///Version of the on-disk encoding format
const FORMAT_VERSION: u32 = 1;

///The encoded dictionary: one frequency vector per word, aligned with the dictionary positions
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<FrequencyVector>,

    ///Fingerprint of the dictionary this matrix was encoded from
    fingerprint: u64,
}

///Precedes the rows in the encoding file
#[derive(Serialize, Deserialize, Debug)]
struct EncodingHeader {
    version: u32,
    width: u32,
    rows: u64,
    fingerprint: u64,
}

impl Matrix {
    ///Encode every word of the dictionary, `matrix.row(i)` corresponds to `dictionary.get(i)`
    pub fn encode_all(dictionary: &Dictionary) -> Self {
        let rows: Vec<FrequencyVector> = dictionary
            .words()
            .par_iter()
            .map(|word| word.frequencies())
            .collect();
        Self {
            rows,
            fingerprint: dictionary.fingerprint(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, id: WordId) -> Option<&FrequencyVector> {
        self.rows.get(id)
    }

    pub fn rows(&self) -> &[FrequencyVector] {
        &self.rows
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    ///Checks whether this matrix was encoded from exactly this dictionary (same words, same order)
    pub fn verify(&self, dictionary: &Dictionary) -> Result<(), AnagramError> {
        if self.rows.len() != dictionary.len() {
            return Err(AnagramError::EncodingMismatch(format!(
                "encoding has {} rows, dictionary has {} words",
                self.rows.len(),
                dictionary.len()
            )));
        }
        if self.fingerprint != dictionary.fingerprint() {
            return Err(AnagramError::EncodingMismatch(
                "encoding was computed for a different dictionary (or a different word order)".to_string(),
            ));
        }
        Ok(())
    }

    ///Write the matrix to file. The file is written to a temporary location first and only moved
    ///into place once complete.
    pub fn persist(&self, path: &Path) -> Result<(), AnagramError> {
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(temp_file.as_file());
            let header = EncodingHeader {
                version: FORMAT_VERSION,
                width: ALPHABET_SIZE as u32,
                rows: self.rows.len() as u64,
                fingerprint: self.fingerprint,
            };
            bincode::serialize_into(&mut writer, &header)?;
            bincode::serialize_into(&mut writer, &self.rows)?;
            writer.flush()?;
        }
        temp_file.persist(path).map_err(|e| AnagramError::Io(e.error))?;
        Ok(())
    }

    ///Read a matrix from file, as written by `persist()`. The shape is checked against the header
    ///but not against any dictionary, use `load_for()` or `verify()` for that.
    pub fn load(path: &Path) -> Result<Self, AnagramError> {
        let mut reader = BufReader::new(File::open(path)?);
        let header: EncodingHeader = bincode::deserialize_from(&mut reader)?;
        if header.version != FORMAT_VERSION {
            return Err(AnagramError::EncodingMismatch(format!(
                "unsupported format version {} (expected {})",
                header.version, FORMAT_VERSION
            )));
        }
        if header.width != ALPHABET_SIZE as u32 {
            return Err(AnagramError::EncodingMismatch(format!(
                "encoding has {} columns, expected {}",
                header.width, ALPHABET_SIZE
            )));
        }
        let rows: Vec<FrequencyVector> = bincode::deserialize_from(&mut reader)?;
        if rows.len() as u64 != header.rows {
            return Err(AnagramError::EncodingMismatch(format!(
                "header announces {} rows, file holds {}",
                header.rows,
                rows.len()
            )));
        }
        Ok(Self {
            rows,
            fingerprint: header.fingerprint,
        })
    }

    ///Read a matrix from file and check it was encoded from this dictionary
    pub fn load_for(path: &Path, dictionary: &Dictionary) -> Result<Self, AnagramError> {
        let matrix = Self::load(path)?;
        matrix.verify(dictionary)?;
        Ok(matrix)
    }
}

impl Encoding for Matrix {
    fn vector(&self, id: WordId) -> FrequencyVector {
        self.rows[id]
    }

    fn verify(&self, dictionary: &Dictionary) -> Result<(), AnagramError> {
        Matrix::verify(self, dictionary)
    }
}

///Encode every word of the dictionary
pub fn encode_all(dictionary: &Dictionary) -> Matrix {
    Matrix::encode_all(dictionary)
}

///Write an encoding to file
pub fn persist(matrix: &Matrix, path: &Path) -> Result<(), AnagramError> {
    matrix.persist(path)
}

///Read an encoding from file
pub fn load(path: &Path) -> Result<Matrix, AnagramError> {
    Matrix::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_width() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.enc");
        {
            let mut f = File::create(&path).expect("create");
            let header = EncodingHeader {
                version: FORMAT_VERSION,
                width: 27,
                rows: 0,
                fingerprint: 0,
            };
            bincode::serialize_into(&mut f, &header).expect("serialize");
        }
        assert!(matches!(Matrix::load(&path), Err(AnagramError::EncodingMismatch(_))));
    }

    #[test]
    fn rejects_wrong_version() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("old.enc");
        {
            let mut f = File::create(&path).expect("create");
            let header = EncodingHeader {
                version: FORMAT_VERSION + 1,
                width: ALPHABET_SIZE as u32,
                rows: 0,
                fingerprint: 0,
            };
            bincode::serialize_into(&mut f, &header).expect("serialize");
        }
        assert!(matches!(Matrix::load(&path), Err(AnagramError::EncodingMismatch(_))));
    }

    #[test]
    fn short_matrix_is_not_searched() {
        let dictionary = Dictionary::build(&["ab", "cd", "dc"]).expect("dictionary");
        let short = Matrix::encode_all(&Dictionary::build(&["ab"]).expect("dictionary"));
        let query = Query::new("abcd").expect("query");
        assert!(matches!(
            crate::search::find_with(&dictionary, &short, &query, &MatchParams::default()),
            Err(AnagramError::EncodingMismatch(_))
        ));
    }

    #[test]
    fn truncated_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("short.enc");
        File::create(&path).expect("create");
        assert!(Matrix::load(&path).is_err());
    }
}
