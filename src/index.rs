//! Delimited-table index loaders.
//!
//! All three input shapes (sentence tables, the link table, and the word
//! frequency list) load through one generic column extractor: map the first
//! field of every row to the field at a caller-chosen position. A repeated
//! key overwrites the previous value but keeps its original position
//! (last-write-wins, insertion-ordered), which makes iteration order match
//! file order.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use indexmap::IndexMap;
use thiserror::Error;

/// Insertion-ordered map from a row's first field to one of its other fields.
pub type ColumnIndex = IndexMap<String, String>;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot open {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: row {row} has {got} fields, expected at least {want}")]
    Format {
        path: String,
        row: usize,
        got: usize,
        want: usize,
    },

    #[error("{path}: invalid frequency rank {value:?} for word {word:?}")]
    Rank {
        path: String,
        word: String,
        value: String,
    },

    #[error("{path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Load a delimited table (no header row) into a [`ColumnIndex`].
///
/// `value` is the zero-based position of the field to keep. Sentence tables
/// use `value = 2` (id, language code, text), link tables `value = 1`
/// (source id, target id). Rows narrower than `value + 1` fields are a fatal
/// [`IndexError::Format`].
pub fn load_column_index(path: &Path, delimiter: u8, value: usize) -> Result<ColumnIndex, IndexError> {
    let file = std::fs::File::open(path).map_err(|e| IndexError::FileAccess {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut index = ColumnIndex::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|e| IndexError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        if record.len() <= value {
            return Err(IndexError::Format {
                path: path.display().to_string(),
                row: row + 1,
                got: record.len(),
                want: value + 1,
            });
        }
        index.insert(record[0].to_string(), record[value].to_string());
    }
    Ok(index)
}

/// Word frequency lookup with a sentinel rank for unknown words.
///
/// Keys are stored exactly as they appear in the file; lookups fold the query
/// word to lowercase. Unknown words rank strictly worse than every word in
/// the list, so they can never win a minimum-rank scan.
#[derive(Debug)]
pub struct FrequencyIndex {
    ranks: HashMap<String, u32>,
    unknown_rank: u32,
}

impl FrequencyIndex {
    /// Load a space-delimited `word rank` table. Ranks are parsed here so a
    /// malformed row fails the run up front instead of mid-generation.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let raw = load_column_index(path, b' ', 1)?;
        let mut ranks = HashMap::with_capacity(raw.len());
        for (word, rank) in raw {
            let parsed: u32 = rank.trim().parse().map_err(|_| IndexError::Rank {
                path: path.display().to_string(),
                word: word.clone(),
                value: rank.clone(),
            })?;
            ranks.insert(word, parsed);
        }
        Ok(Self::from_ranks(ranks))
    }

    /// Build an index from already-parsed ranks. The unknown-word sentinel is
    /// one past the largest real rank.
    pub fn from_ranks(ranks: impl IntoIterator<Item = (String, u32)>) -> Self {
        let ranks: HashMap<String, u32> = ranks.into_iter().collect();
        let unknown_rank = ranks.values().max().copied().unwrap_or(0) + 1;
        Self { ranks, unknown_rank }
    }

    /// Rank of `word` (lowercase fold), or the unknown-word sentinel.
    #[must_use]
    pub fn rank(&self, word: &str) -> u32 {
        self.ranks
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(self.unknown_rank)
    }

    /// Sentinel rank returned for words missing from the list.
    #[must_use]
    pub fn unknown_rank(&self) -> u32 {
        self.unknown_rank
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_sentence_table_keeps_third_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.tsv");
        fs::write(&path, "1\tfra\tLe chat est noir.\n2\tfra\tBonjour.\n").unwrap();

        let index = load_column_index(&path, b'\t', 2).unwrap();
        assert_eq!(index.get("1").map(String::as_str), Some("Le chat est noir."));
        assert_eq!(index.get("2").map(String::as_str), Some("Bonjour."));
    }

    #[test]
    fn test_link_table_keeps_second_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.tsv");
        fs::write(&path, "1\t10\n2\t20\n").unwrap();

        let index = load_column_index(&path, b'\t', 1).unwrap();
        assert_eq!(index.get("1").map(String::as_str), Some("10"));
        assert_eq!(index.get("2").map(String::as_str), Some("20"));
    }

    #[test]
    fn test_duplicate_key_last_write_wins_keeps_position() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.tsv");
        fs::write(&path, "1\t10\n2\t20\n1\t30\n").unwrap();

        let index = load_column_index(&path, b'\t', 1).unwrap();
        assert_eq!(index.get("1").map(String::as_str), Some("30"));

        // Overwriting must not move the key to the end.
        let keys: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1", "2"]);
    }

    #[test]
    fn test_iteration_follows_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.tsv");
        fs::write(&path, "9\tfra\tc\n3\tfra\ta\n7\tfra\tb\n").unwrap();

        let index = load_column_index(&path, b'\t', 2).unwrap();
        let keys: Vec<&str> = index.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["9", "3", "7"]);
    }

    #[test]
    fn test_narrow_row_is_format_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sentences.tsv");
        fs::write(&path, "1\tfra\tok\n2\tfra\n").unwrap();

        let err = load_column_index(&path, b'\t', 2).unwrap_err();
        match err {
            IndexError::Format { row, got, want, .. } => {
                assert_eq!(row, 2);
                assert_eq!(got, 2);
                assert_eq!(want, 3);
            }
            other => panic!("expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.tsv");
        let err = load_column_index(&path, b'\t', 1).unwrap_err();
        assert!(matches!(err, IndexError::FileAccess { .. }));
    }

    #[test]
    fn test_frequency_index_load_and_lookup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        fs::write(&path, "le 1\nchat 120\nnoir 540\n").unwrap();

        let freq = FrequencyIndex::load(&path).unwrap();
        assert_eq!(freq.len(), 3);
        assert_eq!(freq.rank("chat"), 120);
        // Lookups fold case; keys do not.
        assert_eq!(freq.rank("Chat"), 120);
        assert_eq!(freq.rank("zythum"), freq.unknown_rank());
        assert_eq!(freq.unknown_rank(), 541);
    }

    #[test]
    fn test_frequency_index_bad_rank() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        fs::write(&path, "le 1\nchat beaucoup\n").unwrap();

        let err = FrequencyIndex::load(&path).unwrap_err();
        match err {
            IndexError::Rank { word, value, .. } => {
                assert_eq!(word, "chat");
                assert_eq!(value, "beaucoup");
            }
            other => panic!("expected Rank error, got {other:?}"),
        }
    }

    #[test]
    fn test_frequency_duplicate_word_last_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        fs::write(&path, "chat 120\nchat 7\n").unwrap();

        let freq = FrequencyIndex::load(&path).unwrap();
        assert_eq!(freq.rank("chat"), 7);
    }

    #[test]
    fn test_empty_frequency_index_sentinel() {
        let freq = FrequencyIndex::from_ranks(std::iter::empty());
        assert!(freq.is_empty());
        assert_eq!(freq.rank("anything"), freq.unknown_rank());
    }
}
