use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use smallvec::SmallVec;

use crate::error::{PuzzleError, Result};
use crate::{MAX_GLYPH_COUNT, MAX_SLOT_LENGTH};

/// An identifier for a given letter or whatever, based on its index in the WordList's `glyphs`
/// field.
pub type GlyphId = usize;

/// An identifier for a given word, based on its index in the WordList's `words` field.
pub type WordId = usize;

/// A struct representing a word that can be chosen for a slot.
#[derive(Debug, Clone)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[GlyphId; MAX_SLOT_LENGTH]>,
}

impl Word {
    /// Length in cells, which is the number of chars rather than bytes.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The full dictionary of candidate words, deduplicated and in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    pub glyphs: SmallVec<[char; MAX_GLYPH_COUNT]>,
    pub words: Vec<Word>,
}

impl WordList {
    /// Build a word list from raw strings. Words are trimmed and uppercased; blank lines and
    /// repeats are dropped.
    pub fn new<I, S>(raw_words: I) -> WordList
        where
            I: IntoIterator<Item=S>,
            S: AsRef<str>,
    {
        let mut word_list = WordList::default();
        let mut glyph_ids_by_char: HashMap<char, GlyphId> = HashMap::new();
        let mut seen: HashSet<String> = HashSet::new();

        for raw_word in raw_words {
            let string = raw_word.as_ref().trim().to_uppercase();
            if string.is_empty() || !seen.insert(string.clone()) {
                continue;
            }

            let glyphs = string.chars().map(|c| {
                *glyph_ids_by_char.entry(c).or_insert_with(|| {
                    word_list.glyphs.push(c);
                    word_list.glyphs.len() - 1
                })
            }).collect();

            word_list.words.push(Word { string, glyphs });
        }

        word_list
    }

    /// Parse the contents of a word file: one word per line, optionally followed by a `,` or `;`
    /// and a score, which we don't use.
    pub fn parse(contents: &str) -> WordList {
        WordList::new(contents.lines().map(|line| {
            line.split(|c| c == ',' || c == ';').next().unwrap_or("")
        }))
    }

    /// Read and parse a word file.
    pub fn load(path: &Path) -> Result<WordList> {
        let contents = fs::read_to_string(path).map_err(|source| PuzzleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(WordList::parse(&contents))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    /// Find the id of a word by its (case-insensitive) spelling.
    pub fn find(&self, string: &str) -> Option<WordId> {
        let string = string.to_uppercase();
        self.words.iter().position(|word| word.string == string)
    }
}
