use std::collections::BTreeSet;
use std::path::Path;

use smallvec::SmallVec;

use crate::grid::read_file;
use crate::{LoadError, WordId, MAX_SLOT_LENGTH};

/// A struct representing a word that can be chosen for a given slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub glyphs: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let glyphs = string.chars().collect();
        Word { string, glyphs }
    }

    /// Length in characters, which is what a slot's length is compared against.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The letter at `idx`, or `None` if the word is too short to reach it.
    pub fn glyph(&self, idx: usize) -> Option<char> {
        self.glyphs.get(idx).copied()
    }
}

/// The full set of candidate words, upper-cased, de-duplicated and sorted. A `WordId` is an index
/// into this list, so ascending `WordId` order is alphabetical order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<Word>,
}

impl Vocabulary {
    pub fn new<I, S>(words: I) -> Vocabulary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();

        Vocabulary { words: words.into_iter().map(Word::new).collect() }
    }

    /// Parse a word list with one word per line.
    pub fn parse(contents: &str) -> Result<Vocabulary, LoadError> {
        let vocabulary = Vocabulary::new(contents.lines());
        if vocabulary.is_empty() {
            return Err(LoadError::EmptyVocabulary);
        }
        Ok(vocabulary)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vocabulary, LoadError> {
        Vocabulary::parse(&read_file(path.as_ref())?)
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

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Look up the id of a word, if it's in the vocabulary.
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        let word = word.to_uppercase();
        self.words.binary_search_by(|candidate| candidate.string.cmp(&word)).ok()
    }
}
