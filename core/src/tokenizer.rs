use crate::error::{Result, ValidationError};
use std::collections::HashSet;

/// Split text into whitespace-delimited words. Runs of whitespace never produce empty words.
pub fn split_into_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// A word is valid when it holds no control characters (code points 0..=31).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

pub(crate) fn ensure_valid(word: &str) -> Result<()> {
    if is_valid_word(word) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCharacter(word.to_string()).into())
    }
}

/// Words excluded from indexing and from query matching.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stop_words = Self::default();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() { continue; }
            ensure_valid(word)?;
            stop_words.words.insert(word.to_string());
        }
        Ok(stop_words)
    }

    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    /// Add every word of `text`. Nothing is added if any word is invalid.
    pub fn extend_from_text(&mut self, text: &str) -> Result<()> {
        let words = split_into_words(text);
        for word in &words {
            ensure_valid(word)?;
        }
        self.words.extend(words.into_iter().map(str::to_string));
        Ok(())
    }

    pub fn contains(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

/// Tokenize document text, dropping stop words. Fails if any word holds a control character.
pub fn split_into_words_no_stop<'a>(text: &'a str, stop_words: &StopWords) -> Result<Vec<&'a str>> {
    let mut words = Vec::new();
    for word in split_into_words(text) {
        ensure_valid(word)?;
        if stop_words.contains(word) { continue; }
        words.push(word);
    }
    Ok(words)
}
