use std::collections::BTreeSet;

use crate::error::{Result, ValidationError};
use crate::tokenizer::{ensure_valid, split_into_words, StopWords};

/// A parsed query. Plus words add relevance, any minus word excludes a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct QueryWord<'a> {
    pub data: &'a str,
    pub is_minus: bool,
    pub is_stop: bool,
}

pub(crate) fn parse_query_word<'a>(text: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    if text.is_empty() {
        return Err(ValidationError::EmptyToken.into());
    }
    let (data, is_minus) = match text.strip_prefix('-') {
        Some("") => return Err(ValidationError::EmptyMinusWord.into()),
        Some(rest) if rest.starts_with('-') => {
            return Err(ValidationError::DoubleMinusWord(text.to_string()).into())
        }
        Some(rest) => (rest, true),
        None => (text, false),
    };
    ensure_valid(data)?;
    Ok(QueryWord { data, is_minus, is_stop: stop_words.contains(data) })
}

pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();
    for word in split_into_words(text) {
        let word = parse_query_word(word, stop_words)?;
        if word.is_stop { continue; }
        if word.is_minus {
            query.minus_words.insert(word.data.to_string());
        } else {
            query.plus_words.insert(word.data.to_string());
        }
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    fn stop() -> StopWords {
        StopWords::from_text("in the").unwrap()
    }

    #[test]
    fn splits_plus_and_minus_words() {
        let q = parse_query("fluffy -cat  dog -rat fluffy", &stop()).unwrap();
        assert_eq!(q.plus_words.iter().collect::<Vec<_>>(), ["dog", "fluffy"]);
        assert_eq!(q.minus_words.iter().collect::<Vec<_>>(), ["cat", "rat"]);
    }

    #[test]
    fn stop_words_are_dropped_silently() {
        let q = parse_query("cat in -the", &stop()).unwrap();
        assert_eq!(q.plus_words.len(), 1);
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn malformed_minus_words_fail() {
        assert_eq!(
            parse_query("--fluffy", &stop()),
            Err(SearchError::Validation(ValidationError::DoubleMinusWord("--fluffy".into())))
        );
        assert_eq!(
            parse_query("fluffy -", &stop()),
            Err(SearchError::Validation(ValidationError::EmptyMinusWord))
        );
    }

    #[test]
    fn control_characters_fail() {
        let err = parse_query("cat -d\x12og", &stop()).unwrap_err();
        assert_eq!(err, SearchError::Validation(ValidationError::InvalidCharacter("d\x12og".into())));
    }

    #[test]
    fn empty_word_fails() {
        assert_eq!(
            parse_query_word("", &stop()),
            Err(SearchError::Validation(ValidationError::EmptyToken))
        );
    }

    #[test]
    fn inner_dash_is_part_of_word() {
        let q = parse_query("well-known -semi-final", &stop()).unwrap();
        assert!(q.plus_words.contains("well-known"));
        assert!(q.minus_words.contains("semi-final"));
    }
}
