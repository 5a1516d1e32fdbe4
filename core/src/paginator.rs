use std::fmt;

use crate::error::{Result, ValidationError};

/// One page of a paginated slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page<'a, T> {
    items: &'a [T],
}

impl<'a, T> Page<'a, T> {
    pub fn items(&self) -> &'a [T] { self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'a, T> { self.items.iter() }
}

impl<T: fmt::Display> fmt::Display for Page<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in self.items {
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Consecutive pages of `page_size` items; the last page may be shorter.
#[derive(Debug, Clone)]
pub struct Paginator<'a, T> {
    pages: Vec<Page<'a, T>>,
}

impl<'a, T> Paginator<'a, T> {
    pub fn new(items: &'a [T], page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(ValidationError::ZeroPageSize.into());
        }
        let pages = items.chunks(page_size).map(|items| Page { items }).collect();
        Ok(Self { pages })
    }

    pub fn len(&self) -> usize { self.pages.len() }

    pub fn is_empty(&self) -> bool { self.pages.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Page<'a, T>> { self.pages.iter() }
}

impl<'p, 'a, T> IntoIterator for &'p Paginator<'a, T> {
    type Item = &'p Page<'a, T>;
    type IntoIter = std::slice::Iter<'p, Page<'a, T>>;

    fn into_iter(self) -> Self::IntoIter { self.pages.iter() }
}

pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Paginator<'_, T>> {
    Paginator::new(items, page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn last_page_holds_the_remainder() {
        let items = [1, 2, 3, 4, 5];
        let pages = paginate(&items, 2).unwrap();
        let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(pages.iter().last().unwrap().items(), &[5]);
    }

    #[test]
    fn exact_fit_and_oversized_pages() {
        let items = [1, 2, 3, 4];
        assert_eq!(paginate(&items, 2).unwrap().len(), 2);
        assert_eq!(paginate(&items, 10).unwrap().len(), 1);
    }

    #[test]
    fn empty_input_has_no_pages() {
        let items: [i32; 0] = [];
        assert!(paginate(&items, 3).unwrap().is_empty());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = paginate(&[1], 0).unwrap_err();
        assert_eq!(err, SearchError::Validation(ValidationError::ZeroPageSize));
    }

    #[test]
    fn page_displays_its_items() {
        let items = ["a", "b", "c"];
        let pages = paginate(&items, 2).unwrap();
        let rendered: Vec<String> = pages.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["ab", "c"]);
    }
}
