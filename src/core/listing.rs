//! # Paginated Filterable Lists
//!
//! `ListView` is the browsing engine behind every list screen. It knows
//! nothing about agencies or vehicles; it only needs each record to expose a
//! textual key through [`Searchable`].
//!
//! ```text
//! records ──filter──► view (indices) ──page──► Page { items, index, total }
//! ```
//!
//! The view is a list of indices into the record set, rebuilt whenever the
//! filter changes. Pages are borrowed slices of it, so asking for the current
//! page again is cheap and always reflects the latest state.
//!
//! Selection is a capability of the mode: `ListView<T, Select>` can pick a
//! record by ordinal, `ListView<T, Browse>` cannot.

use std::fmt;
use std::marker::PhantomData;

use log::debug;

pub const DEFAULT_PAGE_SIZE: usize = 2;

/// A record that can be filtered by a text key.
pub trait Searchable {
    /// Text matched (case-insensitively) against filter queries.
    fn search_key(&self) -> String;
}

impl Searchable for String {
    fn search_key(&self) -> String {
        self.clone()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Browse or Select. Sealed: only the two modes below exist.
pub trait ListMode: sealed::Sealed {}

/// Plain list: paginate and filter only.
#[derive(Debug)]
pub struct Browse;

/// Picker: paginate, filter and select.
#[derive(Debug)]
pub struct Select;

impl sealed::Sealed for Browse {}
impl sealed::Sealed for Select {}
impl ListMode for Browse {}
impl ListMode for Select {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// The filter matched nothing; the view was reset to all records.
    NoMatches(String),
    /// The ordinal is outside `1..=len` of the current view.
    OutOfRange { ordinal: usize, len: usize },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::NoMatches(query) => write!(f, "nothing matches \"{query}\""),
            ListError::OutOfRange { ordinal, len } if *len == 0 => {
                write!(f, "no item {ordinal}: the list is empty")
            }
            ListError::OutOfRange { ordinal, len } => {
                write!(f, "no item {ordinal}: choose between 1 and {len}")
            }
        }
    }
}

impl std::error::Error for ListError {}

pub struct ListView<T, M: ListMode = Browse> {
    records: Vec<T>,
    view: Vec<usize>,
    filter: Option<String>,
    page: usize,
    page_size: usize,
    mode: PhantomData<M>,
}

/// One page of the current view.
pub struct Page<'a, T> {
    records: &'a [T],
    indices: &'a [usize],
    first_ordinal: usize,
    pub index: usize,
    pub total_pages: usize,
}

impl<'a, T> Page<'a, T> {
    /// Records on this page with their 1-based ordinal in the whole view.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a T)> + use<'a, T> {
        let records = self.records;
        let first = self.first_ordinal;
        self.indices
            .iter()
            .enumerate()
            .map(move |(offset, &i)| (first + offset, &records[i]))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

impl<T: Searchable, M: ListMode> ListView<T, M> {
    /// A page size of 0 is treated as 1.
    pub fn new(records: Vec<T>, page_size: usize) -> Self {
        let view = (0..records.len()).collect();
        Self {
            records,
            view,
            filter: None,
            page: 0,
            page_size: page_size.max(1),
            mode: PhantomData,
        }
    }

    /// Keep only records whose key contains `query`, ignoring case.
    ///
    /// A blank query clears the filter. When nothing matches, the filter is
    /// dropped and the full record set is shown again.
    pub fn apply_filter(&mut self, query: &str) -> Result<(), ListError> {
        let query = query.trim();
        if query.is_empty() {
            self.clear_filter();
            return Ok(());
        }

        let needle = query.to_lowercase();
        let matches: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.search_key().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.page = 0;

        if matches.is_empty() {
            debug!("Filter {:?} matched nothing, showing all records", query);
            self.show_all();
            return Err(ListError::NoMatches(query.to_string()));
        }

        debug!("Filter {:?} matched {} records", query, matches.len());
        self.view = matches;
        self.filter = Some(query.to_string());
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        if self.filter.is_some() {
            self.show_all();
            self.page = 0;
        }
    }

    /// Replace the record set (after the underlying data changed), keeping
    /// the filter if it still matches something.
    pub fn reload(&mut self, records: Vec<T>) {
        self.records = records;
        let page = self.page;
        match self.filter.take() {
            Some(query) => {
                let _ = self.apply_filter(&query);
            }
            None => self.show_all(),
        }
        self.page = page.min(self.last_page());
    }

    pub fn next_page(&mut self) {
        if self.page < self.last_page() {
            self.page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    pub fn current_page(&self) -> Page<'_, T> {
        let start = (self.page * self.page_size).min(self.view.len());
        let end = (start + self.page_size).min(self.view.len());
        Page {
            records: &self.records,
            indices: &self.view[start..end],
            first_ordinal: start + 1,
            index: self.page,
            total_pages: self.total_pages(),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.view.len().div_ceil(self.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Number of records in the current (filtered) view.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// The records in the current view, in order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.view.iter().map(|&i| &self.records[i])
    }

    fn last_page(&self) -> usize {
        self.total_pages().saturating_sub(1)
    }

    fn show_all(&mut self) {
        self.view = (0..self.records.len()).collect();
        self.filter = None;
    }
}

impl<T: Searchable> ListView<T, Select> {
    /// The record at 1-based position `ordinal` of the current view.
    pub fn select_by_ordinal(&self, ordinal: usize) -> Result<&T, ListError> {
        ordinal
            .checked_sub(1)
            .and_then(|i| self.view.get(i))
            .map(|&i| &self.records[i])
            .ok_or(ListError::OutOfRange {
                ordinal,
                len: self.view.len(),
            })
    }
}
