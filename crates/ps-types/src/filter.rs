//! Case-insensitive substring filtering over fetched lists.
//!
//! Screens narrow what they already hold in memory; nothing here talks to
//! the server, indexes, or paginates.

use crate::{Bill, Document, Representative, Subscription};

/// A list item that can be narrowed by a free-text query.
pub trait Searchable {
    /// The fields the query is matched against; any one matching keeps the item.
    fn search_texts(&self) -> Vec<&str>;
}

impl Searchable for Bill {
    fn search_texts(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl Searchable for Document {
    fn search_texts(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

/// Name, or the constituency the member sits for.
impl Searchable for Representative {
    fn search_texts(&self) -> Vec<&str> {
        let mut texts = vec![self.name.as_str()];
        texts.extend(self.constituency_name.as_deref());
        texts
    }
}

impl Searchable for Subscription {
    fn search_texts(&self) -> Vec<&str> {
        vec![self.topic.as_deref().unwrap_or_default()]
    }
}

/// Items with a search field containing `query`, ignoring case, in input
/// order. An empty query keeps everything.
pub fn filter_by_query<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.search_texts()
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}
