//! The interface every resource kind implements

use super::engine::SelectContext;
use super::{CancellationToken, SelectError};
use crate::aws::AwsError;
use crate::layout::ColumnSpec;
use crate::ui::Prompt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// Arguments to [`Selector::get_page`]
#[derive(Debug)]
pub struct PageRequest<'a, C, O> {
    pub client: &'a C,
    pub options: &'a O,
    /// Page size; `None` lets the remote side decide
    pub limit: Option<usize>,
    /// The query as typed
    pub search: &'a str,
    /// Fires when the suggestion cycle is superseded
    pub abort: &'a CancellationToken,
}

/// Arguments to [`Selector::refetch_recent`]
#[derive(Debug)]
pub struct RefetchRequest<'a, C, O, I, Id> {
    pub client: &'a C,
    pub options: &'a O,
    /// The possibly stale recent entry
    pub item: &'a I,
    pub id: &'a Id,
    pub abort: &'a CancellationToken,
}

/// A kind of resource that can be picked interactively
///
/// Implementations describe how to query the remote source and how to lay out
/// each item. The selection engine drives everything else.
#[allow(async_fn_in_trait)]
pub trait Selector {
    /// Handle on the remote source
    type Client;
    /// Kind-specific options, such as a parent resource id
    type Options;
    /// One raw response of the remote source
    type Page;
    /// The records being selected
    type Item: Serialize + DeserializeOwned + 'static;
    /// Stable identity of an item within one category
    type Id: PartialEq + fmt::Display;

    /// Human name of one item, e.g. `EC2 Instance`
    fn thing(&self) -> &'static str;

    /// Human name of several items
    fn things(&self) -> String {
        format!("{}s", self.thing())
    }

    /// Page size used when the caller does not set one
    fn default_limit(&self) -> Option<usize> {
        None
    }

    /// Whether selections of this kind are remembered at all
    fn uses_recents(&self) -> bool {
        true
    }

    /// Leading parts of the category key, before profile and region
    fn recent_key(&self, options: &Self::Options) -> Vec<String>;

    /// Complete the options before prompting
    ///
    /// Kinds nested under a parent resource run a selection for the parent
    /// here when its id was not given.
    ///
    /// # Errors
    ///
    /// Returns whatever error the nested selection or lookup produced.
    async fn prepare<P: Prompt>(
        &self,
        ctx: &mut SelectContext<'_, P>,
        client: &Self::Client,
        options: Self::Options,
    ) -> Result<Self::Options, SelectError> {
        let _ = (ctx, client);
        Ok(options)
    }

    /// Fetch one page of candidates for `request.search`
    ///
    /// # Errors
    ///
    /// Returns [`AwsError::Aborted`] when `request.abort` fires, or the remote
    /// failure otherwise.
    async fn get_page(
        &self,
        request: PageRequest<'_, Self::Client, Self::Options>,
    ) -> Result<Self::Page, AwsError>;

    /// Extract the items of a page, in page order
    fn get_items(&self, page: Self::Page) -> Vec<Self::Item>;

    /// Identity of an item, if it has one
    fn get_id(&self, item: &Self::Item) -> Option<Self::Id>;

    /// Local free-text filter; `query_lower` is the lowercased, non-empty query
    fn matches(&self, item: &Self::Item, query_lower: &str) -> bool {
        let _ = (item, query_lower);
        true
    }

    /// Look up the live record for a recent entry
    ///
    /// `Ok(None)` means the entry no longer resolves.
    ///
    /// # Errors
    ///
    /// Returns the remote failure, other than "not found".
    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, Self::Client, Self::Options, Self::Item, Self::Id>,
    ) -> Result<Option<Self::Item>, AwsError> {
        let _ = request;
        Ok(None)
    }

    /// Columns of a rendered row
    fn columns(&self) -> Vec<ColumnSpec<Self::Item>>;

    /// Text of the placeholder shown when nothing matches
    fn no_matches_message(&self) -> String {
        format!("No matching {} found", self.things())
    }
}
