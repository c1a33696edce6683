//! Selection engine
//!
//! Runs one interactive selection end to end: nested pre-selections, the
//! prompt fed by a [`SuggestionPipeline`], re-resolution of recent entries, and
//! the recents write.

use super::selector::{RefetchRequest, Selector};
use super::suggest::{ItemFilter, SuggestionPipeline};
use super::{Candidate, CancellationToken, SelectError};
use crate::layout::RowLayout;
use crate::recents::{CategoryKey, RecentsStore};
use crate::ui::{Prompt, PromptConfig};

/// Everything a selection needs besides the selector itself
///
/// Nested selections reuse the same context, so they share the prompt, the
/// recents store and the profile/region scope.
pub struct SelectContext<'a, P> {
    pub prompt: &'a mut P,
    /// `None` disables recents for every selection run with this context
    pub recents: Option<&'a RecentsStore>,
    /// Appended to every category key, usually `[profile, region]`
    pub scope: Vec<String>,
    /// Region shown in the default prompt message
    pub region: String,
    /// Width rows are laid out for
    pub terminal_width: usize,
    /// Most rows the prompt shows at once; `None` fills the screen
    pub visible_rows: Option<usize>,
}

impl<'a, P> SelectContext<'a, P> {
    /// Create a context without recents
    pub fn new(prompt: &'a mut P, region: impl Into<String>, terminal_width: usize) -> Self {
        Self {
            prompt,
            recents: None,
            scope: Vec::new(),
            region: region.into(),
            terminal_width,
            visible_rows: None,
        }
    }

    /// Show at most `rows` choices at once
    #[must_use]
    pub const fn with_visible_rows(mut self, rows: Option<usize>) -> Self {
        self.visible_rows = rows;
        self
    }

    /// Remember selections in `store`
    #[must_use]
    pub fn with_recents(mut self, store: Option<&'a RecentsStore>) -> Self {
        self.recents = store;
        self
    }

    /// Scope category keys by these values
    #[must_use]
    pub fn with_scope<I, S>(mut self, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = scope.into_iter().map(Into::into).collect();
        self
    }
}

/// One selection of a given kind, with its options
pub struct Selection<S: Selector> {
    selector: S,
    options: S::Options,
    message: Option<String>,
    limit: Option<usize>,
    use_recents: bool,
    filter: Option<Box<ItemFilter<S::Item>>>,
}

impl<S: Selector> Selection<S> {
    /// Select with the given kind-specific options
    pub const fn new(selector: S, options: S::Options) -> Self {
        Self {
            selector,
            options,
            message: None,
            limit: None,
            use_recents: true,
            filter: None,
        }
    }

    /// Override the prompt message
    #[must_use]
    pub fn message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Override the page size
    #[must_use]
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Turn recents on or off for this selection
    #[must_use]
    pub fn use_recents(mut self, use_recents: bool) -> Self {
        self.use_recents = use_recents;
        self
    }

    /// Only offer items accepted by `filter`
    #[must_use]
    pub fn filter(mut self, filter: impl Fn(&S::Item) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Run the selection
    ///
    /// # Errors
    ///
    /// - [`SelectError::NoSelection`] if the prompt is aborted or a placeholder
    ///   is confirmed
    /// - [`SelectError::StaleRecentNotFound`] if a recent entry no longer
    ///   resolves (nothing is written to the recents store)
    /// - [`SelectError::Query`] for remote failures
    pub async fn run<P: Prompt>(
        self,
        ctx: &mut SelectContext<'_, P>,
        client: &S::Client,
    ) -> Result<S::Item, SelectError>
    where
        S::Item: Clone,
    {
        let Self {
            selector,
            options,
            message,
            limit,
            use_recents,
            filter,
        } = self;

        let options = selector.prepare(ctx, client, options).await?;
        let thing = selector.thing();

        let store = ctx.recents.filter(|_| use_recents && selector.uses_recents());
        let key = CategoryKey::new(selector.recent_key(&options)).scoped(ctx.scope.iter().cloned());

        let layout = RowLayout::new(selector.columns(), ctx.terminal_width);
        let pipeline = SuggestionPipeline {
            selector: &selector,
            client,
            options: &options,
            recents: store.map(|store| (store, &key)),
            layout: &layout,
            limit: limit.or_else(|| selector.default_limit()),
            filter: filter.as_deref(),
        };

        let config = PromptConfig::new(message.unwrap_or_else(|| default_message(thing, &ctx.region)))
            .with_limit(ctx.visible_rows);

        tracing::debug!(thing, key = %key.serialized(), "starting selection");
        let chosen = ctx
            .prompt
            .run::<Candidate<S::Item>>(&config, &pipeline)
            .await?
            .ok_or_else(|| SelectError::NoSelection {
                thing: thing.to_string(),
            })?;

        let item = if chosen.is_recent {
            let id = selector.get_id(&chosen.item).ok_or_else(|| SelectError::MissingId {
                thing: thing.to_string(),
            })?;

            let refetched = selector
                .refetch_recent(RefetchRequest {
                    client,
                    options: &options,
                    item: &chosen.item,
                    id: &id,
                    abort: &CancellationToken::new(),
                })
                .await?;

            refetched.ok_or_else(|| SelectError::StaleRecentNotFound {
                thing: thing.to_string(),
                id: id.to_string(),
            })?
        } else {
            chosen.item
        };

        if let Some(store) = store {
            store.save(&key, &item, |i| selector.get_id(i));
        }

        Ok(item)
    }
}

/// `Select a|an <thing> (region: <region>)`
#[must_use]
pub fn default_message(thing: &str, region: &str) -> String {
    let article = match thing.chars().next() {
        Some(c) if "aeiouAEIOU".contains(c) => "an",
        _ => "a",
    };
    format!("Select {article} {thing} (region: {region})")
}
