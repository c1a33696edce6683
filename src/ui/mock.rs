//! Scripted prompt for testing

use super::traits::{Prompt, PromptConfig};
use crate::select::{CancellationToken, SelectError, SuggestionSource};
use futures::{FutureExt, StreamExt};
use std::collections::VecDeque;

/// Prompt that types predetermined queries and picks predetermined rows
///
/// Every run drains the suggestion cycle for the empty query, then one cycle
/// per typed query, and finally picks a row of the last snapshot it saw. Each
/// snapshot is recorded as the plain text of its rows.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    /// Row index picked by each successive run; `None` aborts
    picks: VecDeque<Option<usize>>,
    /// Queries typed after the initial empty one
    typed: Vec<String>,
    /// Type the next query while the current cycle is still in flight
    typing_ahead: bool,
    messages: Vec<String>,
    limits: Vec<Option<usize>>,
    queries: Vec<String>,
    emissions: Vec<Vec<String>>,
}

impl ScriptedPrompt {
    /// Create a prompt that picks row `index`
    #[must_use]
    pub fn pick(index: usize) -> Self {
        Self::default().then_pick(index)
    }

    /// Create a prompt that aborts
    #[must_use]
    pub fn aborted() -> Self {
        let mut prompt = Self::default();
        prompt.picks.push_back(None);
        prompt
    }

    /// Pick row `index` on the next run as well
    #[must_use]
    pub fn then_pick(mut self, index: usize) -> Self {
        self.picks.push_back(Some(index));
        self
    }

    /// Type these queries, in order, on every run
    #[must_use]
    pub fn typing<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.typed = queries.into_iter().map(Into::into).collect();
        self
    }

    /// Type these queries, each before the previous one's results arrive
    ///
    /// Every superseded cycle is polled once, canceled, then drained; its
    /// remaining snapshots are recorded like any other.
    #[must_use]
    pub fn typing_ahead<I, S>(self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut prompt = self.typing(queries);
        prompt.typing_ahead = true;
        prompt
    }

    /// Row limit received by every run
    #[must_use]
    pub fn limits(&self) -> &[Option<usize>] {
        &self.limits
    }

    /// Message of the most recent run
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    /// Messages of every run, in order
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Every query a cycle was started for
    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Every snapshot received, as plain row text
    #[must_use]
    pub fn emissions(&self) -> &[Vec<String>] {
        &self.emissions
    }
}

impl Prompt for ScriptedPrompt {
    async fn run<T>(
        &mut self,
        config: &PromptConfig,
        source: &dyn SuggestionSource<T>,
    ) -> Result<Option<T>, SelectError> {
        self.messages.push(config.message.clone());
        self.limits.push(config.limit);

        let Some(pick) = self.picks.pop_front().flatten() else {
            return Ok(None);
        };

        let mut last = Vec::new();
        let queries: Vec<String> = std::iter::once(String::new()).chain(self.typed.iter().cloned()).collect();
        let final_index = queries.len() - 1;
        for (index, query) in queries.into_iter().enumerate() {
            self.queries.push(query.clone());
            let token = CancellationToken::new();
            let mut suggestions = source.suggest(query, token.clone());

            if self.typing_ahead && index < final_index {
                if let Some(Some(choices)) = suggestions.next().now_or_never() {
                    let choices = choices?;
                    self.emissions
                        .push(choices.iter().map(|choice| choice.title.plain()).collect());
                }
                token.cancel();
            }

            while let Some(choices) = suggestions.next().await {
                let choices = choices?;
                self.emissions
                    .push(choices.iter().map(|choice| choice.title.plain()).collect());
                last = choices;
            }
        }

        Ok(last.into_iter().nth(pick).and_then(|choice| choice.value))
    }
}
