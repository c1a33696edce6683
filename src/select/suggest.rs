//! Suggestion pipeline
//!
//! One suggestion cycle runs per query change and yields at most two
//! snapshots of the candidate list:
//!
//! 1. recents only, immediately, when the query is empty and recents are on;
//! 2. recents followed by live results, once the remote page arrives.
//!
//! The second snapshot is dropped when the cycle's token is canceled before it
//! is ready, so a superseded cycle never overwrites a newer one.

use super::selector::{PageRequest, Selector};
use super::{Candidate, CancellationToken, Choice, SelectError};
use crate::layout::RowLayout;
use crate::recents::{CategoryKey, RecentsStore};
use futures::stream::{self, LocalBoxStream, StreamExt};

/// Snapshots produced by one suggestion cycle
pub type Suggestions<'a, T> = LocalBoxStream<'a, Result<Vec<Choice<T>>, SelectError>>;

/// Something that produces candidate lists for a query
pub trait SuggestionSource<T> {
    /// Start a suggestion cycle for `query`, bounded by `token`
    fn suggest(&self, query: String, token: CancellationToken) -> Suggestions<'_, T>;
}

/// Predicate applied to every candidate, recents included
pub type ItemFilter<T> = dyn Fn(&T) -> bool;

/// The generic pipeline behind every selector
pub struct SuggestionPipeline<'a, S: Selector> {
    pub(crate) selector: &'a S,
    pub(crate) client: &'a S::Client,
    pub(crate) options: &'a S::Options,
    pub(crate) recents: Option<(&'a RecentsStore, &'a CategoryKey)>,
    pub(crate) layout: &'a RowLayout<S::Item>,
    pub(crate) limit: Option<usize>,
    pub(crate) filter: Option<&'a ItemFilter<S::Item>>,
}

type CandidateChoices<I> = Vec<Choice<Candidate<I>>>;

impl<S: Selector> SuggestionPipeline<'_, S> {
    fn keep(&self, item: &S::Item) -> bool {
        self.filter.is_none_or(|filter| filter(item))
    }

    /// Recent candidates for `query`; empty unless the query is empty
    fn recent_choices(&self, query: &str) -> CandidateChoices<S::Item> {
        let Some((store, key)) = self.recents else {
            return Vec::new();
        };
        if !query.is_empty() {
            return Vec::new();
        }

        store
            .load::<S::Item>(key)
            .into_iter()
            .filter(|item| self.keep(item))
            .map(|item| Choice::new(self.layout.render(&item, true), Candidate::recent(item)))
            .collect()
    }

    /// Fetch and append live candidates
    ///
    /// Returns `Ok(None)` when the cycle was canceled; cancellation is never an
    /// error.
    async fn settle(
        &self,
        query: &str,
        token: &CancellationToken,
        mut choices: CandidateChoices<S::Item>,
    ) -> Result<Option<CandidateChoices<S::Item>>, SelectError> {
        if token.is_canceled() {
            return Ok(None);
        }

        let abort = token.child();
        let page = self
            .selector
            .get_page(PageRequest {
                client: self.client,
                options: self.options,
                limit: self.limit,
                search: query,
                abort: &abort,
            })
            .await;

        let page = match page {
            Ok(page) => page,
            Err(_) if token.is_canceled() => {
                tracing::debug!(query, "suggestion cycle canceled during fetch");
                return Ok(None);
            }
            Err(e) if e.is_aborted() => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if token.is_canceled() {
            return Ok(None);
        }

        let query_lower = query.to_lowercase();
        let live = self
            .selector
            .get_items(page)
            .into_iter()
            .filter(|item| query.is_empty() || self.selector.matches(item, &query_lower))
            .filter(|item| self.keep(item))
            .map(|item| Choice::new(self.layout.render(&item, false), Candidate::live(item)));
        choices.extend(live);

        if choices.is_empty() {
            choices.push(Choice::placeholder(self.selector.no_matches_message()));
        }

        tracing::debug!(query, count = choices.len(), "suggestion cycle settled");
        Ok(Some(choices))
    }
}

impl<S> SuggestionSource<Candidate<S::Item>> for SuggestionPipeline<'_, S>
where
    S: Selector,
    S::Item: Clone,
{
    fn suggest(&self, query: String, token: CancellationToken) -> Suggestions<'_, Candidate<S::Item>> {
        let recents = self.recent_choices(&query);
        let immediate = (!recents.is_empty()).then(|| Ok(recents.clone()));

        let settled = stream::once(async move { self.settle(&query, &token, recents).await })
            .filter_map(|outcome| async move { outcome.transpose() });

        stream::iter(immediate).chain(settled).boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowLayout;
    use crate::testing::{MemorySelector, name_of};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        store: RecentsStore,
        key: CategoryKey,
        layout: RowLayout<Value>,
    }

    impl Fixture {
        fn new(selector: &MemorySelector) -> Self {
            let dir = TempDir::new().unwrap();
            let store = RecentsStore::new(dir.path().join("recents.json"));
            Self {
                _dir: dir,
                store,
                key: CategoryKey::new(["memory"]).scoped(["default", "us-east-1"]),
                layout: RowLayout::new(selector.columns(), 80),
            }
        }

        fn remember(&self, selector: &MemorySelector, item: &Value) {
            self.store.save(&self.key, item, |i| selector.get_id(i));
        }

        fn pipeline<'a>(&'a self, selector: &'a MemorySelector) -> SuggestionPipeline<'a, MemorySelector> {
            SuggestionPipeline {
                selector,
                client: &(),
                options: &(),
                recents: Some((&self.store, &self.key)),
                layout: &self.layout,
                limit: None,
                filter: None,
            }
        }
    }

    fn names(choices: &[Choice<Candidate<Value>>]) -> Vec<(String, bool)> {
        choices
            .iter()
            .filter_map(|c| c.value.as_ref())
            .map(|c| (name_of(&c.item), c.is_recent))
            .collect()
    }

    #[tokio::test]
    async fn test_recents_first_then_recents_plus_live() {
        let selector = MemorySelector::new(vec![json!({"id": "4", "name": "d"}), json!({"id": "5", "name": "e"})]);
        let fixture = Fixture::new(&selector);
        for (id, name) in [("3", "c"), ("2", "b"), ("1", "a")] {
            fixture.remember(&selector, &json!({ "id": id, "name": name }));
        }

        let pipeline = fixture.pipeline(&selector);
        let emissions: Vec<_> = pipeline
            .suggest(String::new(), CancellationToken::new())
            .collect()
            .await;

        assert_eq!(emissions.len(), 2);
        let first = emissions[0].as_ref().unwrap();
        let second = emissions[1].as_ref().unwrap();

        let recent = |n: &str| (n.to_string(), true);
        let live = |n: &str| (n.to_string(), false);
        assert_eq!(names(first), vec![recent("a"), recent("b"), recent("c")]);
        assert_eq!(
            names(second),
            vec![recent("a"), recent("b"), recent("c"), live("d"), live("e")]
        );
    }

    #[tokio::test]
    async fn test_non_empty_query_skips_recents_and_filters() {
        let selector = MemorySelector::new(vec![json!({"id": "1", "name": "web-1"}), json!({"id": "2", "name": "db"})]);
        let fixture = Fixture::new(&selector);
        fixture.remember(&selector, &json!({"id": "9", "name": "web-old"}));

        let emissions: Vec<_> = fixture
            .pipeline(&selector)
            .suggest("WEB".into(), CancellationToken::new())
            .collect()
            .await;

        assert_eq!(emissions.len(), 1);
        assert_eq!(names(emissions[0].as_ref().unwrap()), vec![("web-1".to_string(), false)]);
    }

    #[tokio::test]
    async fn test_empty_result_yields_single_placeholder() {
        let selector = MemorySelector::new(Vec::new());
        let fixture = Fixture::new(&selector);

        let emissions: Vec<_> = fixture
            .pipeline(&selector)
            .suggest(String::new(), CancellationToken::new())
            .collect()
            .await;

        assert_eq!(emissions.len(), 1);
        let choices = emissions[0].as_ref().unwrap();
        assert_eq!(choices.len(), 1);
        assert!(!choices[0].is_selectable());
        assert_eq!(choices[0].title.plain(), "No matching memory items found");
    }

    #[tokio::test]
    async fn test_canceled_before_start_issues_no_fetch() {
        let selector = MemorySelector::new(vec![json!({"id": "1", "name": "a"})]);
        let fixture = Fixture::new(&selector);
        let token = CancellationToken::new();
        token.cancel();

        let emissions: Vec<_> = fixture.pipeline(&selector).suggest("a".into(), token).collect().await;

        assert!(emissions.is_empty());
        assert_eq!(selector.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_cancel_during_fetch_aborts_and_emits_nothing_more() {
        let selector = MemorySelector::new(vec![json!({"id": "1", "name": "live"})])
            .with_latency(Duration::from_secs(30));
        let fixture = Fixture::new(&selector);
        fixture.remember(&selector, &json!({"id": "9", "name": "old"}));

        let token = CancellationToken::new();
        let pipeline = fixture.pipeline(&selector);
        let mut suggestions = pipeline.suggest(String::new(), token.clone());

        let first = suggestions.next().await.unwrap().unwrap();
        assert_eq!(names(&first), vec![("old".to_string(), true)]);

        let (rest, ()) = tokio::join!(suggestions.next(), async {
            tokio::task::yield_now().await;
            token.cancel();
        });

        assert!(rest.is_none());
        assert!(selector.was_aborted());
    }

    #[tokio::test]
    async fn test_remote_failure_propagates() {
        let selector = MemorySelector::new(Vec::new()).failing();
        let fixture = Fixture::new(&selector);

        let emissions: Vec<_> = fixture
            .pipeline(&selector)
            .suggest("x".into(), CancellationToken::new())
            .collect()
            .await;

        assert_eq!(emissions.len(), 1);
        assert!(matches!(emissions[0], Err(SelectError::Query(_))));
    }

    #[tokio::test]
    async fn test_item_filter_applies_to_recents_and_live() {
        let selector = MemorySelector::new(vec![json!({"id": "1", "name": "keep-live"}), json!({"id": "2", "name": "drop-live"})]);
        let fixture = Fixture::new(&selector);
        fixture.remember(&selector, &json!({"id": "3", "name": "drop-recent"}));
        fixture.remember(&selector, &json!({"id": "4", "name": "keep-recent"}));

        let filter = |item: &Value| name_of(item).starts_with("keep");
        let mut pipeline = fixture.pipeline(&selector);
        pipeline.filter = Some(&filter);

        let emissions: Vec<_> = pipeline.suggest(String::new(), CancellationToken::new()).collect().await;
        let last = emissions.last().unwrap().as_ref().unwrap();
        assert_eq!(
            names(last),
            vec![("keep-recent".to_string(), true), ("keep-live".to_string(), false)]
        );
    }
}
