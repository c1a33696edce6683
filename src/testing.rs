//! Testing utilities for aws-select
//!
//! Provides [`MemorySelector`], a resource kind backed by an in-memory list,
//! so the selection engine can be exercised without the `aws` program.
//!
//! Only available when compiled with `cfg(test)`.

use crate::aws::AwsError;
use crate::layout::ColumnSpec;
use crate::select::{PageRequest, RefetchRequest, Selector};
use serde_json::Value;
use std::cell::Cell;
use std::time::Duration;

/// The `name` field of a test item, or an empty string
#[must_use]
pub fn name_of(item: &Value) -> String {
    item["name"].as_str().unwrap_or_default().to_string()
}

/// Selector over a fixed list of JSON items identified by their `id` field
///
/// # Examples
/// ```ignore
/// let selector = MemorySelector::new(vec![json!({"id": "1", "name": "web"})])
///     .with_latency(Duration::from_secs(30));
/// ```
#[derive(Debug, Default)]
pub struct MemorySelector {
    items: Vec<Value>,
    latency: Option<Duration>,
    failing: bool,
    fetches: Cell<usize>,
    aborted: Cell<bool>,
}

impl MemorySelector {
    /// Create a selector that lists `items` on every fetch
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Delay every fetch; the delay is abandoned when the request is aborted
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail every fetch with a remote error
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Number of fetches started so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    /// Whether a fetch was abandoned through its abort token
    pub fn was_aborted(&self) -> bool {
        self.aborted.get()
    }

    fn id_of(item: &Value) -> Option<String> {
        item["id"].as_str().map(String::from)
    }
}

impl Selector for MemorySelector {
    type Client = ();
    type Options = ();
    type Page = Vec<Value>;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "memory item"
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["memory".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, (), ()>) -> Result<Vec<Value>, AwsError> {
        self.fetches.set(self.fetches.get() + 1);

        if let Some(latency) = self.latency
            && request.abort.run_until_canceled(tokio::time::sleep(latency)).await.is_none()
        {
            self.aborted.set(true);
            return Err(AwsError::Aborted);
        }

        if self.failing {
            return Err(AwsError::Command {
                operation: "memory list-items".to_string(),
                code: Some(255),
                stderr: "An error occurred (AccessDenied)".to_string(),
            });
        }

        Ok(self.items.clone())
    }

    fn get_items(&self, page: Vec<Value>) -> Vec<Value> {
        page
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        Self::id_of(item)
    }

    fn matches(&self, item: &Value, query_lower: &str) -> bool {
        name_of(item).to_lowercase().contains(query_lower)
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, (), (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        Ok(self
            .items
            .iter()
            .find(|item| Self::id_of(item).as_ref() == Some(request.id))
            .cloned())
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("name").grow(1),
            ColumnSpec::path("id").width(8).show_recent(),
        ]
    }
}
