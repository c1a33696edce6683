//! CloudWatch log streams of one log group
//!
//! Log groups can hold far more streams than fit in one listing, and the
//! remote side cannot filter by substring. Streams are therefore read newest
//! first, a page at a time, up to [`MAX_LOADED_STREAMS`]; the pages are cached
//! so later queries of the same selection scan them again without refetching.

use super::log_group::LogGroupSelector;
use super::{arg, items_at, max_items, recent_marker_column, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColumnSpec, Format};
use crate::select::{
    CancellationToken, PageRequest, RefetchRequest, SelectContext, SelectError, Selection, Selector,
};
use crate::ui::Prompt;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::cell::RefCell;

/// Most streams ever loaded for one selection
pub const MAX_LOADED_STREAMS: usize = 500;

/// Streams requested per page
const PAGE_SIZE: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStreamOptions {
    /// Group to list; picked interactively when absent
    pub log_group_name: Option<String>,
}

impl LogStreamOptions {
    fn group(&self) -> &str {
        self.log_group_name.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct PageCache {
    pages: Vec<Vec<Value>>,
    next_token: Option<String>,
    loaded: usize,
    exhausted: bool,
}

impl PageCache {
    fn is_complete(&self) -> bool {
        self.exhausted || self.loaded >= MAX_LOADED_STREAMS
    }
}

#[derive(Debug, Default)]
pub struct LogStreamSelector {
    cache: RefCell<PageCache>,
}

/// Case-insensitive pattern for a query; invalid expressions match literally
fn stream_pattern(query: &str) -> Result<Regex, regex::Error> {
    let query = query.trim();
    let build = |pattern: &str| RegexBuilder::new(pattern).case_insensitive(true).build();
    build(query).or_else(|_| build(regex::escape(query).as_str()))
}

impl LogStreamSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The page at `index`, fetching it if it is the next uncached one
    ///
    /// `Ok(None)` means there are no more pages to scan.
    async fn page(
        &self,
        index: usize,
        client: &AwsCli,
        group: &str,
        abort: &CancellationToken,
    ) -> Result<Option<Vec<Value>>, AwsError> {
        let next_token = {
            let cache = self.cache.borrow();
            if let Some(page) = cache.pages.get(index) {
                return Ok(Some(page.clone()));
            }
            if cache.is_complete() {
                return Ok(None);
            }
            cache.next_token.clone()
        };

        let mut args = arg("--log-group-name", group).to_vec();
        args.extend(arg("--order-by", "LastEventTime"));
        args.push("--descending".to_string());
        args.extend(max_items(Some(PAGE_SIZE)));
        if let Some(token) = next_token {
            args.extend(arg("--starting-token", token));
        }

        let response = client.call("logs", "describe-log-streams", &args, abort).await?;
        let streams = items_at(&response, "logStreams");

        let mut cache = self.cache.borrow_mut();
        cache.loaded += streams.len();
        cache.next_token = text_field(&response, "NextToken");
        cache.exhausted = cache.next_token.is_none() || streams.is_empty();
        cache.pages.push(streams.clone());
        tracing::debug!(loaded = cache.loaded, group, "cached log stream page");

        Ok(Some(streams))
    }
}

impl Selector for LogStreamSelector {
    type Client = AwsCli;
    type Options = LogStreamOptions;
    type Page = Vec<Value>;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "CloudWatch LogStream"
    }

    fn default_limit(&self) -> Option<usize> {
        Some(20)
    }

    fn recent_key(&self, options: &LogStreamOptions) -> Vec<String> {
        vec!["selectCloudWatchLogStream".to_string(), options.group().to_string()]
    }

    async fn prepare<P: Prompt>(
        &self,
        ctx: &mut SelectContext<'_, P>,
        client: &AwsCli,
        options: LogStreamOptions,
    ) -> Result<LogStreamOptions, SelectError> {
        if options.log_group_name.is_some() {
            return Ok(options);
        }

        let group = Selection::new(LogGroupSelector, ()).run(ctx, client).await?;
        Ok(LogStreamOptions {
            log_group_name: text_field(&group, "logGroupName"),
        })
    }

    async fn get_page(
        &self,
        request: PageRequest<'_, AwsCli, LogStreamOptions>,
    ) -> Result<Vec<Value>, AwsError> {
        let pattern = stream_pattern(request.search).ok();
        let limit = request.limit.unwrap_or(usize::MAX);
        let mut matched = Vec::new();

        let mut index = 0;
        while matched.len() < limit {
            let Some(page) = self
                .page(index, request.client, request.options.group(), request.abort)
                .await?
            else {
                break;
            };
            if request.abort.is_canceled() {
                return Err(AwsError::Aborted);
            }

            let remaining = limit - matched.len();
            matched.extend(
                page.into_iter()
                    .filter(|stream| {
                        stream["logStreamName"]
                            .as_str()
                            .is_some_and(|name| pattern.as_ref().is_none_or(|p| p.is_match(name)))
                    })
                    .take(remaining),
            );
            index += 1;
        }

        Ok(matched)
    }

    fn get_items(&self, page: Vec<Value>) -> Vec<Value> {
        page
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "arn")
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, LogStreamOptions, Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        let Some(name) = text_field(request.item, "logStreamName") else {
            return Ok(None);
        };

        let mut args = arg("--log-group-name", request.options.group()).to_vec();
        args.extend(arg("--log-stream-name-prefix", name));

        match request
            .client
            .call("logs", "describe-log-streams", &args, request.abort)
            .await
        {
            Ok(page) => Ok(items_at(&page, "logStreams")
                .into_iter()
                .find(|stream| stream["arn"] == request.id.as_str())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("logStreamName"),
            recent_marker_column(),
            ColumnSpec::path("lastEventTimestamp").format(Format::RelativeTime),
        ]
    }

    fn no_matches_message(&self) -> String {
        format!(
            "No matching {} found (only the most recent {MAX_LOADED_STREAMS} were checked)",
            self.things()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_is_case_insensitive_regex() {
        let pattern = stream_pattern("^APP-\\d+$").unwrap();
        assert!(pattern.is_match("app-42"));
        assert!(!pattern.is_match("app-x"));
    }

    #[test]
    fn test_invalid_pattern_matches_literally() {
        let pattern = stream_pattern("  [web(  ").unwrap();
        assert!(pattern.is_match("2024/01/01/[WEB(1"));
        assert!(!pattern.is_match("web"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(stream_pattern("").unwrap().is_match("anything"));
    }

    #[test]
    fn test_placeholder_mentions_load_limit() {
        assert_eq!(
            LogStreamSelector::new().no_matches_message(),
            "No matching CloudWatch LogStreams found (only the most recent 500 were checked)"
        );
    }

    #[test]
    fn test_recent_key_is_scoped_by_group() {
        let options = LogStreamOptions {
            log_group_name: Some("/aws/lambda/api".into()),
        };
        assert_eq!(
            LogStreamSelector::new().recent_key(&options),
            vec!["selectCloudWatchLogStream", "/aws/lambda/api"]
        );
    }

    #[test]
    fn test_cache_completion() {
        let mut cache = PageCache::default();
        assert!(!cache.is_complete());
        cache.loaded = MAX_LOADED_STREAMS;
        assert!(cache.is_complete());

        let exhausted = PageCache {
            exhausted: true,
            ..PageCache::default()
        };
        assert!(exhausted.is_complete());
    }
}
