//! CloudWatch log events of one log stream
//!
//! The query is either a CloudWatch filter pattern or a time such as
//! `15 minutes ago`, which moves the start of the listed window instead of
//! filtering. A moved start stays in effect for later queries of the same
//! selection. Log events are never remembered.

use super::log_group::LogGroupSelector;
use super::log_stream::{LogStreamOptions, LogStreamSelector};
use super::{arg, items_at, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColumnSpec, Format};
use crate::select::{
    CancellationToken, PageRequest, SelectContext, SelectError, Selection, Selector,
};
use crate::ui::Prompt;
use chrono::{TimeDelta, Utc};
use regex::RegexBuilder;
use serde_json::Value;
use std::cell::Cell;

/// How far before the stream's last event the window starts by default
const DEFAULT_LOOKBACK: TimeDelta = TimeDelta::minutes(5);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogEventOptions {
    pub log_group_name: Option<String>,
    pub log_stream_name: Option<String>,
    /// Window start in epoch milliseconds
    pub start_time: Option<i64>,
}

/// Parse `<n> <unit> ago`
///
/// Months count as 30 days. Returns `None` when `query` has another shape.
#[must_use]
pub fn parse_time_ago(query: &str) -> Option<TimeDelta> {
    let pattern = RegexBuilder::new(
        r"^(\d+)\s*(months?|mos?|weeks?|wks?|w|days?|d|hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s|ms)\s+ago$",
    )
    .case_insensitive(true)
    .build()
    .ok()?;

    let captures = pattern.captures(query.trim())?;
    let quantity: i64 = captures[1].parse().ok()?;

    let delta = match captures[2].to_lowercase().as_str() {
        "months" | "month" | "mos" | "mo" => TimeDelta::try_days(quantity.checked_mul(30)?)?,
        "weeks" | "week" | "wks" | "wk" | "w" => TimeDelta::try_weeks(quantity)?,
        "days" | "day" | "d" => TimeDelta::try_days(quantity)?,
        "hours" | "hour" | "hrs" | "hr" | "h" => TimeDelta::try_hours(quantity)?,
        "minutes" | "minute" | "mins" | "min" | "m" => TimeDelta::try_minutes(quantity)?,
        "seconds" | "second" | "secs" | "sec" | "s" => TimeDelta::try_seconds(quantity)?,
        _ => TimeDelta::try_milliseconds(quantity)?,
    };
    Some(delta)
}

#[derive(Debug, Default)]
pub struct LogEventSelector {
    /// Start set by the latest time query, epoch milliseconds
    moved_start: Cell<Option<i64>>,
}

impl LogEventSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Window start and filter pattern for `search`
    ///
    /// A time query moves the start and lists every event; anything else
    /// filters from the current start.
    fn window<'q>(&self, search: &'q str, start_time: Option<i64>, now: i64) -> (i64, Option<&'q str>) {
        if let Some(offset) = parse_time_ago(search) {
            let start = now - offset.num_milliseconds();
            self.moved_start.set(Some(start));
            return (start, None);
        }

        let start = self
            .moved_start
            .get()
            .or(start_time)
            .unwrap_or(now - DEFAULT_LOOKBACK.num_milliseconds());
        (start, Some(search).filter(|search| !search.is_empty()))
    }

    /// Start the window a few minutes before the stream's last event
    async fn default_start_time(client: &AwsCli, group: &str, stream: &str) -> Result<i64, AwsError> {
        let mut args = arg("--log-group-name", group).to_vec();
        args.extend(arg("--log-stream-name-prefix", stream));

        let page = client
            .call("logs", "describe-log-streams", &args, &CancellationToken::new())
            .await?;
        let last_event = items_at(&page, "logStreams")
            .iter()
            .find(|s| s["logStreamName"] == stream)
            .and_then(|s| s["lastEventTimestamp"].as_i64())
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        Ok(last_event - DEFAULT_LOOKBACK.num_milliseconds())
    }

    async fn filter_events(
        request: &PageRequest<'_, AwsCli, LogEventOptions>,
        window: [String; 4],
        filter_pattern: &str,
    ) -> Result<Vec<Value>, AwsError> {
        let options = request.options;
        let mut args = arg("--log-group-name", options.log_group_name.as_deref().unwrap_or_default()).to_vec();
        args.extend(arg("--log-stream-names", options.log_stream_name.as_deref().unwrap_or_default()));
        args.extend(arg("--filter-pattern", filter_pattern));
        args.extend(window);

        let page = request
            .client
            .call("logs", "filter-log-events", &args, request.abort)
            .await?;
        Ok(items_at(&page, "events"))
    }

    /// Read every event of the window, following forward tokens until they repeat
    async fn all_events(
        request: &PageRequest<'_, AwsCli, LogEventOptions>,
        window: [String; 4],
    ) -> Result<Vec<Value>, AwsError> {
        let options = request.options;
        let mut base = arg("--log-group-name", options.log_group_name.as_deref().unwrap_or_default()).to_vec();
        base.extend(arg("--log-stream-name", options.log_stream_name.as_deref().unwrap_or_default()));
        base.extend(window);
        base.push("--start-from-head".to_string());

        let mut events = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut args = base.clone();
            if let Some(token) = &token {
                args.extend(arg("--next-token", token));
            }

            let page = request
                .client
                .call("logs", "get-log-events", &args, request.abort)
                .await?;
            events.extend(items_at(&page, "events"));

            let next = text_field(&page, "nextForwardToken");
            if next.is_none() || next == token {
                break;
            }
            token = next;
        }
        Ok(events)
    }
}

impl Selector for LogEventSelector {
    type Client = AwsCli;
    type Options = LogEventOptions;
    type Page = Vec<Value>;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "CloudWatch Log Event"
    }

    fn uses_recents(&self) -> bool {
        false
    }

    fn recent_key(&self, _options: &LogEventOptions) -> Vec<String> {
        vec!["selectCloudWatchLogEvent".to_string()]
    }

    async fn prepare<P: Prompt>(
        &self,
        ctx: &mut SelectContext<'_, P>,
        client: &AwsCli,
        options: LogEventOptions,
    ) -> Result<LogEventOptions, SelectError> {
        let log_group_name = match options.log_group_name {
            Some(name) => name,
            None => {
                let group = Selection::new(LogGroupSelector, ()).run(ctx, client).await?;
                text_field(&group, "logGroupName").ok_or_else(|| SelectError::MissingId {
                    thing: LogGroupSelector.thing().to_string(),
                })?
            }
        };

        let log_stream_name = match options.log_stream_name {
            Some(name) => name,
            None => {
                let streams = LogStreamSelector::new();
                let thing = streams.thing();
                let stream_options = LogStreamOptions {
                    log_group_name: Some(log_group_name.clone()),
                };
                let stream = Selection::new(streams, stream_options).run(ctx, client).await?;
                text_field(&stream, "logStreamName").ok_or_else(|| SelectError::MissingId {
                    thing: thing.to_string(),
                })?
            }
        };

        let start_time = match options.start_time {
            Some(start) => start,
            None => Self::default_start_time(client, &log_group_name, &log_stream_name).await?,
        };

        Ok(LogEventOptions {
            log_group_name: Some(log_group_name),
            log_stream_name: Some(log_stream_name),
            start_time: Some(start_time),
        })
    }

    async fn get_page(
        &self,
        request: PageRequest<'_, AwsCli, LogEventOptions>,
    ) -> Result<Vec<Value>, AwsError> {
        let now = Utc::now().timestamp_millis();
        let (start, filter_pattern) = self.window(request.search, request.options.start_time, now);

        let window = [
            "--start-time".to_string(),
            start.to_string(),
            "--end-time".to_string(),
            now.to_string(),
        ];
        tracing::debug!(start, filter = ?filter_pattern, "listing log events");

        match filter_pattern {
            Some(pattern) => Self::filter_events(&request, window, pattern).await,
            None => Self::all_events(&request, window).await,
        }
    }

    fn get_items(&self, page: Vec<Value>) -> Vec<Value> {
        page
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "eventId")
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("timestamp").format(Format::Timestamp),
            ColumnSpec::path("message"),
        ]
    }

    fn no_matches_message(&self) -> String {
        "No matching events found".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowLayout;
    use serde_json::json;

    #[test]
    fn test_parse_time_ago_units() {
        assert_eq!(parse_time_ago("15 minutes ago"), Some(TimeDelta::minutes(15)));
        assert_eq!(parse_time_ago("2h ago"), Some(TimeDelta::hours(2)));
        assert_eq!(parse_time_ago("  3 Days ago "), Some(TimeDelta::days(3)));
        assert_eq!(parse_time_ago("1 wk ago"), Some(TimeDelta::weeks(1)));
        assert_eq!(parse_time_ago("2 months ago"), Some(TimeDelta::days(60)));
        assert_eq!(parse_time_ago("30 secs ago"), Some(TimeDelta::seconds(30)));
        assert_eq!(parse_time_ago("500 ms ago"), Some(TimeDelta::milliseconds(500)));
    }

    #[test]
    fn test_parse_time_ago_rejects_other_queries() {
        assert_eq!(parse_time_ago("ERROR"), None);
        assert_eq!(parse_time_ago("5 minutes"), None);
        assert_eq!(parse_time_ago("ago"), None);
        assert_eq!(parse_time_ago("5 fortnights ago"), None);
    }

    #[test]
    fn test_time_query_moves_start_for_later_queries() {
        let selector = LogEventSelector::new();
        let now = 10_000_000;
        let given = Some(9_000_000);

        assert_eq!(selector.window("", given, now), (9_000_000, None));
        assert_eq!(selector.window("ERROR", given, now), (9_000_000, Some("ERROR")));

        assert_eq!(selector.window("15 minutes ago", given, now), (10_000_000 - 900_000, None));
        assert_eq!(selector.window("ERROR", given, now), (9_100_000, Some("ERROR")));
        assert_eq!(selector.window("", given, now), (9_100_000, None));
    }

    #[test]
    fn test_default_window_without_start_time() {
        let selector = LogEventSelector::new();
        assert_eq!(selector.window("", None, 1_000_000), (700_000, None));
    }

    #[test]
    fn test_events_are_not_remembered() {
        let selector = LogEventSelector::new();
        assert!(!selector.uses_recents());
        assert_eq!(selector.no_matches_message(), "No matching events found");
    }

    #[test]
    fn test_message_column_is_single_line() {
        let layout = RowLayout::new(LogEventSelector::new().columns(), 100);
        let event = json!({ "timestamp": 1_647_538_625_123_i64, "message": "line one\nline two\n" });
        let row = layout.render(&event, false);

        assert_eq!(row.cells()[0].text.len(), "2022/03/17 17:37:05.123".len());
        assert!(row.cells()[1].text.starts_with("line one line two"));
        assert!(!row.plain().contains('\n'));
    }
}
