//! Resource kinds
//!
//! One [`Selector`](crate::select::Selector) per kind of AWS resource. Every
//! kind talks to AWS through [`AwsCli`](crate::aws::AwsCli) and selects raw
//! JSON records, so whatever the `aws` program reports is what gets printed
//! and remembered.
//!
//! | Kind                     | Search        | Recents scoped by |
//! |--------------------------|---------------|-------------------|
//! | [`Ec2InstanceSelector`]  | remote (tag)  | -                 |
//! | [`EbsSnapshotSelector`]  | remote (tag)  | -                 |
//! | [`StackSelector`]        | local         | -                 |
//! | [`HostedZoneSelector`]   | local         | -                 |
//! | [`RecordSetSelector`]    | local         | hosted zone       |
//! | [`SecretSelector`]       | remote (name) | -                 |
//! | [`LogGroupSelector`]     | remote        | -                 |
//! | [`LogStreamSelector`]    | local regex   | log group         |
//! | [`LogEventSelector`]     | remote        | not remembered    |

mod cloudformation_stack;
mod ebs_snapshot;
mod ec2_instance;
mod hosted_zone;
mod log_event;
mod log_group;
mod log_stream;
mod record_set;
mod secret;

pub use cloudformation_stack::StackSelector;
pub use ebs_snapshot::EbsSnapshotSelector;
pub use ec2_instance::Ec2InstanceSelector;
pub use hosted_zone::HostedZoneSelector;
pub use log_event::{LogEventOptions, LogEventSelector, parse_time_ago};
pub use log_group::LogGroupSelector;
pub use log_stream::{LogStreamOptions, LogStreamSelector, MAX_LOADED_STREAMS};
pub use record_set::{RecordSetOptions, RecordSetSelector};
pub use secret::SecretSelector;

use crate::layout::ColumnSpec;
use serde_json::{Value, json};

/// Value of the `Name` tag of an EC2-style record, or `null`
pub(crate) fn name_tag(item: &Value) -> Value {
    item["Tags"]
        .as_array()
        .and_then(|tags| tags.iter().find(|tag| tag["Key"] == "Name"))
        .map_or(Value::Null, |tag| tag["Value"].clone())
}

/// `--filters` matching a `Name` tag that contains `search`
pub(crate) fn name_tag_filter(search: &str) -> Vec<String> {
    if search.is_empty() {
        return Vec::new();
    }
    let filters = json!([{ "Name": "tag:Name", "Values": [format!("*{search}*")] }]);
    vec!["--filters".to_string(), filters.to_string()]
}

/// `--max-items <limit>` when a limit is set
pub(crate) fn max_items(limit: Option<usize>) -> Vec<String> {
    limit
        .map(|limit| vec!["--max-items".to_string(), limit.to_string()])
        .unwrap_or_default()
}

/// Flag and value pair
pub(crate) fn arg(flag: &str, value: impl ToString) -> [String; 2] {
    [flag.to_string(), value.to_string()]
}

/// Array at `key` of a response, in order
pub(crate) fn items_at(page: &Value, key: &str) -> Vec<Value> {
    page[key].as_array().cloned().unwrap_or_default()
}

/// String field of a record
pub(crate) fn text_field(item: &Value, key: &str) -> Option<String> {
    item[key].as_str().map(String::from)
}

/// Empty column that shows the recent marker
pub(crate) fn recent_marker_column() -> ColumnSpec<Value> {
    ColumnSpec::computed(|_: &Value| Value::Null)
        .width(crate::layout::RECENT_MARKER.len())
        .show_recent()
}
