//! EBS snapshots owned by the caller's account

use super::{arg, items_at, max_items, name_tag, name_tag_filter, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColorMap, ColumnSpec, Format};
use crate::select::{PageRequest, RefetchRequest, Selector};
use colored::Color;
use serde_json::Value;

const STATES: [(&str, &str); 3] = [
    ("pending", "🔵 Pending"),
    ("completed", "🟢 Completed"),
    ("error", "🔴 Error"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct EbsSnapshotSelector;

impl Selector for EbsSnapshotSelector {
    type Client = AwsCli;
    type Options = ();
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "EBS Snapshot"
    }

    fn default_limit(&self) -> Option<usize> {
        Some(100)
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["selectEBSSnapshot".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, AwsCli, ()>) -> Result<Value, AwsError> {
        // Public snapshots would otherwise flood the list
        let mut args = arg("--owner-ids", "self").to_vec();
        args.extend(name_tag_filter(request.search));
        args.extend(max_items(request.limit));
        request
            .client
            .call("ec2", "describe-snapshots", &args, request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        items_at(&page, "Snapshots")
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "SnapshotId")
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        match request
            .client
            .call("ec2", "describe-snapshots", &arg("--snapshot-ids", request.id), request.abort)
            .await
        {
            Ok(page) => Ok(items_at(&page, "Snapshots").into_iter().next()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::computed(name_tag).grow(1),
            ColumnSpec::path("Description").grow(2),
            ColumnSpec::path("SnapshotId").width(22),
            ColumnSpec::path("State")
                .show_recent()
                .format(Format::lookup(STATES))
                .colors(ColorMap::new().on("completed", Color::Green).other(Color::BrightBlack))
                .width(12),
            ColumnSpec::path("StartTime").format(Format::RelativeTime),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowLayout;
    use serde_json::json;

    #[test]
    fn test_items_and_ids() {
        let page = json!({ "Snapshots": [{ "SnapshotId": "snap-1" }, { "SnapshotId": "snap-2" }] });
        let items = EbsSnapshotSelector.get_items(page);
        assert_eq!(EbsSnapshotSelector.get_id(&items[1]).as_deref(), Some("snap-2"));
    }

    #[test]
    fn test_description_grows_twice_as_fast_as_name() {
        let layout = RowLayout::new(EbsSnapshotSelector.columns(), 140);
        let widths = layout.widths();
        assert!(widths[1] >= 2 * widths[0]);
        assert_eq!(widths[2], 22);
        assert_eq!(widths[3], 12);
    }

    #[test]
    fn test_state_formatting() {
        let layout = RowLayout::new(EbsSnapshotSelector.columns(), 140);
        let row = layout.render(&json!({ "SnapshotId": "snap-1", "State": "completed" }), false);
        assert!(row.cells()[3].text.starts_with("🟢 Completed"));
        assert_eq!(row.cells()[3].color, Some(Color::Green));
    }
}
