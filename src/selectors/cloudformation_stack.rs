//! CloudFormation stacks
//!
//! `describe-stacks` has no name filter, so the query is matched locally
//! against the stack name.

use super::{arg, items_at, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColorMap, ColumnSpec, Format};
use crate::select::{PageRequest, RefetchRequest, Selector};
use colored::Color;
use serde_json::Value;

const GREEN: &[&str] = &[
    "CREATE_COMPLETE",
    "IMPORT_COMPLETE",
    "UPDATE_COMPLETE",
    "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
];

const BLUE: &[&str] = &[
    "CREATE_IN_PROGRESS",
    "DELETE_IN_PROGRESS",
    "IMPORT_IN_PROGRESS",
    "REVIEW_IN_PROGRESS",
    "UPDATE_IN_PROGRESS",
];

const RED: &[&str] = &[
    "CREATE_FAILED",
    "DELETE_FAILED",
    "IMPORT_ROLLBACK_COMPLETE",
    "IMPORT_ROLLBACK_FAILED",
    "IMPORT_ROLLBACK_IN_PROGRESS",
    "ROLLBACK_COMPLETE",
    "ROLLBACK_FAILED",
    "ROLLBACK_IN_PROGRESS",
    "UPDATE_FAILED",
    "UPDATE_ROLLBACK_COMPLETE",
    "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS",
    "UPDATE_ROLLBACK_FAILED",
    "UPDATE_ROLLBACK_IN_PROGRESS",
];

fn status_colors() -> ColorMap {
    let groups = [(GREEN, Color::Green), (BLUE, Color::Blue), (RED, Color::Red)];
    groups
        .into_iter()
        .flat_map(|(statuses, color)| statuses.iter().map(move |status| (*status, color)))
        .fold(ColorMap::new(), |colors, (status, color)| colors.on(status, color))
        .on("DELETE_COMPLETE", Color::BrightBlack)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StackSelector;

impl Selector for StackSelector {
    type Client = AwsCli;
    type Options = ();
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "CloudFormation Stack"
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["cloudFormationStack".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, AwsCli, ()>) -> Result<Value, AwsError> {
        request
            .client
            .call("cloudformation", "describe-stacks", &[], request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        items_at(&page, "Stacks")
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "StackId")
    }

    fn matches(&self, item: &Value, query_lower: &str) -> bool {
        item["StackName"]
            .as_str()
            .is_some_and(|name| name.to_lowercase().contains(query_lower))
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        let Some(name) = text_field(request.item, "StackName") else {
            return Ok(None);
        };

        match request
            .client
            .call("cloudformation", "describe-stacks", &arg("--stack-name", name), request.abort)
            .await
        {
            Ok(page) => Ok(items_at(&page, "Stacks").into_iter().next()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("StackName"),
            ColumnSpec::path("StackStatus")
                .min_width("UPDATE_ROLLBACK_FAILED".len())
                .colors(status_colors()),
            ColumnSpec::path("LastUpdatedTime").format(Format::RelativeTime),
            ColumnSpec::path("Description"),
        ]
    }
}
