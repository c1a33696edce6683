//! EC2 instances

use super::{arg, items_at, max_items, name_tag, name_tag_filter, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColorMap, ColumnSpec, Format};
use crate::select::{PageRequest, RefetchRequest, Selector};
use colored::Color;
use serde_json::Value;

/// Display text of each instance state
const STATES: [(&str, &str); 6] = [
    ("pending", "🔵 Pending"),
    ("running", "🟢 Running"),
    ("shutting-down", "🟠 Shutting Down"),
    ("terminated", "⚫️ Terminated"),
    ("stopping", "🟠 Stopping"),
    ("stopped", "🔴 Stopped"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Ec2InstanceSelector;

impl Ec2InstanceSelector {
    fn instances(page: &Value) -> Vec<Value> {
        items_at(page, "Reservations")
            .iter()
            .flat_map(|reservation| items_at(reservation, "Instances"))
            .collect()
    }
}

impl Selector for Ec2InstanceSelector {
    type Client = AwsCli;
    type Options = ();
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "EC2 Instance"
    }

    fn default_limit(&self) -> Option<usize> {
        Some(100)
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["selectEC2Instance".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, AwsCli, ()>) -> Result<Value, AwsError> {
        let mut args = name_tag_filter(request.search);
        args.extend(max_items(request.limit));
        request
            .client
            .call("ec2", "describe-instances", &args, request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        Self::instances(&page)
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "InstanceId")
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        match request
            .client
            .call("ec2", "describe-instances", &arg("--instance-ids", request.id), request.abort)
            .await
        {
            Ok(page) => Ok(Self::instances(&page).into_iter().next()),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::computed(name_tag),
            ColumnSpec::path("InstanceId").width(19),
            ColumnSpec::path("State.Name")
                .show_recent()
                .format(Format::lookup(STATES))
                .colors(ColorMap::new().on("running", Color::Green).other(Color::BrightBlack))
                .width(16),
            ColumnSpec::path("LaunchTime").format(Format::RelativeTime),
        ]
    }
}
