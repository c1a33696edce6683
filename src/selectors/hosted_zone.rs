//! Route53 hosted zones

use super::{arg, max_items};
use crate::aws::{AwsCli, AwsError};
use crate::layout::ColumnSpec;
use crate::select::{PageRequest, RefetchRequest, Selector};
use serde_json::Value;

const ID_PREFIX: &str = "/hostedzone/";

/// Bare zone id, without the `/hostedzone/` prefix
pub(crate) fn zone_id(item: &Value) -> Option<String> {
    item["Id"]
        .as_str()
        .map(|id| id.strip_prefix(ID_PREFIX).unwrap_or(id).to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HostedZoneSelector;

impl Selector for HostedZoneSelector {
    type Client = AwsCli;
    type Options = ();
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "Route53 Hosted Zone"
    }

    fn default_limit(&self) -> Option<usize> {
        Some(100)
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["selectRoute53HostedZone".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, AwsCli, ()>) -> Result<Value, AwsError> {
        request
            .client
            .call("route53", "list-hosted-zones", &max_items(request.limit), request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        super::items_at(&page, "HostedZones")
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        zone_id(item)
    }

    fn matches(&self, item: &Value, query_lower: &str) -> bool {
        item["Name"]
            .as_str()
            .is_some_and(|name| name.to_lowercase().contains(query_lower))
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        match request
            .client
            .call("route53", "get-hosted-zone", &arg("--id", request.id), request.abort)
            .await
        {
            Ok(response) => Ok(Some(response["HostedZone"].clone()).filter(|zone| !zone.is_null())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::computed(|zone: &Value| {
                let private = zone["Config"]["PrivateZone"].as_bool().unwrap_or(false);
                Value::from(if private { "Private" } else { "Public" })
            })
            .width("Private".len()),
            ColumnSpec::path("Name"),
            ColumnSpec::path("Id"),
        ]
    }
}
