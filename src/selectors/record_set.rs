//! Route53 record sets of one hosted zone

use super::hosted_zone::{HostedZoneSelector, zone_id};
use super::{arg, items_at, max_items};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColumnSpec, value_text};
use crate::select::{PageRequest, RefetchRequest, SelectContext, SelectError, Selection, Selector};
use crate::ui::Prompt;
use serde_json::{Value, json};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSetOptions {
    /// Zone to list; picked interactively when absent
    pub hosted_zone_id: Option<String>,
}

impl RecordSetOptions {
    fn zone(&self) -> &str {
        self.hosted_zone_id.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecordSetSelector;

/// `[Name, Type]` of a record identity
fn parse_id(id: &str) -> Option<(String, String)> {
    serde_json::from_str(id).ok()
}

/// Alias target, or the record values joined by `separator`
fn target(item: &Value, separator: &str) -> String {
    if let Some(dns_name) = item["AliasTarget"]["DNSName"].as_str() {
        return dns_name.to_string();
    }
    item["ResourceRecords"]
        .as_array()
        .map(|records| {
            records
                .iter()
                .map(|record| value_text(&record["Value"]))
                .collect::<Vec<_>>()
                .join(separator)
        })
        .unwrap_or_default()
}

impl Selector for RecordSetSelector {
    type Client = AwsCli;
    type Options = RecordSetOptions;
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "Route53 Record Set"
    }

    fn default_limit(&self) -> Option<usize> {
        Some(100)
    }

    fn recent_key(&self, options: &RecordSetOptions) -> Vec<String> {
        vec!["selectRoute53RecordSet".to_string(), options.zone().to_string()]
    }

    async fn prepare<P: Prompt>(
        &self,
        ctx: &mut SelectContext<'_, P>,
        client: &AwsCli,
        options: RecordSetOptions,
    ) -> Result<RecordSetOptions, SelectError> {
        if options.hosted_zone_id.is_some() {
            return Ok(options);
        }

        let zone = Selection::new(HostedZoneSelector, ()).run(ctx, client).await?;
        let id = zone_id(&zone).ok_or_else(|| SelectError::MissingId {
            thing: HostedZoneSelector.thing().to_string(),
        })?;
        Ok(RecordSetOptions {
            hosted_zone_id: Some(id),
        })
    }

    async fn get_page(
        &self,
        request: PageRequest<'_, AwsCli, RecordSetOptions>,
    ) -> Result<Value, AwsError> {
        let mut args = arg("--hosted-zone-id", request.options.zone()).to_vec();
        args.extend(max_items(request.limit));
        request
            .client
            .call("route53", "list-resource-record-sets", &args, request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        items_at(&page, "ResourceRecordSets")
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        let name = item["Name"].as_str()?;
        let kind = item["Type"].as_str()?;
        Some(json!([name, kind]).to_string())
    }

    fn matches(&self, item: &Value, query_lower: &str) -> bool {
        let text = format!("{} {}", value_text(&item["Name"]), target(item, " "));
        text.to_lowercase().contains(query_lower)
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, RecordSetOptions, Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        let Some((name, kind)) = parse_id(request.id) else {
            return Ok(None);
        };

        let mut args = arg("--hosted-zone-id", request.options.zone()).to_vec();
        args.extend(arg("--start-record-name", &name));
        args.extend(arg("--start-record-type", &kind));
        args.extend(max_items(Some(1)));

        match request
            .client
            .call("route53", "list-resource-record-sets", &args, request.abort)
            .await
        {
            Ok(page) => Ok(items_at(&page, "ResourceRecordSets")
                .into_iter()
                .find(|record| record["Name"] == name.as_str() && record["Type"] == kind.as_str())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("Name"),
            ColumnSpec::path("Type").width(5),
            ColumnSpec::computed(|item: &Value| {
                let alias = if item["AliasTarget"].is_null() { "No" } else { "Yes" };
                Value::from(format!("Alias: {alias}"))
            })
            .width("Alias: Yes".len()),
            ColumnSpec::computed(|item: &Value| Value::from(format!("TTL: {}", value_text(&item["TTL"]))))
                .width(12),
            ColumnSpec::computed(|item: &Value| Value::from(target(item, " | "))),
        ]
    }
}
