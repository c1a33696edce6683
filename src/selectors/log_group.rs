//! CloudWatch log groups

use super::{arg, items_at, max_items, recent_marker_column, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColumnSpec, Format};
use crate::select::{PageRequest, RefetchRequest, Selector};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogGroupSelector;

impl Selector for LogGroupSelector {
    type Client = AwsCli;
    type Options = ();
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "CloudWatch LogGroup"
    }

    fn default_limit(&self) -> Option<usize> {
        Some(50)
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["selectCloudWatchLogGroup".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, AwsCli, ()>) -> Result<Value, AwsError> {
        let mut args = max_items(request.limit);
        if !request.search.is_empty() {
            args.extend(arg("--log-group-name-pattern", request.search));
        }
        request
            .client
            .call("logs", "describe-log-groups", &args, request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        items_at(&page, "logGroups")
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "arn")
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        let Some(name) = text_field(request.item, "logGroupName") else {
            return Ok(None);
        };

        let page = request
            .client
            .call("logs", "describe-log-groups", &arg("--log-group-name-prefix", name), request.abort)
            .await?;
        Ok(items_at(&page, "logGroups")
            .into_iter()
            .find(|group| group["arn"] == request.id.as_str()))
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("logGroupName"),
            recent_marker_column(),
            ColumnSpec::path("creationTime").format(Format::Date),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowLayout;
    use serde_json::json;

    #[test]
    fn test_recent_marker_column() {
        let layout = RowLayout::new(LogGroupSelector.columns(), 100);
        let group = json!({ "logGroupName": "/aws/lambda/api", "arn": "arn:1", "creationTime": 1_647_538_620_000_i64 });

        let live = layout.render(&group, false);
        assert_eq!(live.cells()[1].text, "        ");
        assert_eq!(live.cells()[2].text.len(), "2022/03/17 17:37".len());

        let recent = layout.render(&group, true);
        assert_eq!(recent.cells()[1].text, "(recent)");
    }
}
