//! Secrets Manager secrets

use super::{arg, items_at, max_items, text_field};
use crate::aws::{AwsCli, AwsError};
use crate::layout::{ColumnSpec, Format};
use crate::select::{PageRequest, RefetchRequest, Selector};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, Default)]
pub struct SecretSelector;

fn name_filter(search: &str) -> Vec<String> {
    if search.is_empty() {
        return Vec::new();
    }
    let filters = json!([{ "Key": "name", "Values": [search] }]);
    vec!["--filters".to_string(), filters.to_string()]
}

impl Selector for SecretSelector {
    type Client = AwsCli;
    type Options = ();
    type Page = Value;
    type Item = Value;
    type Id = String;

    fn thing(&self) -> &'static str {
        "Secrets Manager Secret"
    }

    fn recent_key(&self, _options: &()) -> Vec<String> {
        vec!["secretsManagerSecret".to_string()]
    }

    async fn get_page(&self, request: PageRequest<'_, AwsCli, ()>) -> Result<Value, AwsError> {
        let mut args = name_filter(request.search);
        args.extend(max_items(request.limit));
        request
            .client
            .call("secretsmanager", "list-secrets", &args, request.abort)
            .await
    }

    fn get_items(&self, page: Value) -> Vec<Value> {
        items_at(&page, "SecretList")
    }

    fn get_id(&self, item: &Value) -> Option<String> {
        text_field(item, "ARN")
    }

    async fn refetch_recent(
        &self,
        request: RefetchRequest<'_, AwsCli, (), Value, String>,
    ) -> Result<Option<Value>, AwsError> {
        match request
            .client
            .call("secretsmanager", "describe-secret", &arg("--secret-id", request.id), request.abort)
            .await
        {
            Ok(secret) if secret.is_null() => Ok(None),
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn columns(&self) -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::path("Name"),
            ColumnSpec::path("LastAccessedDate").format(Format::RelativeTime),
        ]
    }
}
