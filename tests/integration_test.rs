//! Integration tests for the aws-select public API
//!
//! These tests exercise argument parsing, the recents file and row layout the
//! way the binary uses them, without a terminal or an AWS account.

use aws_select::cli::{Cli, Commands};
use aws_select::commands::output::{apply_query, format_result};
use aws_select::layout::{ColumnSpec, RECENT_MARKER, RowLayout, fit_to_width};
use aws_select::recents::{CategoryKey, MAX_RECENTS, RecentsStore};
use aws_select::selectors::Ec2InstanceSelector;
use aws_select::select::Selector;
use clap::Parser;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("aws-select").chain(args.iter().copied()))
}

fn instance(id: &str, name: &str) -> Value {
    json!({
        "InstanceId": id,
        "PrivateIpAddress": "10.0.0.4",
        "State": { "Name": "running" },
        "Tags": [{ "Key": "Name", "Value": name }],
    })
}

fn instance_id(item: &Value) -> Option<String> {
    item["InstanceId"].as_str().map(String::from)
}

#[test]
fn test_shortcut_selects_projection() {
    let cli = parse(&["--profile", "prod", "ec2-instance", "--priv-ip"]).unwrap();

    assert_eq!(cli.global.profile.as_deref(), Some("prod"));
    assert_eq!(cli.command.expression(), Some("PrivateIpAddress"));

    let selected = apply_query(instance("i-0abc", "web"), cli.command.expression()).unwrap();
    assert_eq!(format_result(&selected).unwrap(), "10.0.0.4");
}

#[test]
fn test_query_and_shortcut_conflict() {
    let err = parse(&["ec2-instance", "--query", "InstanceId", "--id"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn test_without_query_prints_whole_record() {
    let cli = parse(&["ec2-instance"]).unwrap();
    assert_eq!(cli.command.expression(), None);

    let selected = apply_query(instance("i-0abc", "web"), None).unwrap();
    let printed = format_result(&selected).unwrap();
    assert!(printed.starts_with("{\n"));
    assert_eq!(serde_json::from_str::<Value>(&printed).unwrap(), instance("i-0abc", "web"));
}

#[test]
fn test_log_event_arguments() {
    let cli = parse(&[
        "log-event",
        "--log-group-name",
        "/aws/lambda/api",
        "--start-time",
        "1647538620000",
        "--message",
    ])
    .unwrap();

    match &cli.command {
        Commands::LogEvent {
            log_group_name,
            log_stream_name,
            start_time,
            ..
        } => {
            assert_eq!(log_group_name.as_deref(), Some("/aws/lambda/api"));
            assert_eq!(log_stream_name, &None);
            assert_eq!(*start_time, Some(1_647_538_620_000));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.command.expression(), Some("message"));
}

#[test]
fn test_recents_most_recent_first_without_duplicates() {
    let dir = TempDir::new().unwrap();
    let store = RecentsStore::new(dir.path().join("nested").join("recents.json"));
    let key = CategoryKey::new(["selectEC2Instance"]).scoped(["default", "us-east-1"]);

    store.save(&key, &instance("i-1", "one"), instance_id);
    store.save(&key, &instance("i-2", "two"), instance_id);
    store.save(&key, &instance("i-1", "one renamed"), instance_id);

    let recents: Vec<Value> = store.load(&key);
    let ids: Vec<_> = recents.iter().filter_map(instance_id).collect();
    assert_eq!(ids, ["i-1", "i-2"]);
    assert_eq!(recents[0]["Tags"][0]["Value"], "one renamed");

    let other_region = CategoryKey::new(["selectEC2Instance"]).scoped(["default", "eu-west-1"]);
    assert!(store.load::<Value>(&other_region).is_empty());
}

#[test]
fn test_recents_are_capped() {
    let dir = TempDir::new().unwrap();
    let store = RecentsStore::new(dir.path().join("recents.json"));
    let key = CategoryKey::new(["selectEC2Instance"]);

    for i in 0..MAX_RECENTS + 5 {
        store.save(&key, &instance(&format!("i-{i}"), "web"), instance_id);
    }

    let recents: Vec<Value> = store.load(&key);
    assert_eq!(recents.len(), MAX_RECENTS);
    assert_eq!(instance_id(&recents[0]).as_deref(), Some("i-24"));
}

#[test]
fn test_corrupt_recents_file_is_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("recents.json");
    fs::write(&path, "{ not json").unwrap();

    let store = RecentsStore::new(&path);
    let key = CategoryKey::new(["selectEC2Instance"]);
    assert!(store.load::<Value>(&key).is_empty());

    store.save(&key, &instance("i-1", "one"), instance_id);
    assert_eq!(store.load::<Value>(&key).len(), 1);
}

#[test]
fn test_row_layout_shares_remaining_width() {
    let columns: Vec<ColumnSpec<Value>> = vec![
        ColumnSpec::path("name"),
        ColumnSpec::path("id").width(8).show_recent(),
    ];
    let layout = RowLayout::new(columns, 40);
    assert_eq!(layout.widths(), [24, 8]);

    let item = json!({ "name": "web", "id": "i-0abc" });
    let live = layout.render(&item, false);
    assert_eq!(live.plain(), format!("{:<24}  {:<8}", "web", "i-0abc"));

    let recent = layout.render(&item, true);
    assert_eq!(recent.cells()[1].text, RECENT_MARKER);
}

#[test]
fn test_narrow_terminal_drops_trailing_columns() {
    let layout = RowLayout::new(Ec2InstanceSelector.columns(), 40);
    assert!(layout.column_count() < Ec2InstanceSelector.columns().len());
    assert!(layout.widths().iter().sum::<usize>() <= 40);
}

#[test]
fn test_fit_to_width_ellipsizes_in_the_middle() {
    assert_eq!(fit_to_width("abcdefghij", 5), "ab…ij");
    assert_eq!(fit_to_width("abc", 5), "abc  ");
}
