//! Command-line interface definitions and parsing
//!
//! This module defines the CLI of aws-select using the `clap` crate: one
//! subcommand per resource kind, plus `config`.
//!
//! # Result queries
//!
//! The selected record is printed as JSON. `--query EXPR` prints the value at
//! a JMESPath expression instead, and every kind offers shortcut flags for
//! common fields (`ec2-instance --pub-ip` is `--query PublicIpAddress`). The
//! shortcuts and `--query` are mutually exclusive.
//!
//! # Examples
//!
//! ```bash
//! aws-select ec2-instance --id
//! aws-select --profile prod --region eu-west-1 secret --arn
//! aws-select route53-record-set Z0123456789 --query 'ResourceRecords[0].Value'
//! aws-select log-event --log-group-name /aws/lambda/api --message
//! aws-select config set use_recents=false
//! ```

use clap::{Args, Parser, Subcommand};

/// Expression printed instead of the whole record
///
/// At most one of `query` and the enabled shortcuts is set; clap enforces it.
fn expression<'a>(query: Option<&'a str>, shortcuts: &[(bool, &'static str)]) -> Option<&'a str> {
    query.or_else(|| {
        shortcuts
            .iter()
            .find(|(enabled, _)| *enabled)
            .map(|(_, path)| *path)
    })
}

/// Output selection for kinds without shortcut flags
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
}

impl QueryArgs {
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct Ec2InstanceOutput {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
    /// Print InstanceId
    #[arg(long)]
    pub id: bool,
    /// Print PublicIpAddress
    #[arg(long = "pub-ip")]
    pub pub_ip: bool,
    /// Print PublicDnsName
    #[arg(long = "pub-dns")]
    pub pub_dns: bool,
    /// Print PrivateIpAddress
    #[arg(long = "priv-ip")]
    pub priv_ip: bool,
    /// Print PrivateDnsName
    #[arg(long = "priv-dns")]
    pub priv_dns: bool,
}

impl Ec2InstanceOutput {
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        expression(
            self.query.as_deref(),
            &[
                (self.id, "InstanceId"),
                (self.pub_ip, "PublicIpAddress"),
                (self.pub_dns, "PublicDnsName"),
                (self.priv_ip, "PrivateIpAddress"),
                (self.priv_dns, "PrivateDnsName"),
            ],
        )
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct EbsSnapshotOutput {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
    /// Print SnapshotId
    #[arg(long)]
    pub id: bool,
    /// Print VolumeId
    #[arg(long)]
    pub vol: bool,
}

impl EbsSnapshotOutput {
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        expression(self.query.as_deref(), &[(self.id, "SnapshotId"), (self.vol, "VolumeId")])
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct StackOutput {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
    /// Print StackId
    #[arg(long = "stack-id")]
    pub stack_id: bool,
    /// Print StackName
    #[arg(long = "stack-name")]
    pub stack_name: bool,
}

impl StackOutput {
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        expression(
            self.query.as_deref(),
            &[(self.stack_id, "StackId"), (self.stack_name, "StackName")],
        )
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct HostedZoneOutput {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
    /// Print Id
    #[arg(long)]
    pub id: bool,
}

impl HostedZoneOutput {
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        expression(self.query.as_deref(), &[(self.id, "Id")])
    }
}

/// Output selection for kinds identified by an ARN
///
/// `field` is the record's ARN attribute, which differs in case between
/// services.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct ArnOutput {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
    /// Print the ARN
    #[arg(long)]
    pub arn: bool,
}

impl ArnOutput {
    #[must_use]
    pub fn expression(&self, field: &'static str) -> Option<&str> {
        expression(self.query.as_deref(), &[(self.arn, field)])
    }
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
#[group(multiple = false)]
pub struct LogEventOutput {
    /// Print the value at this JMESPath expression
    #[arg(long, value_name = "EXPR")]
    pub query: Option<String>,
    /// Print the message
    #[arg(long)]
    pub message: bool,
}

impl LogEventOutput {
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        expression(self.query.as_deref(), &[(self.message, "message")])
    }
}

/// Options shared by every selection
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// AWS profile (default: `AWS_PROFILE`, then `default`)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// AWS region (default: `AWS_REGION`, `AWS_DEFAULT_REGION`, then the profile's region)
    #[arg(long, global = true, value_name = "REGION")]
    pub region: Option<String>,

    /// Neither offer nor remember recent selections
    #[arg(long = "no-recents", global = true)]
    pub no_recents: bool,

    /// Prompt message (default: `Select a|an <kind> (region: <region>)`)
    #[arg(long, global = true, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Page size of remote queries
    #[arg(long, global = true, value_name = "N")]
    pub limit: Option<usize>,
}

#[derive(Parser, Debug)]
#[command(name = "aws-select")]
#[command(about = "Interactively select AWS resources and print them as JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Select an EC2 instance
    #[command(name = "ec2-instance", visible_alias = "ec2")]
    Ec2Instance {
        #[command(flatten)]
        output: Ec2InstanceOutput,
    },

    /// Select an EBS snapshot owned by this account
    #[command(name = "ebs-snapshot")]
    EbsSnapshot {
        #[command(flatten)]
        output: EbsSnapshotOutput,
    },

    /// Select a CloudFormation stack
    #[command(name = "cloudformation-stack", visible_alias = "stack")]
    CloudformationStack {
        #[command(flatten)]
        output: StackOutput,
    },

    /// Select a Route53 hosted zone
    #[command(name = "route53-hosted-zone")]
    Route53HostedZone {
        #[command(flatten)]
        output: HostedZoneOutput,
    },

    /// Select a Route53 record set
    #[command(name = "route53-record-set")]
    Route53RecordSet {
        /// Hosted zone to list (selected interactively when omitted)
        #[arg(value_name = "HOSTED_ZONE_ID")]
        hosted_zone_id: Option<String>,

        #[command(flatten)]
        output: QueryArgs,
    },

    /// Select a Secrets Manager secret
    Secret {
        #[command(flatten)]
        output: ArnOutput,
    },

    /// Select a CloudWatch log group
    #[command(name = "log-group")]
    LogGroup {
        #[command(flatten)]
        output: ArnOutput,
    },

    /// Select a CloudWatch log stream
    #[command(name = "log-stream")]
    LogStream {
        /// Log group to list (selected interactively when omitted)
        #[arg(long = "log-group-name", value_name = "NAME")]
        log_group_name: Option<String>,

        #[command(flatten)]
        output: ArnOutput,
    },

    /// Select a CloudWatch log event
    #[command(name = "log-event")]
    LogEvent {
        /// Log group (selected interactively when omitted)
        #[arg(long = "log-group-name", value_name = "NAME")]
        log_group_name: Option<String>,

        /// Log stream (selected interactively when omitted)
        #[arg(long = "log-stream-name", value_name = "NAME")]
        log_stream_name: Option<String>,

        /// Window start in epoch milliseconds (default: 5 minutes before the last event)
        #[arg(long = "start-time", value_name = "MS")]
        start_time: Option<i64>,

        #[command(flatten)]
        output: LogEventOutput,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., use_recents=false)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., aws_program)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

impl Commands {
    /// JMESPath expression applied to the selected record, if any
    #[must_use]
    pub fn expression(&self) -> Option<&str> {
        match self {
            Self::Ec2Instance { output } => output.expression(),
            Self::EbsSnapshot { output } => output.expression(),
            Self::CloudformationStack { output } => output.expression(),
            Self::Route53HostedZone { output } => output.expression(),
            Self::Route53RecordSet { output, .. } => output.expression(),
            Self::Secret { output } => output.expression("ARN"),
            Self::LogGroup { output } | Self::LogStream { output, .. } => output.expression("arn"),
            Self::LogEvent { output, .. } => output.expression(),
            Self::Config { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("aws-select").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_shortcut_becomes_expression() {
        let cli = parse(&["ec2-instance", "--pub-ip"]).unwrap();
        assert_eq!(cli.command.expression(), Some("PublicIpAddress"));

        let cli = parse(&["secret", "--arn"]).unwrap();
        assert_eq!(cli.command.expression(), Some("ARN"));

        let cli = parse(&["log-stream", "--arn"]).unwrap();
        assert_eq!(cli.command.expression(), Some("arn"));
    }

    #[test]
    fn test_query_is_passed_through() {
        let cli = parse(&["cloudformation-stack", "--query", "Outputs[0].OutputValue"]).unwrap();
        assert_eq!(cli.command.expression(), Some("Outputs[0].OutputValue"));
    }

    #[test]
    fn test_no_expression_prints_whole_record() {
        let cli = parse(&["ebs-snapshot"]).unwrap();
        assert_eq!(cli.command.expression(), None);
    }

    #[test]
    fn test_query_conflicts_with_shortcut() {
        let err = parse(&["ec2-instance", "--query", "Tags", "--id"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let err = parse(&["ebs-snapshot", "--id", "--vol"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["log-group", "--profile", "prod", "--region", "eu-west-1", "--no-recents"]).unwrap();
        assert_eq!(cli.global.profile.as_deref(), Some("prod"));
        assert_eq!(cli.global.region.as_deref(), Some("eu-west-1"));
        assert!(cli.global.no_recents);
    }

    #[test]
    fn test_nested_kind_arguments() {
        let cli = parse(&["route53-record-set", "Z123"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Route53RecordSet {
                hosted_zone_id: Some("Z123".into()),
                output: QueryArgs::default(),
            }
        );

        let cli = parse(&[
            "log-event",
            "--log-group-name",
            "/aws/lambda/api",
            "--start-time",
            "1700000000000",
            "--message",
        ])
        .unwrap();
        match cli.command {
            Commands::LogEvent {
                log_group_name,
                log_stream_name,
                start_time,
                output,
            } => {
                assert_eq!(log_group_name.as_deref(), Some("/aws/lambda/api"));
                assert_eq!(log_stream_name, None);
                assert_eq!(start_time, Some(1_700_000_000_000));
                assert_eq!(output.expression(), Some("message"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = parse(&["config", "set", "use_recents=false"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Set {
                    setting: "use_recents=false".into()
                }
            }
        );
        assert!(matches!(
            parse(&["config", "path"]).unwrap().command,
            Commands::Config { command: ConfigCommands::Path }
        ));
    }
}
