//! Remote access to AWS through the `aws` command-line program

mod client;
mod error;

pub use client::{AwsCli, DEFAULT_PROFILE};
pub use error::AwsError;
