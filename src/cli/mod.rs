//! CLI module for the feature metrics notifier
//!
//! Each invocation records one event:
//! - `usage`: a feature has been used
//! - `subscription`: someone subscribed to a feature

pub mod notify;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use crate::domain::feature::{SubscriptionEvent, UsageEvent};

/// Feature metrics - records feature usage and subscriptions
#[derive(Debug, Parser)]
#[command(name = "feature-metrics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log failures instead of exiting with an error
    #[arg(long, global = true)]
    pub safe: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record that a feature has been used
    Usage(UsageArgs),

    /// Record a subscription to a feature
    Subscription(SubscriptionArgs),
}

#[derive(Debug, Args)]
pub struct UsageArgs {
    #[arg(long)]
    pub application: String,

    #[arg(long)]
    pub feature: String,

    #[arg(long)]
    pub details: Option<String>,

    #[arg(long)]
    pub used_by: Option<String>,

    /// RFC 3339 timestamp, defaults to now
    #[arg(long)]
    pub used_at: Option<DateTime<Utc>>,
}

impl From<UsageArgs> for UsageEvent {
    fn from(args: UsageArgs) -> Self {
        Self {
            application: args.application,
            feature: args.feature,
            details: args.details,
            used_by: args.used_by,
            used_at: args.used_at,
        }
    }
}

#[derive(Debug, Args)]
pub struct SubscriptionArgs {
    #[arg(long)]
    pub application: String,

    #[arg(long)]
    pub feature: String,

    #[arg(long)]
    pub subscriber: Option<String>,

    /// RFC 3339 timestamp, defaults to now
    #[arg(long)]
    pub subscribed_at: Option<DateTime<Utc>>,
}

impl From<SubscriptionArgs> for SubscriptionEvent {
    fn from(args: SubscriptionArgs) -> Self {
        Self {
            application: args.application,
            feature: args.feature,
            subscriber: args.subscriber,
            subscribed_at: args.subscribed_at,
        }
    }
}
