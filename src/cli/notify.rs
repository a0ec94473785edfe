//! Records a single feature event from the command line

use tracing::info;

use super::{Cli, Command};
use crate::config::AppConfig;
use crate::domain::feature::{
    FeatureSubscriptionService, FeatureUsageService, LogFailureSink, SubscriptionEvent,
    UsageEvent,
};
use crate::infrastructure::logging;
use crate::infrastructure::notifier::{SubscriptionNotifier, UsageNotifier};
use crate::infrastructure::store::RecordStoreFactory;

/// Run the parsed command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let store = RecordStoreFactory::create(&config.store, &config.simpledb).await?;
    let policy = config.notifier.domain_creation;

    match cli.command {
        Command::Usage(args) => {
            let notifier = UsageNotifier::with_domain_creation(
                LogFailureSink,
                config.notifier.usage_domain.clone(),
                store,
                policy,
            );
            record_usage(&notifier, args.into(), cli.safe).await?;
        }
        Command::Subscription(args) => {
            let notifier = SubscriptionNotifier::with_domain_creation(
                LogFailureSink,
                config.notifier.subscription_domain.clone(),
                store,
                policy,
            );
            record_subscription(&notifier, args.into(), cli.safe).await?;
        }
    }

    Ok(())
}

async fn record_usage(
    service: &dyn FeatureUsageService,
    event: UsageEvent,
    safe: bool,
) -> anyhow::Result<()> {
    info!(
        application = %event.application,
        feature = %event.feature,
        "Recording feature usage"
    );

    if safe {
        service.notify_usage_safe(event).await;
    } else {
        service.notify_usage(event).await?;
    }

    Ok(())
}

async fn record_subscription(
    service: &dyn FeatureSubscriptionService,
    event: SubscriptionEvent,
    safe: bool,
) -> anyhow::Result<()> {
    info!(
        application = %event.application,
        feature = %event.feature,
        "Recording feature subscription"
    );

    if safe {
        service.notify_subscription_safe(event).await;
    } else {
        service.notify_subscription(event).await?;
    }

    Ok(())
}
