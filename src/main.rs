use anyhow::Result;
use aws_config::{BehaviorVersion, Region};
use clap::{Parser, ValueEnum};
use fedinv::collector::InventoryCollector;
use fedinv::inventory::mappers::{default_mappers, MapperRegistry};
use fedinv::report;
use fedinv::settings::{Settings, SourceMode};
use fedinv::source::aggregator::AwsAggregatorQuery;
use fedinv::source::cross_account::AwsAccountQueryFactory;
use fedinv::source::{AggregatorSource, CrossAccountSource};
use std::path::PathBuf;
use tracing::Level;

/// Builds a FedRAMP-style integrated inventory workbook from AWS Config
#[derive(Parser, Debug)]
#[command(name = "fedinv", version, about, long_about = None)]
struct Args {
    /// Where to read resources from
    #[arg(long, value_enum, default_value = "aggregator")]
    source: SourceArg,

    /// AWS region override
    #[arg(short, long)]
    region: Option<String>,

    /// Tag feeding the diagram-label column
    #[arg(long)]
    label_tag: Option<String>,

    /// Path for the generated workbook
    #[arg(short, long, default_value = "SSP-A13-FedRAMP-Integrated-Inventory.xlsx")]
    output: PathBuf,

    /// Upload the workbook to the configured S3 bucket after writing it
    #[arg(long)]
    deliver: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    /// Query a centralized Config aggregator
    Aggregator,
    /// Assume a role into each account from ACCOUNT_LIST
    CrossAccount,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.log_level);

    let mode = match args.source {
        SourceArg::Aggregator => SourceMode::Aggregator,
        SourceArg::CrossAccount => SourceMode::CrossAccount,
    };

    let mut settings = Settings::from_env(mode)?;
    if let Some(region) = args.region {
        settings.region = region;
    }
    if let Some(label_tag) = args.label_tag {
        settings.label_tag = label_tag;
    }

    let registry = MapperRegistry::validated(default_mappers(&settings.label_tag))?;

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .load()
        .await;

    let records = match mode {
        SourceMode::Aggregator => {
            let expression = registry.query_expression(true);
            let query = AwsAggregatorQuery::new(
                aws_sdk_config::Client::new(&sdk_config),
                settings.aggregator_name.clone().unwrap_or_default(),
            );
            InventoryCollector::new(AggregatorSource::new(query, expression), registry)
                .collect_all()
                .await?
        }
        SourceMode::CrossAccount => {
            let expression = registry.query_expression(false);
            let factory = AwsAccountQueryFactory::new(
                aws_sdk_sts::Client::new(&sdk_config),
                settings.cross_account_role.clone().unwrap_or_default(),
                settings.partition.clone(),
                settings.region.clone(),
            );
            let accounts = settings
                .accounts
                .iter()
                .map(|account| account.id.clone())
                .collect();
            InventoryCollector::new(
                CrossAccountSource::new(factory, expression, accounts),
                registry,
            )
            .collect_all()
            .await?
        }
    };

    report::write_report(&records, &settings.report, &args.output)?;

    if args.deliver {
        let (bucket, prefix) = settings.delivery_target()?;
        let url = report::deliver_report(
            &aws_sdk_s3::Client::new(&sdk_config),
            &args.output,
            bucket,
            prefix,
        )
        .await?;
        println!("{url}");
    } else {
        println!("{}", args.output.display());
    }

    Ok(())
}
