#![forbid(unsafe_code)]

//! Order agent CLI: places and lists coffee orders against the order service.

use clap::{Parser, Subcommand};
use order_agent::{config::parse_timeout_secs, ClientConfig, OrderServiceClient};
use order_core::CreateOrder;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "order-agent", version, about = "Coffee order service client")]
struct Args {
    /// Service base URL. Overrides ORDER_SERVICE_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds. Overrides ORDER_SERVICE_TIMEOUT.
    #[arg(long, global = true)]
    timeout_secs: Option<String>,

    /// Log level (env-filter syntax). Logs go to stderr.
    #[arg(long, global = true, default_value = "warn")]
    log: String,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Probe the service.
    Health,
    /// Place an order.
    Create {
        #[arg(long)]
        agent_id: String,
        #[arg(long)]
        item: String,
    },
    /// List the orders placed by an agent.
    List {
        #[arg(long)]
        agent_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Environment is read here, once; the client only sees the resulting config.
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(raw) = args.timeout_secs.as_deref() {
        config = config.with_timeout(parse_timeout_secs(raw)?);
    }
    tracing::debug!(?config, "client config");

    let client = OrderServiceClient::new(config)?;

    match args.cmd {
        Cmd::Health => print_json(&client.health().await?)?,
        Cmd::Create { agent_id, item } => {
            let order = client.create_order(&CreateOrder::new(item), &agent_id).await?;
            print_json(&order)?;
        }
        Cmd::List { agent_id } => {
            print_json(&client.get_orders_by_agent_id(&agent_id).await?)?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
