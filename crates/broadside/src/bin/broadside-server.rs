use std::time::Duration;

use broadside::prelude::*;
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on, e.g. 0.0.0.0 or ::1.
    address: String,

    /// Port to listen on.
    port: u16,

    #[arg(long, value_enum, default_value_t = Rules::Classic)]
    rules: Rules,

    /// When a player may look at their own field.
    #[arg(long, value_enum, default_value_t = Access::OnTurn)]
    field_access: Access,

    #[arg(long, default_value_t = 30, help = "Close connections idle for this many seconds")]
    idle_timeout_secs: u64,

    #[arg(long, default_value_t = 60, help = "Keep finished games around this many seconds")]
    finished_grace_secs: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Rules {
    /// One 4, two 3s, three 2s, four 1s.
    Classic,
    /// One each of 2, 3, 3, 4, 5.
    American,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Access {
    OnTurn,
    Always,
}

impl From<Access> for FieldAccess {
    fn from(access: Access) -> Self {
        match access {
            Access::OnTurn => FieldAccess::OnTurn,
            Access::Always => FieldAccess::Always,
        }
    }
}

fn bind_addr(address: &str, port: u16) -> String {
    if address.contains(':') && !address.starts_with('[') {
        format!("[{address}]:{port}")
    } else {
        format!("{address}:{port}")
    }
}

#[tokio::main]
async fn main() -> Result<(), BroadsideError> {
    broadside::logging::init();
    let cli = Cli::parse();

    let ruleset = match cli.rules {
        Rules::Classic => Ruleset::classic(),
        Rules::American => Ruleset::american(),
    };
    let game = GameConfig::new(10, 10, ruleset)?;

    let server = BroadsideServer::builder()
        .bind(&bind_addr(&cli.address, cli.port))
        .game_config(game)
        .field_access(cli.field_access.into())
        .idle_timeout(Duration::from_secs(cli.idle_timeout_secs))
        .finished_room_grace_secs(cli.finished_grace_secs)
        .build()
        .await?;

    match server.local_addr() {
        Ok(addr) => tracing::info!(%addr, rules = ?cli.rules, "listening"),
        Err(e) => tracing::warn!(error = %e, "could not read local address"),
    }

    server.run().await
}
