//! CLI handlers. All commands communicate with the running service via its
//! HTTP API.

pub mod args;

pub use args::{AgentCliArgs, Cli, CliCommand};

use crate::config::Config;
use crate::room::{RoomController, RoomStatusHandle};
use anyhow::{bail, Context, Result};
use serde_json::Value;

fn base_url() -> Result<String> {
    let config = Config::load()?;
    Ok(format!("http://127.0.0.1:{}", config.server.port))
}

pub async fn handle_credentials_command() -> Result<()> {
    let url = format!("{}/api/credentials", base_url()?);

    let response = reqwest::get(&url)
        .await
        .context("Failed to connect to meet service. Is it running?")?;

    let status = response.status();
    let json: Value = response.json().await?;

    if !status.is_success() {
        bail!(
            "Failed to mint credentials: {}",
            json.get("error").and_then(|e| e.as_str()).unwrap_or("Unknown error")
        );
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

pub async fn handle_agent_command(args: AgentCliArgs) -> Result<()> {
    let controller = RoomController::new(base_url()?, RoomStatusHandle::default());

    let result = if args.group {
        controller
            .add_group_agent(&args.call_type, &args.call_id, args.agent_id.as_deref())
            .await?
    } else {
        controller.add_interviewer(&args.call_type, &args.call_id).await?
    };

    println!("Agent added: {}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
