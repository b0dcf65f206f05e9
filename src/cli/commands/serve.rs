//! Serve Command
//!
//! Run the research HTTP API.
//!
//! Usage:
//!   cogniflow serve [--bind 0.0.0.0:3000]

use tracing::info;

use crate::cli::CommandContext;
use crate::server::{self, AppState};
use crate::types::{ProviderId, Result};

pub async fn run(ctx: CommandContext, bind: Option<String>) -> Result<()> {
    let addr = bind.unwrap_or_else(|| ctx.config.server.bind.clone());

    let configured = ctx.secrets.configured();
    for id in ProviderId::ALL {
        if !configured.contains(&id) {
            info!(
                provider = %id,
                env = id.key_env_var(),
                "No API key set, provider will always fall through"
            );
        }
    }

    let orchestrator = ctx.orchestrator()?;
    server::run(&addr, AppState::new(orchestrator)).await
}
