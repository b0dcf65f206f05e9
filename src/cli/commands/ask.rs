//! Ask Command
//!
//! Run one research request and print the JSON response.
//!
//! Usage:
//!   cogniflow ask "what is photosynthesis" [--pretty]

use crate::cli::CommandContext;
use crate::types::Result;

pub async fn run(ctx: CommandContext, query: &str, pretty: bool) -> Result<()> {
    let orchestrator = ctx.orchestrator()?;
    let response = orchestrator.research(query).await;

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);
    Ok(())
}
