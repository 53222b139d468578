use anyhow::Result;
use idento::cli::{actions, actions::Action, start};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse arguments and set up telemetry
    let action = start()?;

    // Handle the action
    match action {
        Action::Server(args) => actions::server::execute(args).await?,
    }

    Ok(())
}
