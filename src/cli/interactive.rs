//! The `huenix` prompt.

use std::io;

use anyhow::{Context, Result};
use huenix::{Config, HttpGateway, Session};

/// Run the prompt on stdin/stdout until `quit` or end of input.
pub fn handle(config: &Config) -> Result<()> {
    let gateway = HttpGateway::new(config)
        .with_context(|| format!("failed to set up bridge client from {}", config.path.display()))?;
    let mut session = Session::new(&gateway);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    session
        .run_interactive(stdin.lock(), &mut stdout)
        .context("interactive session aborted")?;
    Ok(())
}
