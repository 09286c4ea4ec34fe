//! herd - Entry Point
//!
//! Operator CLI for inspecting and invalidating a herd cache.

// Force-link herd-providers to ensure linkme registrations are included
extern crate herd_providers;

use clap::Parser;
use herd::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
