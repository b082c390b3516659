//! Compar'AI CLI - rank LLM benchmark results by quality, latency, energy and CO2.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cai-cli",
    version,
    about = "Compar'AI benchmark toolkit: quality, energy and performance of LLMs"
)]
struct Cli {
    #[command(subcommand)]
    command: cai_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("cai-cli starting");
    cai_cmd::run(cli.command)
}
