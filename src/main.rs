use clap::Parser;
use fuzzmatch::commands::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("fuzzmatch debug log started");
    }

    let stdout = std::io::stdout();
    commands::run(cli, &mut stdout.lock())
}
