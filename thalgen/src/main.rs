use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Compile thermodynamic parameter tables into a static C source file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the stack, dangle, loop and triloop/tetraloop files
    #[arg(default_value = "primer3_config")]
    params: PathBuf,

    /// Where to write the generated source; stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let tables = thal_tables::compile(&args.params)
        .with_context(|| format!("compiling tables from {}", args.params.display()))?;
    let source = tables.to_c_source();

    match &args.output {
        Some(path) => {
            std::fs::write(path, &source)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote parameter tables");
        }
        None => std::io::stdout()
            .lock()
            .write_all(source.as_bytes())
            .context("writing to stdout")?,
    }

    Ok(())
}
