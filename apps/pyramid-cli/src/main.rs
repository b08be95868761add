use anyhow::Context;
use clap::{Parser, Subcommand};
use pyramid_common::{AppConfig, Preset};
use pyramid_input::KeyScript;
use pyramid_render::{DebugTextRenderer, Session};
use pyramid_tools::StateInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pyramid-cli", about = "Headless pyramid viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Starting preset: z-up or y-up
    #[arg(long, global = true, default_value = "z-up")]
    preset: Preset,

    /// YAML file overriding fields of the preset
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the resolved mesh and draw call
    Info,
    /// Print the resolved configuration as YAML
    Config,
    /// Replay a key script and print the resulting state
    Simulate {
        /// Key script, e.g. "forward*100, rotate-left*5, none"
        script: String,
        /// Seconds per frame, used when delta-time integration is enabled
        #[arg(long, default_value = "0.016666668", value_parser = parse_dt)]
        dt: f32,
        /// Print the uniform matrices of the last frame
        #[arg(short, long)]
        matrices: bool,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Frame time in seconds: finite and not negative.
fn parse_dt(s: &str) -> Result<f32, String> {
    let dt: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if dt.is_finite() && dt >= 0.0 {
        Ok(dt)
    } else {
        Err(format!("`{s}` is not a finite, non-negative number of seconds"))
    }
}

fn load_config(preset: Preset, path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path, preset)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(preset.config()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.preset, cli.config.as_ref())?;

    match cli.command {
        Commands::Info => {
            println!("pyramid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", pyramid_common::crate_info());
            println!("input: {}", pyramid_input::crate_info());
            println!("render: {}", pyramid_render::crate_info());
            println!("tools: {}", pyramid_tools::crate_info());

            let session = Session::new(config)?;
            let mesh = session.mesh();
            println!(
                "preset: {}  mesh: {} ({} vertices)  draw: {:?}  uniforms: {:?}",
                cli.preset,
                mesh.name,
                mesh.vertices.len(),
                session.draw(),
                session.config().uniforms
            );
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
        Commands::Simulate {
            script,
            dt,
            matrices,
            json,
        } => {
            let script: KeyScript = script.parse().context("parsing key script")?;
            let mut renderer = DebugTextRenderer::new(config.uniforms);
            let mut session = Session::new(config)?;

            let mut last_output = None;
            for keys in script.frames() {
                let report = session.run_frame(&keys, dt, &mut renderer)?;
                last_output = Some(report.output);
                if report.signal.is_exit() {
                    tracing::info!("exit key at frame {}, stopping", report.frame);
                    break;
                }
            }

            let summary = StateInspector::summary(session.state(), session.frame());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
            if matrices {
                match last_output {
                    Some(text) => print!("{text}"),
                    None => println!("(no frames rendered)"),
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dt_must_be_finite_and_non_negative() {
        assert_eq!(parse_dt("0.25"), Ok(0.25));
        assert_eq!(parse_dt("0"), Ok(0.0));
        assert!(parse_dt("inf").is_err());
        assert!(parse_dt("NaN").is_err());
        assert!(parse_dt("-0.5").is_err());
        assert!(parse_dt("fast").is_err());
    }

    #[test]
    fn simulate_rejects_infinite_dt() {
        let parsed = Cli::try_parse_from(["pyramid-cli", "simulate", "forward", "--dt", "inf"]);
        assert!(parsed.is_err());
    }
}
