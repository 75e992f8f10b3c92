//! Token-refreshing sidecar architecture, sidecar-less variant.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error};

use stencil::{Diagram, Direction, Edge, Error, StrokeStyle, load_config};

/// Command-line arguments for the sidecar_less diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the output image file
    #[arg(short, long, default_value = "img/sidecar_less.png")]
    output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build(args: &Args) -> Result<(), Error> {
    let attributes = load_config(args.config.as_deref())?;
    let mut diagram = Diagram::begin("sidecar less", &args.output, attributes)?;

    let integration = diagram.node("server", "Target")?;
    let idp = diagram.node("vault", "IdP")?;

    diagram.group("Kubernetes-based Internal Platform", |d| {
        let controller = d.node("configmap", "Custom\nController")?;

        let mut envoyfilter = None;
        d.group("Pod boundary", |d| {
            d.node("pod", "Istio-enabled")?;
            let filter = d.node("crd", "EnvoyFilter")?;
            let envoy = d.node("envoy", "Envoy")?;
            let primary = d.node("containerd", "Primary")?;
            let token = d.node("token", "")?;
            envoyfilter = Some(filter);

            d.connect(
                filter,
                envoy,
                Edge::default()
                    .label("configure\n\n\n\n\n")
                    .style(StrokeStyle::Dashed),
            )?;

            d.connect(
                envoy,
                idp,
                Edge::default().label("1. refresh token (out-of-band)"),
            )?;

            d.connect(primary, envoy, Edge::default().label("2. RPC"))?;
            d.connect(
                envoy,
                token,
                Edge::default().label("2a. automatically add token"),
            )?;
            d.connect(token, integration, Edge::default())?;
            Ok(())
        })?;

        let envoyfilter = envoyfilter.expect("Pod boundary declares the filter");
        d.connect(
            controller,
            envoyfilter,
            Edge::default()
                .label("inject requested filter")
                .style(StrokeStyle::Dashed)
                .direction(Direction::None),
        )?;
        Ok(())
    })?;

    diagram.finalize()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!(args:?; "Parsed arguments");

    if let Err(err) = build(&args) {
        error!(err:err; "Failed to render diagram");
        process::exit(1);
    }
}
