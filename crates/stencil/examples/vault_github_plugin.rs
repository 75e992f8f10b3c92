//! Vault GitHub token plugin flow.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error};

use stencil::{Diagram, Direction, Edge, Error, StrokeStyle, load_config};

/// Command-line arguments for the vault_github_plugin diagram
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the output image file
    #[arg(short, long, default_value = "img/vault_github_plugin.png")]
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
    let mut diagram = Diagram::begin("vault github plugin", &args.output, attributes)?;

    let user = diagram.node("user", "Authenticated User")?;

    let mut vault_plugin = None;
    let mut key = None;
    diagram.group("https://vault.acme.corp", |d| {
        vault_plugin = Some(d.node("vault", "GitHub Plugin")?);
        key = Some(d.node("token", "GitHub App\nPrivate Key")?);
        Ok(())
    })?;
    let vault_plugin = vault_plugin.expect("Vault cluster declares the plugin");
    let key = key.expect("Vault cluster declares the key");

    let mut app = None;
    diagram.group("https://api.github.com", |d| {
        app = Some(d.node("github", "GitHub App")?);
        Ok(())
    })?;
    let app = app.expect("GitHub cluster declares the app");

    diagram.connect(
        user,
        vault_plugin,
        Edge::default()
            .style(StrokeStyle::Bold)
            .direction(Direction::Backward)
            .label("\n1. GET /github/token\nX-Vault-Token: <Vault token>"),
    )?;
    diagram.connect(
        vault_plugin,
        user,
        Edge::default()
            .style(StrokeStyle::Bold)
            .direction(Direction::Backward)
            .label("\n\n4. <GitHub Access Token>"),
    )?;

    diagram.connect(
        vault_plugin,
        app,
        Edge::default().style(StrokeStyle::Bold).label(
            "\n\n\n\n\n\n3. GET /apps/installations/<acme_corp_id>/access_tokens\nAuthorization: Bearer <GitHub App JWT>",
        ),
    )?;

    diagram.connect(
        vault_plugin,
        key,
        Edge::default()
            .style(StrokeStyle::Dotted)
            .direction(Direction::Both)
            .label("2. Mint GitHub App JWT"),
    )?;

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
