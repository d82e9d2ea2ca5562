//! receipt - Point-of-sale HTML receipt generator
//!
//! Renders TOML order files into HTML receipts.

#![deny(unsafe_code)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use receipt::{Order, PngBarcodeWriter, ReceiptBuilder};
use std::path::{Path, PathBuf};

/// Main entry point for the receipt CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();
    logger(cli.command.verbose()).init();

    match cli.command {
        Commands::Init { path, force, .. } => {
            handle_init_command(&path, force)?;
        }

        Commands::Build {
            order,
            output,
            template,
            escape,
            verbose,
        } => {
            handle_build_command(&order, &output, &template, escape, verbose)?;
        }
    }

    Ok(())
}

/// Logger reading `RUST_LOG`, showing warnings by default
///
/// `--verbose` raises the level to info regardless of the environment.
fn logger(verbose: bool) -> env_logger::Builder {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder
}

/// Handle the init command
fn handle_init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    Order::sample()
        .save(path)
        .with_context(|| format!("Failed to write order file {}", path.display()))?;

    log::info!("Wrote sample order to {}", path.display());
    println!("✓ Created sample order at {}", path.display());
    println!("\nNext steps:");
    println!("  1. Edit {} to describe your receipt", path.display());
    println!(
        "  2. Run 'receipt build {}' to render it to HTML",
        path.display()
    );

    Ok(())
}

/// Handle the build command
fn handle_build_command(
    order_path: &Path,
    output: &Path,
    template: &Path,
    escape: bool,
    verbose: bool,
) -> Result<()> {
    let mut order = Order::load(order_path)
        .with_context(|| format!("Failed to load order from {}", order_path.display()))?;
    order.escape |= escape;

    let artifacts = artifact_dir(output);
    let mut receipt = ReceiptBuilder::from_template_path(template, &order.title())
        .with_context(|| format!("Failed to load header template {}", template.display()))?
        .with_barcode_encoder(Box::new(PngBarcodeWriter::new(artifacts.clone())));

    order.apply(&mut receipt);

    receipt
        .save(output)
        .with_context(|| format!("Failed to write receipt to {}", output.display()))?;

    println!("✓ Receipt written to {}", output.display());
    if verbose {
        println!("  - {} items", order.items.len());
        println!("  - artifacts in {}", artifacts.display());
    }

    Ok(())
}

/// Directory the barcode image goes to, so its relative reference resolves
fn artifact_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
