//! Command-line interface definitions for receipt

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the receipt application
#[derive(Parser)]
#[command(name = "receipt")]
#[command(version)]
#[command(about = "Point-of-sale HTML receipt generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for receipt
#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample order file to start from
    Init {
        /// Order file to create
        #[arg(value_name = "PATH", default_value = "order.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Render an order file to an HTML receipt
    Build {
        /// Order file describing the receipt
        #[arg(value_name = "ORDER", default_value = "order.toml")]
        order: PathBuf,

        /// Output HTML file; the barcode image is written next to it
        #[arg(short, long, default_value = "receipt.html")]
        output: PathBuf,

        /// Header template containing the :::TITLE::: placeholder
        #[arg(short, long, default_value = "html/header.template")]
        template: PathBuf,

        /// Escape HTML in the order's text, even if the order file does not ask for it
        #[arg(short, long)]
        escape: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

impl Commands {
    /// Whether the subcommand asked for verbose output
    pub fn verbose(&self) -> bool {
        match self {
            Commands::Init { verbose, .. } | Commands::Build { verbose, .. } => *verbose,
        }
    }
}
