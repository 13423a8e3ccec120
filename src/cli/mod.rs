// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the conform command-line interface.
//!
//! Three subcommands over a JSON manifest: `check` verifies every declared
//! pair, `verify` runs a single check, and `inspect` prints the flattened
//! interfaces.

pub mod display;

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "conform",
    about = "Verify that classes and objects conform to the interfaces they declare",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify every declaration in a manifest
    Check {
        /// Path to the manifest JSON file
        manifest: PathBuf,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Verify on a single thread
        #[arg(long)]
        sequential: bool,
    },

    /// Verify one candidate against one interface
    Verify {
        /// Path to the manifest JSON file
        manifest: PathBuf,

        /// Interface to verify against
        #[arg(short, long)]
        interface: String,

        #[command(flatten)]
        target: Target,
    },

    /// Print interfaces with their resolution order and required members
    Inspect {
        /// Path to the manifest JSON file
        manifest: PathBuf,

        /// Only show this interface
        #[arg(short, long)]
        interface: Option<String>,
    },
}

/// Exactly one of `--class` or `--object`.
#[derive(Args)]
#[command(group(ArgGroup::new("target").required(true).args(["class", "object"])))]
pub struct Target {
    /// Verify a class (methods inspected unbound)
    #[arg(short, long)]
    pub class: Option<String>,

    /// Verify an object (methods inspected bound)
    #[arg(short, long)]
    pub object: Option<String>,
}
