// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ontoweave", version, disable_help_subcommand = true)]
#[command(about = "Compile article relations into a knowledge graph and verify the process graph")]
pub struct Cli {
    /// Repository root; relative layout paths resolve against it.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
    /// Workspace config; defaults to configs/ontoweave/workspace.json when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Extract, validate and emit the linked-data graph and cross-reference table.
    Build,
    /// Check process chain continuity and stage alignment.
    CheckChain,
    /// Check that every referenced local file exists.
    CheckRefs,
    /// Run every consistency check.
    Verify,
    /// Show the resolved configuration and whether each input exists.
    Doctor,
}
