// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod cli;
mod render;

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use ontoweave_adapters::{Fs, RealFs};
use ontoweave_core::{
    config_source, load_workspace_config, run_build, run_chain_checks, run_reference_check,
    run_verify, BuildOutcome, ExitCode, PipelineError, WorkspaceConfig,
};
use ontoweave_model::CheckReport;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::render::{
    render_build_text, render_checks_text, render_doctor_text, render_json, DoctorEntry,
    DoctorReport,
};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("ONTOWEAVE_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<(), PipelineError> {
    let out = if json {
        render_json(value).map_err(|e| PipelineError::Emit {
            detail: e.to_string(),
        })?
    } else {
        text(value)
    };
    print!("{out}");
    if json {
        println!();
    }
    Ok(())
}

fn checks_exit(checks: &[CheckReport]) -> ExitCode {
    if checks.iter().all(CheckReport::passed) {
        ExitCode::Success
    } else {
        ExitCode::ConsistencyFailure
    }
}

fn doctor_report(
    fs: &dyn Fs,
    root: &Path,
    explicit: Option<&Path>,
    cfg: &WorkspaceConfig,
) -> DoctorReport {
    let config = config_source(fs, root, explicit);
    let layout = &cfg.layout;
    let mut inputs = vec![
        ("vocabulary", layout.vocabulary.clone()),
        ("articles_dir", layout.articles_dir.clone()),
        ("output_dir", layout.output_dir.clone()),
        ("process_graph", layout.process_graph.clone()),
        ("stage_document", layout.stage_document.clone()),
    ];
    inputs.extend(
        layout
            .auxiliary_documents
            .iter()
            .map(|path| ("auxiliary_document", path.clone())),
    );
    let entries = inputs
        .into_iter()
        .map(|(role, path)| DoctorEntry {
            role,
            exists: fs.exists(root, &path),
            path,
        })
        .collect();
    DoctorReport {
        root: root.to_path_buf(),
        config,
        entries,
    }
}

fn run(cli: &Cli) -> Result<ExitCode, PipelineError> {
    let root = cli.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let fs = RealFs;
    let cfg = load_workspace_config(&fs, &root, cli.config.as_deref())?;

    match cli.command {
        Command::Build => {
            let outcome = run_build(&fs, &root, &cfg)?;
            emit(cli.json, &outcome, render_build_text)?;
            if matches!(outcome, BuildOutcome::Built(_)) {
                info!(
                    output_dir = %cfg.layout.output_dir.display(),
                    "generated files; do not edit by hand, rerun `ontoweave build` instead"
                );
            }
            Ok(ExitCode::Success)
        }
        Command::CheckChain => {
            let checks = run_chain_checks(&fs, &root, &cfg)?;
            emit(cli.json, &checks, |c| render_checks_text(c))?;
            Ok(checks_exit(&checks))
        }
        Command::CheckRefs => {
            let checks = vec![run_reference_check(&fs, &root, &cfg)?];
            emit(cli.json, &checks, |c| render_checks_text(c))?;
            Ok(checks_exit(&checks))
        }
        Command::Verify => {
            let report = run_verify(&fs, &root, &cfg)?;
            emit(cli.json, &report, |r| render_checks_text(&r.checks))?;
            Ok(checks_exit(&report.checks))
        }
        Command::Doctor => {
            let report = doctor_report(&fs, &root, cli.config.as_deref(), &cfg);
            emit(cli.json, &report, render_doctor_text)?;
            Ok(ExitCode::Success)
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing();
    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("ontoweave: {err}");
            err.exit_code()
        }
    };
    std::process::ExitCode::from(code.code())
}
