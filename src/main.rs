// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use conform::{Catalog, Manifest, VerificationReport};

mod cli;
use cli::display::*;
use cli::{Cli, Commands, Target};

/// Exit status when a candidate does not conform.
const EXIT_NONCONFORMING: i32 = 1;
/// Exit status when the manifest or arguments could not be used.
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            manifest,
            json,
            sequential,
        } => run_check(&manifest, json, sequential),
        Commands::Verify {
            manifest,
            interface,
            target,
        } => run_verify(&manifest, &interface, &target),
        Commands::Inspect {
            manifest,
            interface,
        } => run_inspect(&manifest, interface.as_deref()),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_NONCONFORMING),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            process::exit(EXIT_ERROR);
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` selects debug and `-vv` trace.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_catalog(path: &Path) -> Result<Catalog> {
    Manifest::load(path)
        .and_then(|manifest| manifest.build())
        .with_context(|| format!("failed to load manifest {}", path.display()))
}

// ═══════════════════════════════════════════════════════════════════════════
// CHECK
// ═══════════════════════════════════════════════════════════════════════════

fn run_check(path: &Path, json: bool, sequential: bool) -> Result<bool> {
    let catalog = load_catalog(path)?;
    let report = run_batch(&catalog, sequential);

    if json {
        let rendered = serde_json::to_string_pretty(&report).context("failed to render report")?;
        println!("{}", rendered);
    } else {
        print_report(path, &report);
    }
    Ok(report.is_clean())
}

#[cfg(feature = "parallel")]
fn run_batch(catalog: &Catalog, sequential: bool) -> VerificationReport {
    use indicatif::{ProgressBar, ProgressStyle};

    if sequential {
        return conform::verify_declared(catalog.registry());
    }

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    ) {
        progress.set_style(style.progress_chars("━━╸"));
    }
    progress.set_prefix("Verifying");
    let report = conform::verify_declared_with_progress(catalog.registry(), &progress);
    progress.finish_and_clear();
    report
}

#[cfg(not(feature = "parallel"))]
fn run_batch(catalog: &Catalog, _sequential: bool) -> VerificationReport {
    conform::verify_declared(catalog.registry())
}

fn print_report(path: &Path, report: &VerificationReport) {
    section_top(&format!("conformance: {}", path.display()));
    if report.outcomes.is_empty() {
        row(&themed(GRAY, &[], "  no declarations"));
    }
    for outcome in &report.outcomes {
        row(&format!("  {}  {}", status_badge(outcome.passed()), pair_label(outcome)));
        if let Some(error) = &outcome.error {
            row(&format!("        {}", failure_detail(error)));
        }
    }

    let failed = report.checked() - report.passed_count();
    section_mid("summary");
    row(&format!(
        "  {} checked, {} passed, {}",
        report.checked(),
        themed(GREEN, &[], &report.passed_count().to_string()),
        if failed == 0 {
            themed(GREEN, &[BOLD], "0 failed")
        } else {
            themed(RED, &[BOLD], &format!("{} failed", failed))
        }
    ));
    section_bot();
}

// ═══════════════════════════════════════════════════════════════════════════
// VERIFY
// ═══════════════════════════════════════════════════════════════════════════

fn run_verify(path: &Path, interface_name: &str, target: &Target) -> Result<bool> {
    let catalog = load_catalog(path)?;
    let interface = catalog
        .interface(interface_name)
        .ok_or_else(|| anyhow!("no interface named '{}' in {}", interface_name, path.display()))?;
    let registry = catalog.registry();

    let (label, result) = match (&target.class, &target.object) {
        (Some(name), _) => {
            let class = catalog
                .class(name)
                .ok_or_else(|| anyhow!("no class named '{}' in {}", name, path.display()))?;
            (name, registry.verify_class(interface, class))
        }
        (None, Some(name)) => {
            let object = catalog
                .object(name)
                .ok_or_else(|| anyhow!("no object named '{}' in {}", name, path.display()))?;
            (name, registry.verify_object(interface, object))
        }
        (None, None) => return Err(anyhow!("one of --class or --object is required")),
    };

    match result {
        Ok(()) => {
            println!(
                "{}  {} conforms to {}",
                status_badge(true),
                label,
                themed(CYAN, &[], interface_name)
            );
            Ok(true)
        }
        Err(error) => {
            println!("{}  {}", status_badge(false), error);
            Ok(false)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// INSPECT
// ═══════════════════════════════════════════════════════════════════════════

fn run_inspect(path: &Path, only: Option<&str>) -> Result<bool> {
    let catalog = load_catalog(path)?;
    let interfaces: Vec<_> = match only {
        Some(name) => vec![catalog
            .interface(name)
            .ok_or_else(|| anyhow!("no interface named '{}' in {}", name, path.display()))?],
        None => catalog.interfaces().collect(),
    };

    for interface in interfaces {
        section_top(interface.name());
        if !interface.doc().is_empty() {
            row(&format!("  {}", themed(GRAY, &[], interface.doc())));
        }
        row(&format!(
            "  {} {}",
            pad_right(&themed(GRAY, &[], "order"), 8),
            interface.resolution_order().join(" → ")
        ));
        section_mid("requires");
        if interface.required_members().is_empty() {
            row(&themed(GRAY, &[], "  nothing"));
        }
        for (name, requirement) in interface.required_members() {
            row(&format!("  {}", requirement_line(name, requirement)));
        }
        section_bot();
    }
    Ok(true)
}
