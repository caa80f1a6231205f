//! Semilla CLI
//!
//! Entry point for the initialization harness.
//!
//! # Usage
//!
//! ```bash
//! # Build the tree from a spec and initialize it
//! semilla init config.yaml
//!
//! # Initialize, dump the provenance report, export the weights
//! semilla init config.yaml --report init_report.txt --export weights.json
//!
//! # Validate a spec
//! semilla validate config.yaml
//!
//! # Show spec info
//! semilla info config.yaml
//! ```

use clap::Parser;
use semilla::config::{
    build_tree, load_spec, validate_spec, Cli, Command, InfoArgs, InitArgs, ValidateArgs,
};
use semilla::init::init_tree_with;
use semilla::io::Checkpoint;
use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Command::Init(args) => run_init(args),
        Command::Validate(args) => run_validate(args),
        Command::Info(args) => run_info(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_init(args: InitArgs) -> Result<(), String> {
    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    validate_spec(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    let mut tree = build_tree(&spec.model);
    tracing::info!(
        "Initializing `{}`: {} nodes, {} parameters",
        tree.name(),
        tree.num_nodes(),
        tree.num_params()
    );

    // CLI flag wins over the spec's report field; no sink means the report
    // goes to the logging channel.
    let report_path = args.report.or(spec.report);
    match &report_path {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Cannot create report file {}: {e}", path.display()))?;
            let mut sink = BufWriter::new(file);
            init_tree_with(&mut tree, Some(&mut sink))
                .map_err(|e| format!("Initialization failed: {e}"))?;
            println!("Provenance report written to {}", path.display());
        }
        None => {
            init_tree_with(&mut tree, None).map_err(|e| format!("Initialization failed: {e}"))?;
        }
    }

    if let Some(path) = &args.export {
        Checkpoint::from_tree(&tree)
            .save(path)
            .map_err(|e| format!("Export failed: {e}"))?;
        println!("Checkpoint exported to {}", path.display());
    }

    println!("Initialization complete");
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    validate_spec(&spec).map_err(|e| format!("Validation failed: {e}"))?;
    println!("Specification is valid");
    Ok(())
}

fn run_info(args: InfoArgs) -> Result<(), String> {
    let spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    let tree = build_tree(&spec.model);

    println!("Specification: {}", args.config.display());
    println!("  Root: {}", tree.name());
    println!("  Nodes: {}", tree.num_nodes());
    println!("  Parameters: {}", tree.num_params());

    let mut total = 0usize;
    let mut rules = 0usize;
    tree.visit_params(|_, p| total += p.numel());
    count_rules(&spec.model, &mut rules);
    println!("  Elements: {total}");
    println!("  Rules: {rules}");
    if let Some(report) = &spec.report {
        println!("  Report sink: {}", report.display());
    }

    Ok(())
}

fn count_rules(node: &semilla::config::NodeSpec, acc: &mut usize) {
    *acc += node.init.len();
    for child in &node.children {
        count_rules(child, acc);
    }
}
