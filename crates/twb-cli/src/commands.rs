use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::debug;

use twb_core::{
    analyze_workbook, default_output_path, load_mapping_preview, remap, validate_mapping,
    validate_workbook, write_file,
};

use crate::cli::{Command, MappingArgs, RemapArgs, WorkbookArgs};
use crate::summary::{print_mapping_rules, print_remap_summary};

pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Remap(args) => run_remap(&args),
        Command::PreviewToml { toml } => {
            print!("{}", load_mapping_preview(&toml)?);
            Ok(())
        }
        Command::ValidateMapping(args) => run_validate_mapping(&args),
        Command::ValidateWorkbook(args) => run_validate_workbook(&args),
        Command::Analyze(args) => run_analyze(&args),
        Command::Write { path } => {
            let content = io::read_to_string(io::stdin()).context("read standard input")?;
            println!("{}", write_file(&path, &content)?);
            Ok(())
        }
    }
}

fn run_remap(args: &RemapArgs) -> Result<()> {
    let output = args.output.clone().unwrap_or_else(|| {
        let path = default_output_path(&args.workbook, Local::now().naive_local());
        debug!(output = %path.display(), "no output path given, using default");
        path
    });
    let outcome = remap(&args.mapping, &args.workbook, &output)?;
    if args.json {
        print_json(&outcome)
    } else {
        print_remap_summary(&outcome);
        Ok(())
    }
}

fn run_validate_mapping(args: &MappingArgs) -> Result<()> {
    let validation = validate_mapping(&args.path)?;
    if args.json {
        print_json(&validation)
    } else {
        print_mapping_rules(&validation);
        Ok(())
    }
}

fn run_validate_workbook(args: &WorkbookArgs) -> Result<()> {
    let validation = validate_workbook(&args.path)?;
    if args.json {
        print_json(&validation)
    } else {
        println!("{validation}");
        Ok(())
    }
}

fn run_analyze(args: &WorkbookArgs) -> Result<()> {
    let analysis = analyze_workbook(&args.path)?;
    if args.json {
        print_json(&analysis)
    } else {
        print!("{analysis}");
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize result")?;
    println!("{json}");
    Ok(())
}
