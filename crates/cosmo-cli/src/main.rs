use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args as ClapArgs, Parser, Subcommand};
use cosmo_core::errors::{CosmoError, ErrorInfo};
use cosmo_engine::{Cosmology, CosmologyState};
use cosmo_params::RawParams;

#[derive(Parser, Debug)]
#[command(name = "cosmo", about = "Cosmological parameter compiler CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a parameter file into the canonical set and print it as JSON.
    Compile(CompileArgs),
    /// Print selected (possibly derived) parameters from a compiled set.
    Show(ShowArgs),
    /// Compile a parameter file, attach an engine and save the state.
    Save(SaveArgs),
    /// Reload a saved state and print a summary.
    Load(LoadArgs),
}

#[derive(ClapArgs, Debug)]
struct CompileArgs {
    /// YAML or JSON parameter file.
    #[arg(long)]
    params: PathBuf,
    /// Output file for the canonical JSON (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct ShowArgs {
    /// YAML or JSON parameter file.
    #[arg(long)]
    params: PathBuf,
    /// Parameter names to resolve, canonical or derived (e.g. H0, omega_b).
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(ClapArgs, Debug)]
struct SaveArgs {
    /// YAML or JSON parameter file.
    #[arg(long)]
    params: PathBuf,
    /// Engine to attach before saving.
    #[arg(long)]
    engine: Option<String>,
    /// Output state file.
    #[arg(long)]
    out: PathBuf,
}

#[derive(ClapArgs, Debug)]
struct LoadArgs {
    /// Saved state file.
    #[arg(long)]
    state: PathBuf,
}

fn read_params(path: &Path) -> Result<RawParams, CosmoError> {
    let text = fs::read_to_string(path).map_err(|err| {
        CosmoError::Serde(
            ErrorInfo::new("params-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => RawParams::from_json_str(&text),
        _ => RawParams::from_yaml_str(&text),
    }
}

fn compile(args: &CompileArgs) -> Result<(), CosmoError> {
    let cosmo = Cosmology::new(read_params(&args.params)?)?;
    let json = serde_json::to_string_pretty(cosmo.params())
        .map_err(|err| CosmoError::Serde(ErrorInfo::new("canonical-serialize", err.to_string())))?;
    match &args.out {
        Some(out) => fs::write(out, json).map_err(|err| {
            CosmoError::Serde(
                ErrorInfo::new("canonical-write", err.to_string())
                    .with_context("path", out.display().to_string()),
            )
        })?,
        None => println!("{json}"),
    }
    Ok(())
}

fn show(args: &ShowArgs) -> Result<(), CosmoError> {
    let cosmo = Cosmology::new(read_params(&args.params)?)?;
    for name in &args.names {
        let value = cosmo.params().get(name)?;
        let rendered = serde_json::to_string(&value)
            .map_err(|err| CosmoError::Serde(ErrorInfo::new("value-serialize", err.to_string())))?;
        println!("{name} = {rendered}");
    }
    Ok(())
}

fn save(args: &SaveArgs) -> Result<(), CosmoError> {
    let mut cosmo = Cosmology::new(read_params(&args.params)?)?;
    if let Some(engine) = &args.engine {
        cosmo.set_engine(engine, RawParams::new())?;
    }
    cosmo.state()?.save(&args.out)?;
    println!("saved state to {}", args.out.display());
    Ok(())
}

fn load(args: &LoadArgs) -> Result<(), CosmoError> {
    let state = CosmologyState::load(&args.state)?;
    let cosmo = Cosmology::from_state(&state)?;
    let params = cosmo.params();
    println!("h = {}", params.h);
    println!("Omega_m = {}", params.Omega_m());
    println!("N_ncdm = {}", params.N_ncdm());
    println!("N_ur = {}", params.N_ur);
    match cosmo.engine() {
        Some(engine) => println!("engine = {}", engine.name()),
        None => println!("engine = none"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Compile(args) => compile(args),
        Command::Show(args) => show(args),
        Command::Save(args) => save(args),
        Command::Load(args) => load(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
