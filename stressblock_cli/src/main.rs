//! # Stressblock CLI
//!
//! Terminal front end for stress-block evaluations.
//!
//! - `stressblock --input section.json` evaluates a `StressBlockInput` file
//! - `stressblock` with no input runs an interactive demo on a T-section
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `warn`).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stressblock_core::calculations::stress_block::{calculate, StressBlockInput, StressBlockResult};
use stressblock_core::errors::{CalcError, CalcResult};
use stressblock_core::geometry::SectionProfile;
use stressblock_core::material::ParabolaRectangleLaw;

#[derive(Parser, Debug)]
#[command(name = "stressblock")]
#[command(about = "Resultant force and lever arm of a parabola-rectangle stress block")]
struct Args {
    /// JSON file holding a StressBlockInput; runs the interactive demo when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,

    /// Print only the JSON result
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log evaluation details (debug level)
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn load_input(path: &Path) -> CalcResult<StressBlockInput> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

fn demo_input() -> CalcResult<StressBlockInput> {
    println!("Stressblock CLI - Stress-Block Integration");
    println!("==========================================");
    println!();
    println!("Section: T-beam, web 250 x 450, flange 800 x 150 (mm)");
    println!("Material: C30/37, alpha_cc = 0.85, gamma_c = 1.5");
    println!();

    let zone_depth = prompt_f64("Enter compression-zone depth (mm) [200.0]: ", 200.0);
    let strain_permille = prompt_f64("Enter top-fibre strain (permille) [3.5]: ", 3.5);

    Ok(StressBlockInput {
        label: "CLI-Demo".to_string(),
        profile: SectionProfile::t_section(250.0, 450.0, 800.0, 150.0)?,
        law: ParabolaRectangleLaw::from_ec2_2004(30.0, 0.85, 1.5)?,
        zone_depth,
        strain_top: strain_permille * 1e-3,
        strain_bot: 0.0,
    })
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "stressblock_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    let input = match &args.input {
        Some(path) => load_input(path),
        None => demo_input(),
    };

    let outcome = input.and_then(|input| calculate(&input).map(|result| (input, result)));

    match outcome {
        Ok((input, result)) => {
            if !args.json {
                print_report(&input, &result);
                println!();
                println!("JSON Output:");
            }
            match render_json(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(&e),
            }
        }
        Err(e) => fail(&e),
    }
}

fn render_json<T: Serialize>(value: &T) -> CalcResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn fail(e: &CalcError) -> ! {
    tracing::error!(code = e.error_code(), "evaluation failed");
    eprintln!("Error: {}", e);
    if let Ok(json) = render_json(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    std::process::exit(1);
}

fn print_report(input: &StressBlockInput, result: &StressBlockResult) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  STRESS BLOCK: {}", input.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  Section depth: {:.1} ({} steps)", input.profile.total_depth(), input.profile.len());
    println!("  Zone depth:    {:.1}", input.zone_depth);
    println!("  Strain top:    {:.3} permille", input.strain_top * 1e3);
    println!(
        "  Law:           f_cd = {:.2}, eps_c2 = {:.3} permille, n = {:.2}",
        input.law.f_cd,
        input.law.eps_c2 * 1e3,
        input.law.n
    );
    println!();
    println!("Result:");
    println!("  Force:         {:.1}", result.force());
    match result.lever_arm() {
        Ok(lever_arm) => println!("  Lever arm:     {:.2} from the compressed fibre", lever_arm),
        Err(e) => println!("  Lever arm:     undefined ({})", e),
    }
    println!("  Segments:      {}", result.segment_count);
    match result.transition_depth {
        Some(depth) => println!("  Plateau from:  local depth {:.2}", depth),
        None => println!("  Plateau from:  not reached"),
    }
    if result.floor_triggered {
        println!("  Note: numerical floor applied near the parabola singular point");
    }
    if result.exceeds_ultimate_strain {
        println!("  Warning: strain exceeds the ultimate strain of the material");
    }
    println!("═══════════════════════════════════════");
}
