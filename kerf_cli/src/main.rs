//! # Kerf CLI Application
//!
//! Terminal front-end for the laser-cutting analytics engine. Runs a
//! warping-risk assessment from interactively entered job parameters and
//! prints both a formatted report and the JSON payload the engine
//! returns to UI and export layers.

use std::io::{self, BufRead, Write};

use kerf_core::benchmarks::MaterialKind;
use kerf_core::calculators::warping::{assess, CoolingMethod, SupportType, WarpingRiskInput};
use kerf_core::units::{Kilowatts, Watts};

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

fn prompt_material(prompt: &str, default: MaterialKind) -> MaterialKind {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return default;
    }
    MaterialKind::from_str_flexible(trimmed).unwrap_or(default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Kerf CLI - Laser Cutting Analytics");
    println!("==================================");
    println!();
    println!("Warping risk assessment. Press Enter to accept defaults.");
    println!();

    let material = prompt_material("Material [mild steel]: ", MaterialKind::MildSteel);
    let thickness_mm = prompt_f64("Sheet thickness (mm) [2.0]: ", 2.0);
    let length_mm = prompt_f64("Part length (mm) [800.0]: ", 800.0);
    let width_mm = prompt_f64("Part width (mm) [400.0]: ", 400.0);
    let laser_power_w = prompt_f64("Laser power (W) [3000.0]: ", 3000.0);
    let cutting_speed_mm_min = prompt_f64("Cutting speed (mm/min) [2500.0]: ", 2500.0);

    let input = WarpingRiskInput {
        label: "CLI-Demo".to_string(),
        material,
        thickness_mm,
        length_mm,
        width_mm,
        laser_power_w,
        cutting_speed_mm_min,
        support: SupportType::Minimal,
        cooling: CoolingMethod::AirAssist,
    };

    println!();
    println!(
        "Assessing {} at {:.1} kW...",
        material,
        Kilowatts::from(Watts(laser_power_w)).value()
    );
    println!();

    match assess(&input) {
        Ok(result) => {
            println!("═══════════════════════════════════════");
            println!("  WARPING RISK ASSESSMENT");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!("  Material:  {}", material);
            println!("  Sheet:     {:.0} x {:.0} x {:.1} mm", length_mm, width_mm, thickness_mm);
            println!("  Process:   {:.0} W at {:.0} mm/min", laser_power_w, cutting_speed_mm_min);
            println!("  Fixturing: {} / {}",
                input.support.display_name(),
                input.cooling.display_name()
            );
            println!();
            println!("Findings:");
            println!("  Risk score:   {:.1} / 10 ({})",
                result.overall_risk_score,
                result.risk_level
            );
            println!("  Aspect ratio: {:.1}:1", result.aspect_ratio);
            println!("  Heat input:   {:.2} W-min/mm2", result.heat_input);
            println!("  Top drivers:  {}", result.top_drivers.join(", "));
            println!();
            if !result.composite.warnings.is_empty() {
                println!("Warnings:");
                for warning in &result.composite.warnings {
                    println!("  [{}] {}", warning.code, warning.message);
                }
                println!();
            }
            println!("Recommendations:");
            for rec in &result.recommendations {
                println!("  ({}) {}", rec.priority, rec.text);
            }
            println!();
            println!("═══════════════════════════════════════");

            println!();
            println!("JSON Output (for UI/export layers):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
