//! Forcing File Inspection Utility
//!
//! Opens a generated hosing file and reports:
//! - Dimensions and variables
//! - Where the forcing is non-zero and with which values
//! - The volume flux recovered by integrating over `cell_area`

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

/// One Sverdrup in m³/s.
const SVERDRUP: f64 = 1.0e6;

#[derive(Parser)]
#[command(version, about = "Summarise a hosing forcing file", long_about = None)]
struct Args {
    /// Forcing file to inspect
    #[arg(default_value = "out.nc")]
    file: PathBuf,

    /// Name of the forcing variable
    #[arg(long, default_value = "gfw_atmo")]
    variable: String,
}

#[derive(Debug, PartialEq)]
struct Summary {
    nonzero_cells: usize,
    min: f32,
    max: f32,
    lat_range: (f64, f64),
    lon_range: (f64, f64),
    flux_sv: f64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("🔍 Inspecting {}\n", args.file.display());

    let file = netcdf::open(&args.file)
        .with_context(|| format!("Failed to open `{}`", args.file.display()))?;

    println!("📏 Dimensions:");
    for dim in file.dimensions() {
        println!("  • {} ({})", dim.name(), dim.len());
    }

    println!("\n📈 Variables:");
    for var in file.variables() {
        let dims: Vec<String> = var.dimensions().iter().map(|d| d.name()).collect();
        println!("  • {} ({})", var.name(), dims.join(", "));
    }

    let lat: Vec<f64> = read(&file, "lat")?;
    let lon: Vec<f64> = read(&file, "lon")?;
    let cell_area: Vec<f64> = read(&file, "cell_area")?;
    let forcing: Vec<f32> = read(&file, &args.variable)?;

    // Only the first time step is summarised.
    let slice = &forcing[..cell_area.len().min(forcing.len())];

    println!("\n🌊 Forcing `{}`:", args.variable);
    match summarise(&lat, &lon, &cell_area, slice) {
        Some(summary) => {
            println!("  • Non-zero cells: {}", summary.nonzero_cells);
            println!("  • Values: {:e} .. {:e} m/s", summary.min, summary.max);
            println!(
                "  • Latitude centres: {} .. {}",
                summary.lat_range.0, summary.lat_range.1
            );
            println!(
                "  • Longitude centres: {} .. {}",
                summary.lon_range.0, summary.lon_range.1
            );
            println!("  • Integrated flux: {:.6} Sv", summary.flux_sv);
        }
        None => println!("  ❌ Field is zero everywhere"),
    }

    Ok(())
}

fn read<T: netcdf::NcTypeDescriptor + Copy>(file: &netcdf::File, name: &str) -> Result<Vec<T>> {
    let var = file
        .variable(name)
        .ok_or_else(|| anyhow!("No variable `{}` in file", name))?;

    Ok(var.get_values(..)?)
}

fn summarise(lat: &[f64], lon: &[f64], cell_area: &[f64], forcing: &[f32]) -> Option<Summary> {
    let n_lon = lon.len();
    let mut summary: Option<Summary> = None;

    for (idx, (&value, &area)) in forcing.iter().zip(cell_area).enumerate() {
        if value == 0.0 {
            continue;
        }
        let (la, lo) = (lat[idx / n_lon], lon[idx % n_lon]);
        let flux = value as f64 * area / SVERDRUP;

        match summary.as_mut() {
            None => {
                summary = Some(Summary {
                    nonzero_cells: 1,
                    min: value,
                    max: value,
                    lat_range: (la, la),
                    lon_range: (lo, lo),
                    flux_sv: flux,
                })
            }
            Some(s) => {
                s.nonzero_cells += 1;
                s.min = s.min.min(value);
                s.max = s.max.max(value);
                s.lat_range = (s.lat_range.0.min(la), s.lat_range.1.max(la));
                s.lon_range = (s.lon_range.0.min(lo), s.lon_range.1.max(lo));
                s.flux_sv += flux;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_summarise_nonzero_region() {
        let lat = [10.0, 0.0];
        let lon = [-10.0, 0.0, 10.0];
        let cell_area = [1.0e12; 6];
        let forcing = [0.0, 1.0e-7, 1.0e-7, 0.0, 1.0e-7, 0.0];

        let summary = summarise(&lat, &lon, &cell_area, &forcing).unwrap();

        assert_eq!(summary.nonzero_cells, 3);
        assert_eq!(summary.lat_range, (0.0, 10.0));
        assert_eq!(summary.lon_range, (0.0, 10.0));
        assert!((summary.flux_sv - 0.3).abs() < 1e-6);
    }

    #[test]
    fn should_read_variables_with_type_conversion() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("forcing.nc");
        {
            let mut file = netcdf::create(&path).unwrap();
            file.add_dimension("lat", 2).unwrap();
            let mut var = file.add_variable::<f64>("cell_area", &["lat"]).unwrap();
            var.put_values(&[1.5e12_f64, 2.5e12], ..).unwrap();
        }

        let file = netcdf::open(&path).unwrap();
        let as_f64: Vec<f64> = read(&file, "cell_area").unwrap();
        let as_f32: Vec<f32> = read(&file, "cell_area").unwrap();

        assert_eq!(as_f64, vec![1.5e12, 2.5e12]);
        assert_eq!(as_f32, vec![1.5e12_f32, 2.5e12_f32]);
        assert!(read::<f32>(&file, "gfw_atmo").is_err());
    }

    #[test]
    fn should_return_none_for_zero_field() {
        assert!(summarise(&[0.0], &[0.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]).is_none());
    }
}
