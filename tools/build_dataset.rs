//! Dataset Build Tool
//!
//! Configuration-driven tool for turning a delimited time-series file into
//! windowed train/test tensors ready for model training.
//!
//! ## Output Format
//!
//! - **Inputs**: `{name}_x_train.npy`, `{name}_x_test.npy` - Shape
//!   `[N, sequence_length, entities × fields]`
//! - **Targets**: `{name}_y_train.npy`, `{name}_y_test.npy` - Shape
//!   `[N, horizons × entities]`
//! - **Metadata**: `{name}_metadata.json` - Shapes, orderings, timestamp
//!
//! # Usage
//!
//! ```bash
//! # From JSON config
//! cargo run --release --bin build_dataset -- --config config.json --input prices.csv --output out/
//!
//! # Generate sample config
//! cargo run --release --bin build_dataset -- --generate-config config.json
//! ```

use std::fs;
use std::process;
use windowed_dataset::config::SeriesPipelineConfig;
use windowed_dataset::export::NumpyExporter;
use windowed_dataset::pipeline::load_series_dataset;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        process::exit(1);
    }

    match args[1].as_str() {
        "--generate-config" => {
            if args.len() < 3 {
                eprintln!("Error: --generate-config requires a path argument");
                process::exit(1);
            }
            generate_sample_config(&args[2]);
        }
        "--help" | "-h" => {
            print_usage(&args[0]);
        }
        _ => {
            run_build(&args);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!(
        r#"
Dataset Build Tool

Usage:
    {program} --input <prices.csv> --output <dir> [options]
    {program} --generate-config <path.json>
    {program} --help

Options:
    --config <path.json>    Pipeline configuration (defaults used otherwise)
    --name <name>           Output file prefix (default: dataset)

Examples:
    {program} --input prices.csv --output exports/
    {program} --config config.json --input prices.csv --output exports/ --name sp500
"#
    );
}

fn generate_sample_config(path: &str) {
    let config = SeriesPipelineConfig::default();
    match config.save_json(path) {
        Ok(()) => {
            println!("Generated sample config: {path}");
            println!("\nEdit the following fields before running:");
            println!("  - sequence_length: time steps per input window");
            println!("  - horizons: number of prediction horizons");
            println!("  - train_fraction: fraction of windows used for training");
            println!("  - comparison_field: field compared to derive targets");
        }
        Err(e) => {
            eprintln!("Error generating config: {e}");
            process::exit(1);
        }
    }
}

fn run_build(args: &[String]) {
    let mut config_path: Option<&str> = None;
    let mut input_path: Option<&str> = None;
    let mut output_dir: Option<&str> = None;
    let mut name = "dataset";

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                config_path = args.get(i + 1).map(String::as_str);
                i += 2;
            }
            "--input" => {
                input_path = args.get(i + 1).map(String::as_str);
                i += 2;
            }
            "--output" => {
                output_dir = args.get(i + 1).map(String::as_str);
                i += 2;
            }
            "--name" => {
                name = args.get(i + 1).map_or(name, String::as_str);
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let Some(input_path) = input_path else {
        eprintln!("Error: --input is required");
        process::exit(1);
    };
    let Some(output_dir) = output_dir else {
        eprintln!("Error: --output is required");
        process::exit(1);
    };

    let config = match config_path {
        Some(path) => match SeriesPipelineConfig::load_json(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config {path}: {e}");
                process::exit(1);
            }
        },
        None => SeriesPipelineConfig::default(),
    };

    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {input_path}: {e}");
            process::exit(1);
        }
    };

    println!("Building dataset from {input_path}");
    println!(
        "  sequence_length={}, horizons={}, train_fraction={}",
        config.sequence_length, config.horizons, config.train_fraction
    );

    let dataset = match load_series_dataset(&text, &config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error building dataset: {e}");
            process::exit(1);
        }
    };

    println!(
        "  {} entities, {} dates, {} fields",
        dataset.entities.len(),
        dataset.dates.len(),
        dataset.fields.len()
    );
    println!(
        "  {} train windows, {} test windows",
        dataset.train.len(),
        dataset.test.len()
    );

    let exporter = NumpyExporter::new(output_dir);
    if let Err(e) = exporter.export_split(
        name,
        &dataset.train,
        &dataset.test,
        config.horizons,
        &dataset.entities,
        &dataset.fields,
    ) {
        eprintln!("Error exporting dataset: {e}");
        process::exit(1);
    }

    println!("Exported to {output_dir}/{name}_*.npy");
}
