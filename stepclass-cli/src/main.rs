mod input;

use clap::{Parser, Subcommand};
use input::StepInput;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use stepclass_core::physics_list::RADIOACTIVE_DECAY_MODULE;
use stepclass_core::process::{CAPTURE_CATEGORY, CAPTURE_PROCESS_NAME};
use stepclass_core::{
    reachable_categories, CategoryCode, Config, CsvSink, EmPreset, ParticleClassifier,
    PhysicsList, ProcessClassifier, Species, StepRecordEncoder, SteppingAction,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stepclass")]
#[command(about = "Classify transport steps into species and interaction codes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode steps from a JSON Lines file into CSV rows
    Run {
        /// Step records, one JSON object per line
        #[arg(short, long)]
        input: PathBuf,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// EM physics module (overrides the config)
        #[arg(long)]
        physics: Option<String>,
        /// Add the radioactive decay module
        #[arg(long)]
        raddecay: bool,
        /// Install the heavy-ion tracking cut
        #[arg(long)]
        tracking_cut: bool,
        /// Kill every track after its first step
        #[arg(long)]
        kill_first_step: bool,
        /// Output CSV file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the EM physics modules
    Modules,
    /// Print the interaction category table
    Table {
        /// Only show codes reachable with this EM module
        #[arg(long)]
        physics: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            input,
            config,
            physics,
            raddecay,
            tracking_cut,
            kill_first_step,
            output,
        } => {
            let options = RunOptions {
                config,
                physics,
                raddecay,
                tracking_cut,
                kill_first_step,
                output,
            };
            run_file(&input, options)
        }
        Commands::Modules => {
            list_modules();
            Ok(())
        }
        Commands::Table { physics } => print_table(physics.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

struct RunOptions {
    config: Option<PathBuf>,
    physics: Option<String>,
    raddecay: bool,
    tracking_cut: bool,
    kill_first_step: bool,
    output: Option<PathBuf>,
}

fn load_config(options: &RunOptions) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = match &options.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(name) = &options.physics {
        config.physics.em_module = name.clone();
    }
    config.physics.radioactive_decay |= options.raddecay;
    config.physics.tracking_cut |= options.tracking_cut;
    config.stepping.kill_after_first_step |= options.kill_first_step;
    Ok(config)
}

fn run_file(input: &PathBuf, options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&options)?;

    let mut physics = PhysicsList::new(&config.physics);
    let (mut particles, processes) = physics.build_tables();
    info!(
        module = physics.em_name(),
        particles = particles.len(),
        processes = processes.len(),
        "physics tables built"
    );

    let writer: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let encoder = StepRecordEncoder::for_particles(&particles);
    let mut action = SteppingAction::new(encoder, CsvSink::new(BufWriter::new(writer)))
        .with_kill_after_first_step(config.stepping.kill_after_first_step);

    let reader = BufReader::new(File::open(input)?);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match StepInput::parse(&line) {
            Ok(step) => {
                let step = step.into_step(&mut particles);
                action.on_step(&step);
            }
            Err(e) => warn!(line = line_no + 1, "skipping malformed step: {}", e),
        }
    }
    action.finish();

    let stats = action.stats();
    info!(
        recorded = stats.recorded,
        filtered = stats.filtered,
        malformed = stats.malformed,
        sink_errors = stats.sink_errors,
        "run complete"
    );
    Ok(())
}

fn list_modules() {
    for preset in EmPreset::ALL {
        let marker = if preset == EmPreset::DEFAULT { " (default)" } else { "" };
        println!("{}{}", preset.name(), marker);
    }
    println!("{} (additive)", RADIOACTIVE_DECAY_MODULE);
}

fn print_table(physics: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let classifier = ProcessClassifier::new();

    let reachable = match physics {
        Some(name) => {
            if EmPreset::from_name(name).is_none() {
                return Err(format!("unknown physics module '{}'", name).into());
            }
            let mut list = PhysicsList::default();
            list.select_module(name);
            let (particles, processes) = list.build_tables();
            Some(reachable_categories(
                &particles,
                &processes,
                &ParticleClassifier::new(&particles),
                &classifier,
            ))
        }
        None => None,
    };

    println!("species,species_code,subtype,category");
    for species in Species::ALL {
        let mut rows: Vec<(String, i32)> = classifier
            .entries(species)
            .into_iter()
            .map(|(subtype, code)| (subtype.to_string(), code.value()))
            .collect();
        if species == Species::HeavyIon {
            rows.insert(0, (CAPTURE_PROCESS_NAME.to_string(), CAPTURE_CATEGORY.value()));
        }

        for (subtype, code) in rows {
            if let Some(reachable) = &reachable {
                let key = (species, CategoryCode::new(code));
                if !reachable.contains(&key) {
                    continue;
                }
            }
            println!("{},{},{},{}", species, species.code(), subtype, code);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn env_directives_can_quiet_info() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn run_takes_input_flag() {
        let cli = Cli::try_parse_from(["stepclass", "run", "--input", "steps.jsonl", "--tracking-cut"])
            .unwrap();
        match cli.command {
            Commands::Run {
                input, tracking_cut, ..
            } => {
                assert_eq!(input, PathBuf::from("steps.jsonl"));
                assert!(tracking_cut);
            }
            _ => panic!("expected run"),
        }
        assert!(Cli::try_parse_from(["stepclass", "run"]).is_err());
    }
}
