//! `vot-convert` command-line entry point.

mod cli;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use clap::Parser;
use vot_format::config::VotConfig;
use vot_format::format::{
    AnnotationFormat, ExportOptions, FormatRegistry, ImportOptions, TrackingTask,
    formats::vot::VOT_DESCRIPTOR,
};

use crate::cli::{Cli, CliError, Command, DirectorySource};

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match VotConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return CliError::from(e).exit_code();
            }
        },
        None => VotConfig::load_from_default_path().unwrap_or_default(),
    };

    env_logger::Builder::new()
        .filter_level(config.log_level.more_verbose(cli.verbose).to_level_filter())
        .init();

    match execute(&cli.command, config) {
        Ok(()) => 0,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn lookup_vot(registry: &FormatRegistry) -> Result<&dyn AnnotationFormat, CliError> {
    let d = VOT_DESCRIPTOR;
    registry
        .by_descriptor(d.name, d.version, d.extension)
        .ok_or_else(|| CliError::UnknownFormat(d.to_string()))
}

fn execute(command: &Command, config: VotConfig) -> Result<(), CliError> {
    let registry = FormatRegistry::new();

    match command {
        Command::Import {
            archive,
            output,
            strict,
            label,
        } => {
            let format = lookup_vot(&registry)?;
            let options = ImportOptions::new()
                .label(label.as_str())
                .strict_line_counts(*strict);

            let mut task = TrackingTask::default();
            let mut file = File::open(archive)?;
            let result = format.import(&mut file, &mut task, &options)?;
            for warning in &result.warnings {
                eprintln!(
                    "Warning: {}: {}",
                    warning.file.as_deref().unwrap_or("-"),
                    warning.message
                );
            }

            let json = task.to_json()?;
            match output {
                Some(path) => std::fs::write(path, json)?,
                None => println!("{}", json),
            }
        }
        Command::Export {
            task,
            archive,
            images,
        } => {
            let format = lookup_vot(&registry)?;
            let task = TrackingTask::from_json(&std::fs::read_to_string(task)?)?;
            let options = ExportOptions::new()
                .include_images(images.is_some())
                .config(config);

            // The output file is only created once the archive is complete.
            let mut bytes = Vec::new();
            let result = match images {
                Some(dir) => {
                    let source = DirectorySource::new(&task, dir)?;
                    format.export(&mut bytes, &source, &options)?
                }
                None => format.export(&mut bytes, &task, &options)?,
            };

            let mut writer = BufWriter::new(File::create(archive)?);
            writer.write_all(&bytes)?;
            writer.flush()?;

            println!(
                "Wrote {:?}: {} frames, {} attributes, {} images",
                archive,
                result.frames_exported,
                result.attributes.len(),
                result.images_exported
            );
        }
        Command::Formats => {
            let mut formats = registry.all();
            formats.sort_by_key(|f| f.id());
            for format in formats {
                println!("{:<8} {}", format.id(), format.descriptor());
            }
        }
    }

    Ok(())
}
