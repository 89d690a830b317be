use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use clap::Parser;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use lazy_static::lazy_static;
use meshmaker_scene::Document;
use semver::Version;

use crate::{
    commands::{Command, Flow},
    options::Options,
};

mod commands;
mod options;

lazy_static! {
    static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
}

#[derive(Parser, Debug)]
#[command(version, about = "Edit MeshMaker scenes from a command script.")]
pub struct Args {
    #[arg(value_name = "SCRIPT", help = "Command script to run, reads stdin if omitted.")]
    script: Option<PathBuf>,

    #[arg(long, value_name = "N", help = "Keep at most N undo steps (overrides options.toml).")]
    max_undo_depth: Option<usize>,

    #[arg(long, default_value = "info", help = "Log specification, e.g. 'debug' or 'meshmaker_undo=debug'.")]
    log_level: String,

    #[arg(long, default_value_t = false, help = "Stop at the first failing command.")]
    strict: bool,

    #[arg(long, default_value_t = false, help = "Write the effective options back to options.toml.")]
    save_options: bool,
}

fn init_logging(spec: &str) -> Option<LoggerHandle> {
    let logger = match Logger::try_with_env_or_str(spec) {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Invalid log specification '{spec}': {err}");
            return None;
        }
    };

    let result = if let Some(log_dir) = Options::config_dir().filter(|dir| dir.exists() || std::fs::create_dir_all(dir).is_ok()) {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("meshmaker").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
            .start()
    } else {
        logger.log_to_stderr().start()
    };

    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = init_logging(&args.log_level);
    log::info!("Starting MeshMaker {}", *VERSION);

    let mut options = Options::load();
    if let Some(depth) = args.max_undo_depth {
        options.undo.max_depth = Some(depth);
    }
    if args.save_options {
        options.store();
    }

    let mut doc = Document::new(&options.undo);
    let stdout = io::stdout();
    doc.on_needs_save_changed(|dirty| {
        if dirty {
            log::debug!("Document has unsaved changes");
        } else {
            log::debug!("Document saved");
        }
    });

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut out = stdout.lock();
    let mut last_title = doc.title();
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let flow = match Command::parse(&line).and_then(|command| match command {
            Some(command) => command.execute(&mut doc, &options, &mut out),
            None => Ok(Flow::Continue),
        }) {
            Ok(flow) => flow,
            Err(err) => {
                log::warn!("line {}: {:#}", number + 1, err);
                writeln!(out, "error on line {}: {:#}", number + 1, err)?;
                if args.strict {
                    return Err(err);
                }
                Flow::Continue
            }
        };

        let title = doc.title();
        if title != last_title {
            writeln!(out, "[{title}]")?;
            last_title = title;
        }
        if flow == Flow::Quit {
            break;
        }
    }

    if doc.needs_save() {
        log::warn!("Quitting with unsaved changes in {}", doc.name());
    }
    log::info!("Shutting down.");
    Ok(())
}
