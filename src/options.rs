use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct ProgramArguments {
    /// Raise the diagnostic verbosity; may be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Input files to the driver
    #[arg()]
    pub input_files: Vec<PathBuf>,
}

impl ProgramArguments {
    /// Threshold for the diagnostic sink, fixed once at start-up.
    ///
    /// A quiet run only shows critical failures; each `-v` reveals one more
    /// level.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

pub fn parse_args() -> ProgramArguments {
    ProgramArguments::parse()
}
