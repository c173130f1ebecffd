mod lexer;
mod options;

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = options::parse_args();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .init();

    log::debug!("finished parsing the command line, starting on source files");
    for file in &args.input_files {
        log::info!("processing file '{}'", file.display());
        if let Err(err) = lexer::compile(file) {
            log::error!("failed to compile '{}': {err}", file.display());
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
