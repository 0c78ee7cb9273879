use cyclet::commands::Cli;
use cyclet::msg_error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            msg_error!(error);
            ExitCode::FAILURE
        }
    }
}
