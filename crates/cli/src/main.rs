use std::process::ExitCode;

fn main() -> ExitCode {
    nutrafuel_cli::run()
}
