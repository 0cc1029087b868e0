use std::process::ExitCode;

fn main() -> ExitCode {
    assetpipe::cli::run()
}
