use clap::Parser;
use fxbacktest::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    fxbacktest::logging::init(cli.verbose);
    run(cli)
}
