use clap::Parser;

use auto_analyzer::cli::{Cli, Commands};
use auto_analyzer::commands::{run_init, run_validate, run_watch};
use auto_analyzer::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Watch(args) => run_watch(args, &cli),
        Commands::Validate(args) => run_validate(args, &cli),
        Commands::Init(args) => run_init(args),
    };

    std::process::exit(exit_code);
}
