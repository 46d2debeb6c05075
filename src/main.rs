use clap::Parser;
use env_logger::Env;
use hbs_tools::{cli, commands};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();

    let result = match args.command {
        cli::Commands::Dedup {
            input,
            report_file,
            stats_json,
            quiet,
        } => commands::dedup::run(input, report_file, stats_json, quiet),
        cli::Commands::Align { input } => commands::align::run(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
