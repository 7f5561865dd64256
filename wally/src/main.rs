//! `wally`: validate loop configuration and print it as JSON.

use clap::Parser;

use wally::cli::{self, Cli};
use wally::exit_codes;
use wally::io::probe::FsProbe;
use wally::logging;

#[tokio::main]
async fn main() {
    logging::init();
    let cli = Cli::parse();

    let code = match cli::run(&cli, &FsProbe::new()).await {
        Ok(config) => match serde_json::to_string_pretty(&config) {
            Ok(rendered) => {
                println!("{rendered}");
                exit_codes::OK
            }
            Err(err) => {
                eprintln!("serialize config: {err}");
                exit_codes::FAILURE
            }
        },
        Err(err) => {
            let (code, message) = cli::describe_failure(&err);
            eprintln!("{message}");
            code
        }
    };
    std::process::exit(code);
}
