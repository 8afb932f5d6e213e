use std::io;
use std::process;

use clap::{Parser, Subcommand};
use compound_projection::error::Error;
use compound_projection::{api, logging, shell};
use tracing::error;

#[derive(Parser, Debug)]
#[command(
    name = "compound-projection",
    about = "Year-by-year compound interest projection with periodic contributions"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the projection for the default inputs without prompting
    Example,
    /// Serve the projection as a JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    match cli.command {
        Some(Command::Serve { port }) => {
            if let Err(e) = api::run_http_server(port).await {
                error!("server stopped: {e}");
                eprintln!("Server error: {e}");
                process::exit(1);
            }
        }
        Some(Command::Example) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = shell::run_example(&mut stdout) {
                exit_with(e);
            }
        }
        None => {
            let mut stdin = io::stdin().lock();
            let mut stdout = io::stdout().lock();
            if let Err(e) = shell::run(&mut stdin, &mut stdout) {
                exit_with(e);
            }
        }
    }
}

fn exit_with(err: Error) -> ! {
    match err {
        Error::InvalidInput(_) => eprintln!("{err}"),
        Error::Io(_) => eprintln!("Error: {err}"),
    }
    process::exit(1);
}
