// This is the entry point for the application.
// It parses command-line arguments, initializes the session (fetch + interpret,
// once) and hands off to the HTTP front-end.

use std::process;

use clap::Parser;
use fences::cli::Args;
use fences::{server, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args = Args::parse();

    // Fetch the specification and build the session around it
    let session = match Session::initialize(&args.provider, &args.api_key, &args.spec_url) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Error initializing session: {}", err);
            process::exit(1);
        }
    };

    // Interpret the specification into a diagram, once, before serving
    println!("Interpreting spec...");
    let overview = match session.interpret() {
        Ok(overview) => overview,
        Err(err) => {
            eprintln!("Error interpreting specification: {}", err);
            process::exit(1);
        }
    };
    println!("OpenAPI specification successfully parsed: {}", overview.title);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Error starting runtime: {}", err);
            process::exit(1);
        }
    };

    println!("You can reach it on: http://localhost:{}", args.port);
    if let Err(err) = runtime.block_on(server::run(session, overview, args.port)) {
        eprintln!("Server error: {}", err);
        process::exit(1);
    }
}
