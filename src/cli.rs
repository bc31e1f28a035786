// File: ./src/cli.rs
//! Command-line parsing and help text for the `chorebridge` binary.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve,
    Query(String),
    Complete(String),
    Help,
}

/// Parse arguments (without the binary name).
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(first) = args.first() else {
        return Ok(Command::Serve);
    };

    let rest = || args[1..].join(" ");
    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "serve" => Ok(Command::Serve),
        "query" | "complete" if args.len() < 2 => {
            Err(format!("'{}' needs some text, e.g. {} miles morning", first, first))
        }
        "query" => Ok(Command::Query(rest())),
        "complete" => Ok(Command::Complete(rest())),
        other => Err(format!("Unknown command '{}'. See --help.", other)),
    }
}

pub fn print_help(binary_name: &str) {
    println!(
        "Chorebridge v{} - voice-assistant bridge for Skylight chores",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {}                        Start the webhook server", binary_name);
    println!("    {} serve                  Start the webhook server", binary_name);
    println!("    {} query <text...>        Answer a chores question once", binary_name);
    println!("    {} complete <text...>     Mark the described chore complete", binary_name);
    println!("    {} --help                 Show this help message", binary_name);
    println!();
    println!("ENVIRONMENT:");
    println!("    SKYLIGHT_TOKEN       Authorization header value for the Skylight API (required)");
    println!("    FRAME_ID             Skylight frame id (required)");
    println!("    HF_TOKEN             Token for the hosted model used to match chores");
    println!("    SKYLIGHT_BASE_URL    Override the Skylight API base URL");
    println!("    HF_API_URL           Override the model inference URL");
    println!("    PORT                 Listen port (default 8080)");
    println!("    CHOREBRIDGE_CONFIG   Optional TOML file read before the variables above");
    println!("    CHOREBRIDGE_LOG      Log level (error, warn, info, debug, trace)");
    println!();
    println!("WEBHOOK:");
    println!("    POST /  {{\"action\": \"query\", \"query\": \"miles morning tasks\"}}");
    println!("    POST /  {{\"action\": \"complete\", \"chore\": \"unloaded the dishwasher\"}}");
    println!("    GET  /health");
}
