use anyhow::Result;
use chorebridge::cli::{self, Command};
use chorebridge::config::Config;
use chorebridge::handler::{ChoreRequest, ChoreService};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let command = match cli::parse_args(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{}", msg);
            std::process::exit(2);
        }
    };

    if command == Command::Help {
        cli::print_help("chorebridge");
        return Ok(());
    }

    let config = Config::load()?;
    chorebridge::logging::init(&config.log_level);
    log::debug!("Loaded {:?}", config);
    if !config.has_llm_token() {
        log::warn!("HF_TOKEN is not set; chore completion requests will not find matches");
    }

    let request = match command {
        Command::Serve | Command::Help => return chorebridge::server::serve(&config).await,
        Command::Query(query) => ChoreRequest::Query { query },
        Command::Complete(chore) => ChoreRequest::Complete { chore },
    };

    // One-shot mode: print exactly what the webhook would return.
    let service = ChoreService::new(&config)?;
    let (status, body) = match service.handle(request).await {
        Ok(resp) => (200, serde_json::to_value(resp)?),
        Err(e) => (e.status().as_u16(), e.body()),
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    if status != 200 {
        std::process::exit(1);
    }
    Ok(())
}
