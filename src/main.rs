//! Terminal front end for the profile agent.

use std::io::Write;
use std::sync::Arc;

use clap::Parser;
use profile_agent::agent::{profile_agent, InMemorySessionStore};
use profile_agent::chat::ChatFrontend;
use profile_agent::cli::{parse_prompt_line, Cli, Commands, PromptInput};
use profile_agent::config::AppConfig;
use profile_agent::error::AgentError;
use profile_agent::provider::create_provider;
use profile_agent::tools::ProfileTool;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "profile_agent=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // .env fills in variables the environment does not already set.
    let _ = dotenvy::dotenv();

    // Configuration problems end the process before any prompt is shown.
    let frontend = match AppConfig::load(&cli.global.overrides()).and_then(|c| build_frontend(&c))
    {
        Ok(frontend) => frontend,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Chat => run_chat(&frontend).await,
        Commands::Ask(args) => run_ask(&frontend, &args.prompt).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn build_frontend(config: &AppConfig) -> Result<ChatFrontend, AgentError> {
    let provider = create_provider(&config.model)?;
    let agent = profile_agent(provider, ProfileTool::new(config.profile_url.clone()))
        .with_settings(config.settings())
        .with_max_turns(config.max_turns);
    Ok(ChatFrontend::new(
        Arc::new(agent),
        Arc::new(InMemorySessionStore::new()),
    ))
}

async fn run_chat(frontend: &ChatFrontend) -> Result<(), AgentError> {
    let (session, welcome) = frontend.start_session();
    println!("{welcome}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_prompt_line(&line) {
            PromptInput::Exit => break,
            PromptInput::Empty => continue,
            PromptInput::Message(text) => match frontend.handle_message(&session, text).await {
                Ok(reply) => println!("{reply}"),
                // The turn is dropped; history stays as it was.
                Err(e) => eprintln!("Error: {e} ({})", e.recovery_suggestion().hint()),
            },
        }
    }

    frontend.end_session(&session);
    Ok(())
}

async fn run_ask(frontend: &ChatFrontend, prompt: &str) -> Result<(), AgentError> {
    let (session, _) = frontend.start_session();
    let reply = frontend.handle_message(&session, prompt).await;
    frontend.end_session(&session);
    println!("{}", reply?);
    Ok(())
}
