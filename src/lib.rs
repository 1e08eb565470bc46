//! Profile agent — a small conversational agent.
//!
//! A chat front end hands each turn's history to an [`agent::Agent`]. The
//! [`agent::Runner`] sends it to an OpenAI-compatible model endpoint and
//! resolves the tool calls the model makes along the way. The single tool,
//! [`tools::ProfileTool`], fetches one profile page and always answers in
//! text.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use profile_agent::prelude::*;
//!
//! # async fn example() -> profile_agent::error::Result<()> {
//! let config = ModelConfig::from_env()?;
//! let provider = profile_agent::provider::create_provider(&config)?;
//! let agent = profile_agent::agent::profile_agent(provider, ProfileTool::default());
//! let reply = agent.run(&[ModelMessage::user("hello")]).await?;
//! println!("{}", reply.text);
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod chat;
pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
