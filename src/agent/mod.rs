//! Agent system: policy, tool loop and session history.

pub mod agent;
pub mod conversation;
pub mod policy;
pub mod runner;
pub mod session;

pub use agent::Agent;
pub use conversation::Conversation;
pub use policy::profile_agent;
pub use runner::{RunResult, RunStep, Runner};
pub use session::{InMemorySessionStore, SessionId, SessionStore};
