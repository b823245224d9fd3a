//! Seats driven by people: a local prompt and a networked prompt.
//!
//! Both implement [`PlayStrategy`](crate::ai::PlayStrategy), so the table
//! treats them exactly like an AI seat.

mod human;
mod mailbox;
mod prompt;
mod remote;

pub use human::{HumanPrompt, MoveSource, Response, ScriptedSource};
pub use mailbox::{Mailbox, Submission};
pub use prompt::{PromptKind, PromptView};
pub use remote::RemotePrompt;
