//! Agent clients for the NutraFuel storefront and admin dashboard.
//!
//! Every conversation goes through an [`AgentClient`]. Two implementations exist:
//!
//! - [`MockAgentClient`] answers locally from the keyword router after a simulated delay.
//! - [`HttpAgentClient`] posts to the agent API and maps failures to fixed user messages.
//!
//! [`ChatSession`] keeps the transcript for one agent and attaches charts and landing page
//! previews to admin replies. Requests race a `CancellationToken`; a cancelled request
//! leaves the transcript untouched.

pub mod client;
pub mod error;
pub mod http;
pub mod mock;
pub mod search;
pub mod session;

pub use client::{query_cancellable, AgentClient, AgentQuery, QueryOutcome, DEFAULT_RETRIEVAL_K};
pub use error::QueryError;
pub use http::HttpAgentClient;
pub use mock::{simulate_delay, MockAgentClient};
pub use search::{intelligent_search, SearchResult};
pub use session::{ChatSession, SendOutcome};
