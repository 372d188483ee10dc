//! Root of the `issueboard-core` library.
//!
//! Holds everything below the terminal layer: the issue model, the remote
//! client seam and its Gitea implementation, and the layered settings loader.

// Prevent accidental direct writes to stdout/stderr in library code. The
// TUI owns the terminal, so all diagnostics go through `tracing`.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod client;
pub mod config_loader;
pub mod config_types;
pub mod issue;
pub mod secrets;

pub use client::FetchError;
pub use client::FetchResult;
pub use client::GiteaClient;
pub use client::IssueKind;
pub use client::IssueState;
pub use client::ListIssuesOptions;
pub use client::RemoteIssueClient;
pub use config_loader::ConfigLoadError;
pub use config_loader::ConfigLoader;
pub use config_types::ColorSettings;
pub use config_types::GiteaSettings;
pub use issue::IssueRecord;
