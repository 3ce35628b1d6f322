//! # study-client
//!
//! Client-side plumbing for a study-management application, as a library:
//! an HTTP API client with a fixed transport policy, a navigation guard over
//! a declarative route table, and a calendar-to-PDF exporter.
//!
//! ## Design Philosophy
//!
//! - **Thin adapters** - Each component wraps one third-party concern
//!   (HTTP via `reqwest`, PDF via `printpdf`) with the application's policy
//! - **No hidden side effects** - Failures surface as typed errors plus
//!   broadcast events; the HTTP layer never reaches into navigation state
//! - **Explicit context** - The navigation guard reads an injected
//!   [`SessionStore`], not a module-level global, so it tests without a real
//!   storage backend
//! - **Library-first** - No UI; page components and the composition root
//!   live in the host application
//!
//! ## Quick Start
//!
//! ```no_run
//! use study_client::{ApiClient, ClientConfig, MemorySessionStore, Router};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::from_env()?)?;
//!
//!     let session = Arc::new(MemorySessionStore::new());
//!     let router = Router::new(session.clone());
//!
//!     // Anonymous users land on the login page
//!     assert_eq!(router.navigate("/calendar"), "/login");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Calendar task types and export table building
pub mod calendar;
/// API client wrapper
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Client events for the embedding application
pub mod events;
/// Calendar PDF rendering and export
pub mod pdf;
/// Route table and navigation guard
pub mod router;
/// Session marker storage
pub mod session;

// Re-export commonly used types
pub use calendar::{Task, TasksByDate};
pub use client::{ApiClient, RequestHook};
pub use config::{ClientConfig, ExportConfig, FontConfig, FontFace};
pub use error::{Error, Result};
pub use events::ClientEvent;
pub use pdf::{export_calendar_pdf, export_month_calendar_pdf};
pub use router::{GuardDecision, Route, Router, View, check_navigation, routes};
pub use session::{MemorySessionStore, SessionStore};

// Re-export the HTTP method type used by `ApiClient::request`
pub use reqwest::Method;
