//! # driftls
//!
//! A language server for the Drift shading language.
//!
//! The server speaks a small subset of the Language Server Protocol over a
//! framed stdio channel: initialize, full-sync document lifecycle
//! notifications, and full-document semantic tokens with lexer diagnostics
//! published as a side effect.
//!
//! Messages are processed strictly one at a time on a single task; the
//! document store is only ever touched from the serve loop, so there is no
//! locking anywhere.
//!
//! ## Example
//!
//! ```rust,no_run
//! use driftls::Server;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = Server::new(tokio::io::stdin(), tokio::io::stdout());
//!     if let Err(e) = server.serve().await {
//!         eprintln!("{e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod documents;
pub mod error;
pub mod lexer;
pub mod semantic;
pub mod server;
pub mod transport;
pub mod types;

pub use error::{LspError, Result};
pub use server::Server;
