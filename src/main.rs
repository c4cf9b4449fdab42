//! The driftls binary: LSP over stdio.
//!
//! stdout carries the protocol, so all logging goes to stderr. Set
//! `RUST_LOG=debug` to see every dispatched method.

use driftls::Server;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let mut server = Server::new(tokio::io::stdin(), tokio::io::stdout());

    if let Err(e) = server.serve().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
