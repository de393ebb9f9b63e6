//! LSP (Language Server Protocol) server for local `uses:` references.
//!
//! Provides document links, diagnostics, and path completion for local
//! workflow and action references through the standard protocol.

pub mod backend;
pub mod completion;
pub mod diagnostics;
pub mod links;
pub mod position;

use anyhow::Result;
use tower_lsp::{LspService, Server};

use backend::Backend;

/// Start the LSP server using stdio transport.
///
/// This function blocks until the client disconnects.
pub async fn start_server() -> Result<()> {
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(Backend::new);

    Server::new(stdin, stdout, socket).serve(service).await;
    Ok(())
}
