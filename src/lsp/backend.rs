//! LSP backend for local `uses:` reference analysis.

use dashmap::DashMap;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CompletionOptions, CompletionParams, CompletionResponse, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, DidSaveTextDocumentParams,
    DocumentLink, DocumentLinkOptions, DocumentLinkParams, InitializeParams, InitializeResult,
    InitializedParams, MessageType, ServerCapabilities, ServerInfo, TextDocumentSyncCapability,
    TextDocumentSyncKind, Url,
};
use tower_lsp::{Client, LanguageServer};

use super::completion::{complete_at, CandidateCache};
use super::diagnostics::issue_to_diagnostic;
use super::links::document_links;
use super::position::LineIndex;
use crate::analysis::{self, Settings};

/// Backend that handles document events and publishes diagnostics.
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Document content cache, keyed by URI.
    documents: DashMap<String, String>,
    /// Validation toggles taken from the client's initialization options.
    settings: Mutex<Settings>,
    /// Per-(document, line) candidate listing reused across completion calls.
    completion_cache: Mutex<CandidateCache>,
}

impl Backend {
    /// Create a new backend.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            documents: DashMap::new(),
            settings: Mutex::new(Settings::default()),
            completion_cache: Mutex::new(CandidateCache::default()),
        }
    }

    /// Handle document change - re-validate and publish diagnostics.
    async fn on_change(&self, uri: Url, content: String) {
        // Cache the document content
        self.documents.insert(uri.to_string(), content.clone());

        let Ok(path) = uri.to_file_path() else {
            return;
        };

        let references = analysis::extract_from_source(&content);
        let settings = self.settings.lock().await.clone();
        let Some(validation) = analysis::validate(&path, &references, &settings) else {
            // No `.github` marker above the document: previously published
            // diagnostics stay as they are.
            return;
        };

        let index = LineIndex::new(&content);
        let diagnostics = validation
            .issues
            .iter()
            .map(|issue| issue_to_diagnostic(issue, &index, &content))
            .collect();
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        *self.settings.lock().await =
            Settings::from_initialization_options(params.initialization_options);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec![".".to_string(), "/".to_string()]),
                    ..Default::default()
                }),
                document_link_provider: Some(DocumentLinkOptions {
                    resolve_provider: Some(false),
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "local-actions-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Local actions LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        self.on_change(params.text_document.uri, params.text_document.text)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        // We request FULL sync, so there's always exactly one change with full content
        if let Some(change) = params.content_changes.into_iter().next() {
            self.on_change(params.text_document.uri, change.text).await;
        }
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = params.text_document.uri;

        // Reference targets may have appeared or vanished on disk since the
        // last pass, so saving re-validates even unchanged text.
        let text = match params.text {
            Some(text) => text,
            None => match self.documents.get(uri.as_str()) {
                Some(doc) => doc.value().clone(),
                None => return,
            },
        };
        self.on_change(uri, text).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        // Remove from cache
        self.documents.remove(uri.as_str());

        // Clear diagnostics
        self.client.publish_diagnostics(uri, vec![], None).await;
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(source) = self
            .documents
            .get(uri.as_str())
            .map(|doc| doc.value().clone())
        else {
            return Ok(None);
        };
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };
        let Some(base) = analysis::base_dir(&path) else {
            return Ok(None);
        };

        let mut cache = self.completion_cache.lock().await;
        let items = complete_at(&source, position, &base, uri.as_str(), &mut cache);
        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(CompletionResponse::Array(items)))
    }

    async fn document_link(
        &self,
        params: DocumentLinkParams,
    ) -> Result<Option<Vec<DocumentLink>>> {
        let uri = params.text_document.uri;
        let Some(source) = self
            .documents
            .get(uri.as_str())
            .map(|doc| doc.value().clone())
        else {
            return Ok(None);
        };
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };

        let references = analysis::extract_from_source(&source);
        let settings = self.settings.lock().await.clone();
        let Some(validation) = analysis::validate(&path, &references, &settings) else {
            return Ok(Some(Vec::new()));
        };

        let index = LineIndex::new(&source);
        Ok(Some(document_links(
            &references,
            &validation.resolutions,
            &index,
            &source,
        )))
    }
}
