//! The server loop and request dispatch.
//!
//! One task drives the whole protocol: read a frame, decode the envelope,
//! dispatch, write any replies, repeat. There is no shutdown method; the loop
//! runs until the stream closes or a fatal error surfaces, and `serve` returns
//! that error to the caller.

use crate::documents::DocumentStore;
use crate::error::{ResponseError, Result};
use crate::lexer::Lexer;
use crate::semantic;
use crate::transport::Transport;
use crate::types::{
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams, Id,
    InitializeResult, NotificationMessage, PublishDiagnosticsParams, RequestMessage,
    ResponseMessage, SemanticTokensOptions, SemanticTokensParams, ServerCapabilities, ServerInfo,
    TextDocumentSyncKind,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncWrite};

/// The language server, generic over its transport streams so tests can drive
/// it with in-memory buffers.
pub struct Server<R, W> {
    transport: Transport<R, W>,
    documents: DocumentStore,
    initialized: bool,
}

impl<R: AsyncRead + Unpin, W: AsyncWrite + Unpin> Server<R, W> {
    /// Create a server over the given streams.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            transport: Transport::new(reader, writer),
            documents: DocumentStore::new(),
            initialized: false,
        }
    }

    /// Run the server until the stream closes or a fatal error occurs.
    ///
    /// Frame-read failures (including a clean end of stream), envelope-decode
    /// failures, and write failures all end the loop by returning the error.
    /// Recoverable conditions are answered on the wire and never reach here.
    pub async fn serve(&mut self) -> Result<()> {
        loop {
            let payload = self.transport.read_frame().await?;
            let request: RequestMessage = serde_json::from_slice(&payload)?;

            log::debug!("--> {} (id: {:?})", request.method, request.id);

            self.handle_message(request).await?;
        }
    }

    /// Dispatch one decoded message.
    async fn handle_message(&mut self, request: RequestMessage) -> Result<()> {
        match request.method.as_str() {
            "initialize" => self.initialize(request.id).await,

            "textDocument/didOpen" => {
                if let Some(params) = self
                    .parse_params::<DidOpenTextDocumentParams>(&request)
                    .await?
                {
                    self.documents
                        .open(params.text_document.uri, params.text_document.text);
                }
                Ok(())
            }
            "textDocument/didChange" => {
                if let Some(params) = self
                    .parse_params::<DidChangeTextDocumentParams>(&request)
                    .await?
                {
                    self.documents
                        .change(params.text_document.uri, &params.content_changes);
                }
                Ok(())
            }
            "textDocument/didClose" => {
                if let Some(params) = self
                    .parse_params::<DidCloseTextDocumentParams>(&request)
                    .await?
                {
                    self.documents.close(&params.text_document.uri);
                }
                Ok(())
            }

            "textDocument/semanticTokens/full" => {
                if let Some(params) = self.parse_params::<SemanticTokensParams>(&request).await? {
                    self.semantic_tokens(request.id, &params).await?;
                }
                Ok(())
            }

            _ => self.unknown_method(request).await,
        }
    }

    /// Parse `params` into the shape the method expects.
    ///
    /// On mismatch, answers `InvalidParams` (against the request's id, which
    /// may be null) and returns `None` so the handler is never invoked.
    async fn parse_params<T: DeserializeOwned>(
        &mut self,
        request: &RequestMessage,
    ) -> Result<Option<T>> {
        let params = request.params.clone().unwrap_or(serde_json::Value::Null);
        match serde_json::from_value(params) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(e) => {
                log::warn!("invalid params for {}: {}", request.method, e);
                self.send_error(
                    request.id.clone(),
                    ResponseError::invalid_params(format!(
                        "invalid params for {}: {}",
                        request.method, e
                    )),
                )
                .await?;
                Ok(None)
            }
        }
    }

    /// Reply with the static capabilities object. Params are ignored and no
    /// request ordering is enforced.
    async fn initialize(&mut self, id: Option<Id>) -> Result<()> {
        if !self.initialized {
            self.initialized = true;
            log::info!("server initialized");
        }

        let result = InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncKind::Full),
                semantic_tokens_provider: Some(SemanticTokensOptions {
                    legend: semantic::legend(),
                    full: true,
                }),
            },
            server_info: Some(ServerInfo {
                name: "driftls".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        };

        self.send_response(id, serde_json::to_value(result)?).await
    }

    /// Lex the document, publish diagnostics for lexical errors, then reply
    /// with the encoded token array.
    async fn semantic_tokens(
        &mut self,
        id: Option<Id>,
        params: &SemanticTokensParams,
    ) -> Result<()> {
        let lexer = Lexer {
            all_errors: true,
            comments: true,
        };
        let (tokens, errors) = lexer.tokenize(self.documents.get(&params.text_document.uri));

        let notification = PublishDiagnosticsParams {
            uri: params.text_document.uri.clone(),
            diagnostics: semantic::diagnostics(&errors),
        };
        self.send_notification(
            "textDocument/publishDiagnostics",
            serde_json::to_value(notification)?,
        )
        .await?;

        let result = semantic::encode(&tokens);
        self.send_response(id, serde_json::to_value(result)?).await
    }

    /// Requests get a `MethodNotFound` reply; notifications are dropped.
    async fn unknown_method(&mut self, request: RequestMessage) -> Result<()> {
        match request.id {
            Some(id) => {
                log::warn!("unknown method: {}", request.method);
                self.send_error(
                    Some(id),
                    ResponseError::method_not_found(format!("unknown method {}", request.method)),
                )
                .await
            }
            None => {
                log::debug!("ignoring unknown notification: {}", request.method);
                Ok(())
            }
        }
    }

    async fn send_response(&mut self, id: Option<Id>, result: serde_json::Value) -> Result<()> {
        self.send_json(&ResponseMessage::success(id, result)).await
    }

    async fn send_error(&mut self, id: Option<Id>, error: ResponseError) -> Result<()> {
        self.send_json(&ResponseMessage::error(id, error)).await
    }

    async fn send_notification(&mut self, method: &str, params: serde_json::Value) -> Result<()> {
        self.send_json(&NotificationMessage::with_params(method, params))
            .await
    }

    async fn send_json<T: Serialize>(&mut self, message: &T) -> Result<()> {
        let payload = serde_json::to_vec(message)?;
        self.transport.write_frame(&payload).await
    }
}
