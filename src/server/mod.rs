//! HTTP transport for the resolvers.
//!
//! Query-language parsing happens elsewhere; requests arrive as an
//! already-resolved field invocation:
//!
//! ```json
//! {"operation": "mutation", "field": "create", "arguments": {"text": "Hi"}}
//! ```
//!
//! Successful calls answer `{"data": {"<field>": ...}}`, failures answer
//! `{"errors": [{"message", "code", "type"}]}`.

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::{QuoteError, Result};
use crate::import::{import_from_source, FileSource, ImportReport};
use crate::resolver::args::Arguments;
use crate::resolver::Resolvers;
use crate::schema::OperationKind;
use crate::storage::QuoteStore;

#[derive(Clone)]
struct AppState {
    resolvers: Resolvers,
}

/// One field invocation as posted to `/graphql`.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldRequest {
    pub operation: String,
    pub field: String,
    #[serde(default)]
    pub arguments: Arguments,
}

/// Build the store for `config`, running the bulk import to completion.
pub fn build_store(config: &ServerConfig) -> (QuoteStore, Option<ImportReport>) {
    let mut store = QuoteStore::with_max_id(config.max_id);
    let report = config.import_path.as_ref().map(|path| {
        let report = import_from_source(&mut store, &FileSource::new(path));
        if !report.success {
            warn!(path = %path.display(), "starting with an empty store");
        }
        report
    });
    (store, report)
}

pub fn router(resolvers: Resolvers) -> Router {
    let state = Arc::new(AppState { resolvers });
    Router::new()
        .route("/healthz", get(healthz))
        .route("/schema", get(schema_sdl))
        .route("/graphql", post(execute))
        .with_state(state)
}

/// Serve `resolvers` on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, resolvers: Resolvers, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(resolvers))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Load the store, bind, and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    config.validate()?;

    let (store, _) = build_store(&config);
    let resolvers = Resolvers::new(store);

    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %listener.local_addr()?, "server is up and running");

    run(listener, resolvers, shutdown_signal()).await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}

async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn schema_sdl(State(state): State<Arc<AppState>>) -> String {
    state.resolvers.schema().to_sdl()
}

async fn execute(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<FieldRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(QuoteError::InvalidArgument {
                argument: "body".to_string(),
                message: rejection.body_text(),
            })
        }
    };
    let operation: OperationKind = match request.operation.parse() {
        Ok(op) => op,
        Err(message) => {
            return error_response(QuoteError::InvalidArgument {
                argument: "operation".to_string(),
                message,
            })
        }
    };

    match state
        .resolvers
        .dispatch(operation, &request.field, &request.arguments)
        .await
    {
        Ok(value) => {
            let mut data = serde_json::Map::new();
            data.insert(request.field, value);
            (StatusCode::OK, Json(json!({ "data": data })))
        }
        Err(e) => error_response(e),
    }
}

fn error_response(err: QuoteError) -> (StatusCode, Json<Value>) {
    let status = if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(error = %err, "request failed");
    let body = json!({
        "errors": [{
            "message": err.to_string(),
            "code": err.error_code(),
            "type": err.error_type(),
        }]
    });
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn state() -> State<Arc<AppState>> {
        State(Arc::new(AppState {
            resolvers: Resolvers::new(QuoteStore::new()),
        }))
    }

    fn request(
        operation: &str,
        field: &str,
        arguments: Value,
    ) -> std::result::Result<Json<FieldRequest>, JsonRejection> {
        Ok(Json(FieldRequest {
            operation: operation.to_string(),
            field: field.to_string(),
            arguments: match arguments {
                Value::Object(map) => map,
                _ => Arguments::new(),
            },
        }))
    }

    #[tokio::test]
    async fn test_execute_create_then_list() {
        let state = state();

        let (status, Json(body)) = execute(
            state.clone(),
            request("mutation", "create", json!({"text": "Hello world"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["create"]["text"], "Hello world");

        let (status, Json(body)) = execute(state, request("query", "list", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["list"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_reports_errors() {
        let (status, Json(body)) =
            execute(state(), request("mutation", "create", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["type"], "MissingArgument");

        let (status, Json(body)) =
            execute(state(), request("subscription", "list", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["type"], "InvalidArgument");
    }

    #[tokio::test]
    async fn test_execute_missing_quote_is_null_data() {
        let (status, Json(body)) =
            execute(state(), request("query", "quote", json!({"id": 123456}))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"]["quote"].is_null());
    }

    #[test]
    fn test_build_store_imports_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("quotes.json");
        std::fs::write(&path, r#"{"a": {"id": 3, "text": "imported"}}"#).unwrap();

        let config = ServerConfig {
            import_path: Some(path),
            ..ServerConfig::default()
        };
        let (store, report) = build_store(&config);
        assert_eq!(report.map(|r| r.imported), Some(1));
        assert_eq!(store.get(3).map(|q| q.text.as_str()), Some("imported"));
    }

    #[test]
    fn test_build_store_fail_open() {
        let tmp = TempDir::new().unwrap();
        let config = ServerConfig {
            import_path: Some(tmp.path().join("missing.json")),
            ..ServerConfig::default()
        };
        let (store, report) = build_store(&config);
        assert_eq!(report.map(|r| r.success), Some(false));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_serve_rejects_invalid_config() {
        let config = ServerConfig {
            max_id: -5,
            ..ServerConfig::default()
        };
        let err = serve(config).await.unwrap_err();
        assert!(matches!(err, QuoteError::Config(_)));
    }

    #[tokio::test]
    async fn test_run_answers_http() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(run(
            listener,
            Resolvers::new(QuoteStore::new()),
            async move {
                let _ = rx.await;
            },
        ));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /schema HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("type Quote"));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    async fn post_graphql(addr: std::net::SocketAddr, body: &str) -> String {
        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let head = format!(
            "POST /graphql HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).await.unwrap();
        stream.write_all(body.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_bad_request_body_uses_error_envelope() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(run(
            listener,
            Resolvers::new(QuoteStore::new()),
            async move {
                let _ = rx.await;
            },
        ));

        for body in ["{not json", r#"{"operation": "query"}"#] {
            let response = post_graphql(addr, body).await;
            assert!(response.starts_with("HTTP/1.1 400"), "{response}");
            let (_, payload) = response.split_once("\r\n\r\n").unwrap();
            let payload: Value = serde_json::from_str(payload).unwrap();
            assert_eq!(payload["errors"][0]["type"], "InvalidArgument");
            assert!(payload.get("data").is_none());
        }

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
