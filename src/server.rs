use crate::config::Config;
use crate::error::ApiError;
use crate::openai;
use crate::prompt::Prompt;
use crate::types::CompletionRequest;
use actix_web::http::header::AUTHORIZATION;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, HttpServer};
use log::{debug, error, info};
use serde::Serialize;
use std::future::Future;
use std::net::TcpListener;
use uuid::Uuid;

/// Shared, read-only state handed to every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = openai::build_client(&config)?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionBody {
    pub gpt_response: String,
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("Ok")
}

#[post("/openai")]
pub async fn openai_completion(
    req: HttpRequest,
    body: Result<web::Bytes, actix_web::Error>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let body = match body {
        Ok(b) => b,
        Err(e) if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE => {
            info!("[{}] request rejected: {}", request_id, e);
            return Err(ApiError::PayloadTooLarge);
        }
        Err(e) => {
            error!("[{}] Error: reading request body: {}", request_id, e);
            return Err(ApiError::Internal(e.to_string()));
        }
    };
    // Forwarded verbatim; a missing header becomes an empty credential.
    let credential = req
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.as_bytes())
        .unwrap_or_default();

    match complete(&app_state, credential, &body, request_id).await {
        Ok(text) => {
            info!("[{}] completion ok ({} chars)", request_id, text.len());
            Ok(HttpResponse::Ok().json(CompletionBody { gpt_response: text }))
        }
        Err(ApiError::Internal(detail)) => {
            error!("[{}] Error: {}", request_id, detail);
            Err(ApiError::Internal(detail))
        }
        Err(e) => {
            info!("[{}] request rejected: {}", request_id, e);
            Err(e)
        }
    }
}

async fn complete(
    state: &AppState,
    credential: &[u8],
    body: &[u8],
    request_id: Uuid,
) -> Result<String, ApiError> {
    let request = CompletionRequest::from_slice(body)?;
    let prompt = Prompt::for_request(&request)
        .map_err(|e| ApiError::Internal(format!("rendering prompt: {}", e)))?;
    debug!(
        "[{}] type={} prompt_chars={}",
        request_id,
        request.kind(),
        prompt.user.len()
    );
    openai::chat_completion(&state.client, &state.config, credential, &prompt).await
}

// READMEs ride along in the body, so allow more than actix's 256 KiB default.
const MAX_BODY_BYTES: usize = 4 * 1024 * 1024;

/// Route table, shared by the real server and the test harness.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .service(health)
        .service(openai_completion);
}

pub async fn startup(app_state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind((app_state.config.host.as_str(), app_state.config.port))?;
    run_until(app_state, listener, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    })
    .await
}

/// Serve on `listener` until `shutdown` resolves, then stop gracefully:
/// no new connections are accepted and in-flight requests run to completion.
pub async fn run_until<F>(
    app_state: AppState,
    listener: TcpListener,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()>,
{
    let data = web::Data::new(app_state);

    info!(
        "Starting readme-gpt at {} (upstream {})",
        listener.local_addr()?,
        data.config.completions_url
    );

    let server = HttpServer::new(move || {
        actix_web::App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(data.clone())
            .configure(configure)
    })
    .disable_signals()
    .listen(listener)?
    .run();
    let handle = server.handle();

    tokio::pin!(server);
    tokio::pin!(shutdown);
    tokio::select! {
        res = &mut server => return res,
        _ = &mut shutdown => {}
    }

    // The server future has to keep running to drive the graceful stop.
    let ((), res) = tokio::join!(handle.stop(true), server);
    res
}
