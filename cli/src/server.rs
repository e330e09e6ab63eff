//! HTTP API over a single judge session.
//!
//! Every route answers with the `{status, msg, ...}` envelope. Logical errors
//! use HTTP 200 unless strict status codes are enabled. Handler panics become
//! a 500 envelope and never take the server down.

use std::{collections::HashMap, future::Future, panic::AssertUnwindSafe, sync::Arc};

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use futures_util::FutureExt as _; // catch_unwind on async blocks
use ojspider_webclient::{
    open_scraper, ClientOptions, Credentials, Envelope, Error, ErrorKind, IntoPayload, Launcher,
    Scraper,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::Mutex};

pub const NOT_FOUND_MSG: &str = "not found";
pub const INTERNAL_ERROR_MSG: &str = "internal server error";

/// Shared by every handler. The scraper slot is locked for a whole
/// navigate-and-extract cycle, so requests touching the browser run one at a time.
#[derive(Clone)]
pub struct AppState {
    launcher: Arc<dyn Launcher>,
    options: Arc<ClientOptions>,
    scraper: Arc<Mutex<Option<Scraper>>>,
    strict_status_codes: bool,
}

impl AppState {
    pub fn new(launcher: Arc<dyn Launcher>, options: ClientOptions) -> Self {
        Self {
            launcher,
            options: Arc::new(options),
            scraper: Arc::default(),
            strict_status_codes: false,
        }
    }

    pub fn strict_status_codes(mut self, strict: bool) -> Self {
        self.strict_status_codes = strict;
        self
    }

    pub async fn is_logged_in(&self) -> bool {
        self.scraper.lock().await.is_some()
    }

    /// Shuts down the current session, if any.
    pub async fn close(&self) {
        let scraper = self.scraper.lock().await.take();
        if let Some(mut scraper) = scraper {
            match scraper.shutdown().await {
                Ok(()) => log::info!("Session for {:?} closed", scraper.session().username()),
                Err(e) => log::warn!("Failed to close the browser: {}", e),
            }
        }
    }

    fn respond(&self, reply: Reply) -> Response {
        let code = match reply.kind {
            Some(kind) if self.strict_status_codes => status_code_of(kind),
            _ => StatusCode::OK,
        };
        (code, Json(reply.envelope)).into_response()
    }

    /// Runs one operation, turning its result into a reply and a panic into a 500.
    async fn run<F, T>(&self, what: &str, op: F) -> Response
    where
        F: Future<Output = ojspider_webclient::Result<T>>,
        T: IntoPayload,
    {
        match AssertUnwindSafe(op).catch_unwind().await {
            Ok(res) => {
                if let Err(e) = &res {
                    log::info!("{} failed: {}", what, e);
                }
                self.respond(Reply::from(res))
            }
            Err(panic_payload) => {
                let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                    *s
                } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                    s.as_str()
                } else {
                    "panic"
                };
                log::error!("{} panicked: {}", what, msg);
                internal_error()
            }
        }
    }
}

/// Envelope plus the error kind it came from, for strict status codes.
struct Reply {
    envelope: Envelope,
    kind: Option<ErrorKind>,
}

impl Reply {
    fn invalid(msg: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::error(msg),
            kind: Some(ErrorKind::Validation),
        }
    }
}

impl<T: IntoPayload> From<ojspider_webclient::Result<T>> for Reply {
    fn from(res: ojspider_webclient::Result<T>) -> Self {
        let kind = res.as_ref().err().map(Error::kind);
        Self {
            envelope: Envelope::from(res),
            kind,
        }
    }
}

pub fn status_code_of(kind: ErrorKind) -> StatusCode {
    use ErrorKind::*;
    match kind {
        Validation => StatusCode::BAD_REQUEST,
        Unauthenticated => StatusCode::UNAUTHORIZED,
        ElementNotFound | EmptyResult => StatusCode::NOT_FOUND,
        Timeout => StatusCode::GATEWAY_TIMEOUT,
        Network | Malformed => StatusCode::BAD_GATEWAY,
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::error(INTERNAL_ERROR_MSG)),
    )
        .into_response()
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(Envelope::error(NOT_FOUND_MSG))).into_response()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/problems/get", get(get_problems))
        .route("/problems/get/{pid}", get(get_problem))
        .route("/problems/submit/{pid}", post(submit))
        .route("/problems/status/{pid}", get(get_status))
        .fallback(not_found)
        .with_state(state)
}

/// Serves until `shutdown` resolves, then closes the session.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        log::info!("Listening on http://{}", addr);
    }
    let res = axum::serve(listener, router(state.clone()))
        .with_graceful_shutdown(shutdown)
        .await;
    state.close().await;
    res
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn login(
    State(st): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Response {
    let LoginBody { username, password } = match body {
        Ok(Json(b)) => b,
        Err(rej) => return st.respond(Reply::invalid(rej.body_text())),
    };

    st.run("login", async {
        // a bad request leaves the current session alone
        let cred = Credentials::new(username, password);
        cred.validate()?;

        let mut slot = st.scraper.lock().await;
        if let Some(mut old) = slot.take() {
            log::info!("Replacing session of {:?}", old.session().username());
            if let Err(e) = old.shutdown().await {
                log::warn!("Failed to close the previous browser: {}", e);
            }
        }

        let mut scraper =
            open_scraper(st.launcher.as_ref(), cred, st.options.as_ref().clone()).await?;
        if let Err(e) = scraper.login().await {
            if let Err(close_err) = scraper.shutdown().await {
                log::warn!("Failed to close the browser: {}", close_err);
            }
            return Err(e);
        }
        *slot = Some(scraper);
        Ok(())
    })
    .await
}

async fn logout(State(st): State<AppState>) -> Response {
    st.run("logout", async {
        st.close().await;
        Ok(())
    })
    .await
}

#[derive(Debug, Deserialize)]
struct PageBody {
    page: i64,
}

/// `{page}` comes from the JSON body; `?page=` is accepted when the body is empty.
fn page_of(body: &Bytes, query: &HashMap<String, String>) -> Result<i64, Reply> {
    if !body.is_empty() {
        return serde_json::from_slice::<PageBody>(body)
            .map(|b| b.page)
            .map_err(|e| Reply::invalid(format!("Failed to parse the request body: {}", e)));
    }
    match query.get("page") {
        Some(p) => p
            .trim()
            .parse()
            .map_err(|_| Reply::invalid(format!("Invalid page number {:?}", p))),
        None => Err(Reply::invalid("page is required")),
    }
}

async fn get_problems(
    State(st): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let page = match page_of(&body, &query) {
        Ok(p) => p,
        Err(reply) => return st.respond(reply),
    };

    st.run("get_problems", async {
        let slot = st.scraper.lock().await;
        let scraper = slot.as_ref().ok_or(Error::NotLoggedIn)?;
        scraper.get_problems(page).await
    })
    .await
}

async fn get_problem(
    State(st): State<AppState>,
    pid: Result<Path<u64>, PathRejection>,
) -> Response {
    let Ok(Path(pid)) = pid else {
        return not_found().await;
    };

    st.run("get_problem", async {
        let slot = st.scraper.lock().await;
        let scraper = slot.as_ref().ok_or(Error::NotLoggedIn)?;
        scraper.get_problem(&pid.to_string()).await
    })
    .await
}

#[derive(Debug, Deserialize)]
struct SubmitBody {
    ans: String,
}

async fn submit(
    State(st): State<AppState>,
    pid: Result<Path<u64>, PathRejection>,
    body: Result<Json<SubmitBody>, JsonRejection>,
) -> Response {
    let Ok(Path(pid)) = pid else {
        return not_found().await;
    };
    let SubmitBody { ans } = match body {
        Ok(Json(b)) => b,
        Err(rej) => return st.respond(Reply::invalid(rej.body_text())),
    };

    st.run("submit", async {
        let slot = st.scraper.lock().await;
        let scraper = slot.as_ref().ok_or(Error::NotLoggedIn)?;
        scraper.submit(&pid.to_string(), &ans).await
    })
    .await
}

async fn get_status(
    State(st): State<AppState>,
    pid: Result<Path<u64>, PathRejection>,
) -> Response {
    let Ok(Path(pid)) = pid else {
        return not_found().await;
    };

    st.run("get_status", async {
        let slot = st.scraper.lock().await;
        let scraper = slot.as_ref().ok_or(Error::NotLoggedIn)?;
        scraper.get_status(&pid.to_string()).await
    })
    .await
}
