//! Local preview server.
//!
//! | Route              | Response                                            |
//! |--------------------|-----------------------------------------------------|
//! | `/`                | source form                                         |
//! | `/preview?src=…`   | viewer page; refreshes every second while loading   |
//! | `/svg?src=…`       | `200 image/svg+xml`, or `204` when nothing to show  |
//!
//! `/preview` drives one shared [`Viewer`], so the most recent source wins
//! and repeating it does not fetch again.

mod lifecycle;
mod response;

pub use lifecycle::setup_shutdown_handler;

use crate::{
    config::{KolamConfig, cfg},
    debug, log,
    source::{self, HttpFetcher},
    svg::AnimateOptions,
    viewer::{Viewer, markup},
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tiny_http::{Method, Request, Server};
use tokio::runtime::{Handle, Runtime};
use url::Url;

/// Seconds between self-refreshes of a loading preview page.
const LOADING_REFRESH_SECS: u32 = 1;

/// How long `/preview` waits for a load before answering with the spinner.
const PREVIEW_WAIT: Duration = Duration::from_millis(500);

/// Shared state of the request handlers.
pub struct App {
    viewer: Viewer<HttpFetcher>,
    fetcher: HttpFetcher,
    base: Option<Url>,
    options: AnimateOptions,
    runtime: Handle,
}

impl App {
    pub fn new(
        fetcher: HttpFetcher,
        base: Option<Url>,
        options: AnimateOptions,
        runtime: Handle,
    ) -> Self {
        let viewer = Viewer::new(fetcher.clone(), base.clone(), options.clone(), runtime.clone());
        Self {
            viewer,
            fetcher,
            base,
            options,
            runtime,
        }
    }

    fn from_config(config: &KolamConfig, runtime: Handle) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.source.timeout())?;
        Ok(Self::new(
            fetcher,
            config.source.base_url(),
            config.animate.options(),
            runtime,
        ))
    }
}

/// Bind the server and handle requests until Ctrl+C.
pub fn serve(runtime: &Runtime) -> Result<()> {
    let config = cfg();
    let app = Arc::new(App::from_config(&config, runtime.handle().clone())?);

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    lifecycle::register_server(Arc::clone(&server));

    match &app.base {
        Some(base) => log!("serve"; "http://{} (sources relative to {})", addr, base),
        None => log!("serve"; "http://{} (no base URL, absolute sources only)", addr),
    }

    run_request_loop(&server, &app);
    Ok(())
}

/// Dispatch requests onto the runtime's blocking pool until the server is
/// unblocked.
fn run_request_loop(server: &Server, app: &Arc<App>) {
    for request in server.incoming_requests() {
        let app = Arc::clone(app);
        app.runtime.clone().spawn_blocking(move || {
            if let Err(e) = handle_request(request, &app) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    debug!("serve"; "request loop stopped");
}

/// Parsed request target.
#[derive(Debug, PartialEq, Eq)]
struct Target {
    path: String,
    src: Option<String>,
}

impl Target {
    fn parse(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let src = url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "src")
            .map(|(_, value)| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self {
            path: path.to_string(),
            src,
        }
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, app: &App) -> Result<()> {
    if lifecycle::is_shutdown() {
        return response::respond_unavailable(request);
    }
    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_method_not_allowed(request);
    }

    let target = Target::parse(request.url());
    debug!("serve"; "{} {}", request.method(), request.url());

    match target.path.as_str() {
        "/" => response::respond_html(request, 200, index_page(None)),
        "/preview" => respond_preview(request, app, target.src),
        "/svg" => respond_svg(request, app, target.src),
        _ => response::respond_not_found(request),
    }
}

fn index_page(src: Option<&str>) -> String {
    markup::page("kolam preview", &markup::source_form(src), None)
}

fn respond_preview(request: Request, app: &App, src: Option<String>) -> Result<()> {
    let Some(src) = src else {
        return response::respond_html(request, 200, index_page(None));
    };

    app.viewer.show(&src);
    let state = app
        .runtime
        .block_on(async { tokio::time::timeout(PREVIEW_WAIT, app.viewer.settled()).await })
        .unwrap_or_else(|_| app.viewer.state());
    let refresh = state.is_loading().then_some(LOADING_REFRESH_SECS);

    let body = format!(
        "{}\n{}",
        markup::source_form(Some(&src)),
        markup::fragment(&state)
    );
    response::respond_html(request, 200, markup::page(&src, &body, refresh))
}

fn respond_svg(request: Request, app: &App, src: Option<String>) -> Result<()> {
    let Some(src) = src else {
        return response::respond_bad_request(request, "missing `src` query parameter");
    };

    let result = app.runtime.block_on(source::load(
        &app.fetcher,
        &src,
        app.base.as_ref(),
        &app.options,
    ));

    match result {
        Ok(Some(markup)) => response::respond_svg(request, markup),
        Ok(None) => {
            log!("serve"; "{}: no <svg> element", src);
            response::respond_no_content(request)
        }
        Err(e) => {
            log!("error"; "{}: {}", src, e);
            response::respond_no_content(request)
        }
    }
}
