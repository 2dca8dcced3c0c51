//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::helpers::{decode_path, encode_path};
use crate::commands::generate::rebuild_on_change;
use crate::Quill;

/// Live reload script injected into HTML pages
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
})();
</script>
</body>
"#;

struct ServerState {
    public_dir: PathBuf,
    path_prefix: String,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Start the development server
pub async fn start(quill: &Quill, ip: &str, port: u16, watch: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: quill.public_dir.clone(),
        path_prefix: quill.config.path_prefix.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route("/__livereload", get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(state);

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!(
        "Server running at http://{}:{}{}/",
        ip,
        port,
        quill.config.path_prefix
    );
    if watch {
        tracing::info!("Live reload enabled. Watching for changes...");
    }

    if watch {
        let quill = quill.clone();
        // The debouncer blocks on a std channel, so keep it off the runtime threads
        tokio::task::spawn_blocking(move || {
            let reload = || {
                let _ = reload_tx.send(());
            };
            if let Err(e) = rebuild_on_change(&quill, reload) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| handle_livereload_socket(socket, reload_rx))
}

async fn handle_livereload_socket(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            result = reload_rx.recv() => {
                match result {
                    Ok(_) => {
                        if socket.send(Message::Text("reload".to_string())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve files from the public directory under the path prefix
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some(site_path) = request_site_path(request.uri().path(), &state.path_prefix) else {
        return not_found(&state).await;
    };

    let file_path = resolve(&state.public_dir, &site_path);
    let Some(file_path) = file_path else {
        return not_found(&state).await;
    };

    let is_html = file_path
        .extension()
        .is_some_and(|ext| ext == "html" || ext == "htm");

    if is_html {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(finish_html(&state, content)).into_response(),
            Err(_) => not_found(&state).await,
        }
    } else {
        let relative = file_path
            .strip_prefix(&state.public_dir)
            .unwrap_or(&file_path)
            .to_string_lossy()
            .replace('\\', "/");
        let uri = format!("/{}", encode_path(&relative));
        let request = match Request::builder().uri(uri).body(Body::empty()) {
            Ok(request) => request,
            Err(_) => return (StatusCode::BAD_REQUEST, "Bad request").into_response(),
        };
        let mut service = ServeDir::new(&state.public_dir);
        match service.try_call(request).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// The generated 404 page, or a plain one if the site has none
async fn not_found(state: &ServerState) -> Response {
    match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
        Ok(content) => (StatusCode::NOT_FOUND, Html(finish_html(state, content))).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn finish_html(state: &ServerState, html: String) -> String {
    if state.live_reload {
        inject_live_reload(&html)
    } else {
        html
    }
}

/// Map a request path onto the site, `None` when it is outside the prefix
fn strip_prefix(path: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() {
        return Some(path.to_string());
    }
    let rest = path.strip_prefix(prefix)?;
    match rest {
        "" => Some("/".to_string()),
        r if r.starts_with('/') => Some(r.to_string()),
        _ => None,
    }
}

/// The decoded site path a request addresses
fn request_site_path(request_path: &str, prefix: &str) -> Option<String> {
    strip_prefix(request_path, prefix).map(|path| decode_path(&path))
}

/// Find the file serving a site path
fn resolve(public_dir: &Path, site_path: &str) -> Option<PathBuf> {
    let clean: PathBuf = Path::new(site_path)
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    let candidate = public_dir.join(&clean);

    if candidate.is_dir() {
        let index = candidate.join("index.html");
        return index.exists().then_some(index);
    }
    if candidate.is_file() {
        return Some(candidate);
    }
    let with_html = candidate.with_extension("html");
    with_html.is_file().then_some(with_html)
}

/// Inject live reload script into HTML content
fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("/a/", "").as_deref(), Some("/a/"));
        assert_eq!(strip_prefix("/blog", "/blog").as_deref(), Some("/"));
        assert_eq!(strip_prefix("/blog/a/", "/blog").as_deref(), Some("/a/"));
        assert_eq!(strip_prefix("/blogger/", "/blog"), None);
        assert_eq!(strip_prefix("/other/", "/blog"), None);
    }

    #[test]
    fn test_resolve() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("hello")).unwrap();
        std::fs::write(dir.path().join("hello/index.html"), "x").unwrap();
        std::fs::write(dir.path().join("index.html"), "x").unwrap();
        std::fs::write(dir.path().join("404.html"), "x").unwrap();

        assert_eq!(resolve(dir.path(), "/"), Some(dir.path().join("index.html")));
        assert_eq!(
            resolve(dir.path(), "/hello/"),
            Some(dir.path().join("hello/index.html"))
        );
        assert_eq!(resolve(dir.path(), "/404"), Some(dir.path().join("404.html")));
        assert_eq!(resolve(dir.path(), "/../etc/passwd"), None);
    }

    #[test]
    fn test_resolve_encoded_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("my post")).unwrap();
        std::fs::write(dir.path().join("my post/index.html"), "x").unwrap();

        let path = request_site_path("/my%20post/", "").unwrap();
        assert_eq!(path, "/my post/");
        assert_eq!(
            resolve(dir.path(), &path),
            Some(dir.path().join("my post/index.html"))
        );
        assert_eq!(
            request_site_path("/blog/my%20post/", "/blog").as_deref(),
            Some("/my post/")
        );
    }

    #[test]
    fn test_inject_live_reload() {
        let html = inject_live_reload("<html><body><p>x</p></body></html>");
        assert!(html.contains("__livereload"));
        assert!(html.ends_with("</html>"));
    }
}
