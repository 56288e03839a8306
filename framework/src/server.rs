//! HTTP transport loop
//!
//! A thin hyper/tokio front: accept connections, translate each hyper
//! request into a `RequestInfo` (GET and POST dispatch identically; POST
//! form bodies contribute request parameters), hand it to the dispatcher,
//! and write the resulting response. The shared `AppContext` is immutable
//! here, so no locking is involved.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Method;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::app::AppContext;
use crate::http::{parse_pairs, HttpResponse, RequestInfo};

pub struct Server {
    context: Arc<AppContext>,
    host: String,
    port: u16,
}

impl Server {
    pub fn new(context: AppContext) -> Self {
        Self {
            context: Arc::new(context),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }

    pub fn host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = format!("{}:{}", self.host, self.port).parse()?;
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "tinymvc server running");

        let context = self.context;
        loop {
            let (stream, _) = listener.accept().await?;
            let io = TokioIo::new(stream);
            let context = context.clone();

            tokio::spawn(async move {
                let service = service_fn(move |req: hyper::Request<Incoming>| {
                    let context = context.clone();
                    async move { Ok::<_, Infallible>(handle_request(context, req).await) }
                });

                if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                    error!(error = %err, "error serving connection");
                }
            });
        }
    }
}

async fn handle_request(
    context: Arc<AppContext>,
    req: hyper::Request<Incoming>,
) -> hyper::Response<http_body_util::Full<bytes::Bytes>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();

    let response = match method {
        Method::GET | Method::POST => {
            let mut request = RequestInfo::new(method.clone(), path).with_query(&query);
            if method == Method::POST && is_form_urlencoded(&req) {
                request = request.with_params(read_form_params(req).await);
            }
            context.dispatcher().dispatch(&request)
        }
        // Only GET and POST participate in dispatch.
        _ => HttpResponse::text("405 Method Not Allowed").status(405),
    };
    response.into_hyper()
}

fn is_form_urlencoded(req: &hyper::Request<Incoming>) -> bool {
    req.headers()
        .get(hyper::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

async fn read_form_params(req: hyper::Request<Incoming>) -> Vec<(String, String)> {
    match req.into_body().collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            parse_pairs(&String::from_utf8_lossy(&bytes))
        }
        Err(err) => {
            warn!(error = %err, "failed to read request body, ignoring form params");
            Vec::new()
        }
    }
}
