//! The HTTP surface: `POST /convert` with CORS enabled.

use std::{
    io::{Cursor, Read},
    sync::Arc,
    thread,
};

use anyhow::Context;
use serde::Deserialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::config::ServerConfig;
use crate::convert::Converter;

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

#[derive(Debug, Deserialize)]
struct ConvertRequest {
    text: String,
}

#[derive(Debug)]
pub(crate) enum Body {
    Complete(Vec<u8>),
    TooLarge,
}

fn read_body(reader: &mut dyn Read, limit: usize) -> std::io::Result<Body> {
    let mut buffer = Vec::new();
    reader.take(limit as u64 + 1).read_to_end(&mut buffer)?;
    if buffer.len() > limit {
        Ok(Body::TooLarge)
    } else {
        Ok(Body::Complete(buffer))
    }
}

/// A response before it is turned into bytes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reply {
    pub(crate) status: u16,
    pub(crate) body: String,
    pub(crate) json: bool,
}

impl Reply {
    fn json(status: u16, body: String) -> Self {
        Self {
            status,
            body,
            json: true,
        }
    }

    fn error(status: u16, message: impl std::fmt::Display) -> Self {
        Self::json(
            status,
            serde_json::json!({ "error": message.to_string() }).to_string(),
        )
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            json: false,
        }
    }

    pub(crate) fn headers(&self) -> Vec<(&'static str, &'static str)> {
        let mut headers = CORS_HEADERS.to_vec();
        if self.json {
            headers.push(("Content-Type", "application/json"));
        }
        headers
    }

    fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let headers = self.headers();
        let mut response =
            Response::from_string(self.body).with_status_code(StatusCode(self.status));
        for (field, value) in headers {
            if let Ok(header) = Header::from_bytes(field, value) {
                response.add_header(header);
            }
        }
        response
    }
}

fn convert(converter: &Converter, body: &Body) -> Reply {
    let bytes = match body {
        Body::Complete(bytes) => bytes,
        Body::TooLarge => return Reply::error(413, "request body too large"),
    };
    let request: ConvertRequest = match serde_json::from_slice(bytes) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("rejecting request: {e}");
            return Reply::error(400, "invalid request");
        }
    };
    match converter.convert(&request.text) {
        Ok(result) => match serde_json::to_string(&result) {
            Ok(body) => Reply::json(200, body),
            Err(e) => Reply::error(500, e),
        },
        Err(e) => {
            log::error!("{e}");
            Reply::error(503, e)
        }
    }
}

/// Decides the reply for one request.
pub(crate) fn route(converter: &Converter, method: &Method, url: &str, body: &Body) -> Reply {
    let path = url.split('?').next().unwrap_or_default();
    match (method, path) {
        (Method::Options, _) => Reply::empty(200),
        (Method::Post, "/convert") => convert(converter, body),
        (_, "/convert") => Reply::error(405, "method not allowed"),
        _ => Reply::error(404, "not found"),
    }
}

fn handle(converter: &Converter, max_body_bytes: usize, mut request: Request) {
    let reply = match read_body(request.as_reader(), max_body_bytes) {
        Ok(body) => route(converter, request.method(), request.url(), &body),
        Err(e) => Reply::error(400, format!("could not read request body: {e}")),
    };
    log::debug!("{} {} -> {}", request.method(), request.url(), reply.status);
    if let Err(e) = request.respond(reply.into_response()) {
        log::error!("could not send response: {e}");
    }
}

/// Runs the HTTP server until every worker thread has stopped.
pub fn serve(converter: Arc<Converter>, config: &ServerConfig) -> anyhow::Result<()> {
    let address = config.address();
    let server = tiny_http::Server::http(address.as_str())
        .map_err(|e| anyhow::anyhow!("could not bind to {address}: {e}"))?;
    let server = Arc::new(server);
    log::info!("Server starting on {address}");

    let workers = config.workers.max(1);
    let max_body_bytes = config.max_body_bytes;
    let handles = (0..workers)
        .map(|id| {
            let server = Arc::clone(&server);
            let converter = Arc::clone(&converter);
            thread::Builder::new()
                .name(format!("http-worker-{id}"))
                .spawn(move || {
                    for request in server.incoming_requests() {
                        handle(&converter, max_body_bytes, request);
                    }
                })
                .with_context(|| format!("could not spawn worker {id}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    for handle in handles {
        if handle.join().is_err() {
            anyhow::bail!("a worker thread panicked");
        }
    }
    Ok(())
}
