//! Bandwidth MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. Logs go to stderr so stdout
//! carries protocol traffic only.
//!
//! Tools:
//! - convert: Convert a value into every unit
//! - list_units: List units with labels and fractional admissibility
//! - edit: Edit a field of the server-held session
//! - set_precision: Change session precision and recompute
//! - reset: Clear every session field
//! - report: Plain-text summary of the session fields

mod config;
mod tools;

use std::io::{self, BufRead, Write};
use bandwidth_units::Session;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use config::{Config, DEFAULT_LOG_FILTER};

const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "bandwidth";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
struct McpRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct McpResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub(crate) struct McpError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl McpError {
    pub(crate) fn parse_error(message: impl Into<String>) -> Self {
        McpError { code: -32700, message: message.into(), data: None }
    }

    pub(crate) fn method_not_found(method: &str) -> Self {
        McpError { code: -32601, message: format!("Method not found: {}", method), data: None }
    }

    pub(crate) fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: -32602, message: message.into(), data: None }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();

    let config = Config::from_env();
    let mut session = Session::with_precision(config.precision);

    info!(precision = %config.precision, "{} {} ready, waiting for requests", SERVER_NAME, SERVER_VERSION);

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let Some(response) = handle_line(&mut session, line) else {
                    continue;
                };

                if let Err(e) = write_response(&response) {
                    error!("error writing response: {}", e);
                    break;
                }
            }
            Err(e) => {
                error!("error reading input: {}", e);
                break;
            }
        }
    }

    info!("server shutting down");
}

/// Handle one request line. Notifications (no id) get no response.
fn handle_line(session: &mut Session, line: &str) -> Option<McpResponse> {
    debug!(bytes = line.len(), "received");

    let request = match serde_json::from_str::<McpRequest>(line) {
        Ok(r) => r,
        Err(e) => {
            warn!("error parsing request: {}", e);
            return Some(McpResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(McpError::parse_error(format!("Parse error: {}", e))),
            });
        }
    };

    debug!(method = %request.method, "processing");
    let response = handle_request(session, &request);

    if request.id.is_none() {
        debug!(method = %request.method, "notification processed");
        return None;
    }

    Some(response)
}

fn write_response(response: &McpResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", response_json)?;
    stdout.flush()
}

fn handle_request(session: &mut Session, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(&request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => Ok(tools::list()),
        "tools/call" => handle_tool_call(session, &request.params),

        _ => Err(McpError::method_not_found(&request.method)),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Bandwidth unit converter (bit/s through PB/s)"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Convert data rates between bit and byte units with decimal prefixes. Use 'convert' for one-off conversions or 'edit' to drive a session that keeps precision between calls."
    }))
}

fn handle_tool_call(session: &mut Session, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tools::convert(session, &args),
        "list_units" => Ok(tools::list_units()),
        "edit" => tools::edit(session, &args),
        "set_precision" => tools::set_precision(session, &args),
        "reset" => Ok(tools::reset(session)),
        "report" => Ok(tools::report(session)),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}
