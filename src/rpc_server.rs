//! Aura keymap RPC server: JSON-RPC over stdin/stdout for the web front-end.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"keymap.dispatch", "params":{"event":{"key":"z","code":"KeyZ","ctrlKey":true}}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use aura_keymap::app::App;
use aura_keymap::rpc_handler::handle_method;

use serde_json::{json, Value};

fn emit(out: &mut impl Write, line: &Value) -> io::Result<()> {
    writeln!(out, "{}", line)?;
    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let app = Mutex::new(App::from_env()?);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, &json!({"event":"ready","version":env!("CARGO_PKG_VERSION")}))?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::warn!("stdin closed: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                emit(&mut out, &json!({"id":null,"error":format!("parse error: {}",e)}))?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params) {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                log::debug!("{} failed: {}", method, err);
                json!({"id": id, "error": err})
            }
        };
        emit(&mut out, &response)?;
    }

    let mut app = app.into_inner().map_err(|e| e.to_string())?;
    if let Err(e) = app.shutdown() {
        log::warn!("Final keymap flush failed: {}", e);
    }
    Ok(())
}
