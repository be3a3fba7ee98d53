//! `cloak`: read one query per stdin line, print one JSON report per line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use cloak_assistant::AssistantEngine;
use cloak_core::errors::CloakErrorCode;
use cloak_core::tracing::init_tracing_with_config;
use cloak_core::{CloakConfig, CloakError};
use cloak_session::SessionManager;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    let config = CloakConfig::load(args.config.as_deref()).map_err(|e| e.to_string())?;
    init_tracing_with_config(&config.observability);

    let engine = AssistantEngine::from_config(&config).map_err(|e| e.user_message())?;
    let sessions = SessionManager::new();
    let session = match args.session {
        Some(id) => sessions.get_or_create(&id),
        None => sessions.create_session(),
    };
    tracing::info!(session_id = %session.id(), "session started");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| e.to_string())?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        let output = match engine.run_turn(&session, query) {
            Ok(report) => serde_json::to_string(&report).map_err(|e| e.to_string())?,
            Err(e) => error_json(&e),
        };
        writeln!(stdout, "{output}").map_err(|e| e.to_string())?;
        stdout.flush().map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn error_json(err: &CloakError) -> String {
    serde_json::json!({
        "error": {
            "code": err.error_code(),
            "message": err.user_message(),
        }
    })
    .to_string()
}

#[derive(Debug, Parser)]
#[command(name = "cloak", version, about = "Privacy-preserving search assistant")]
struct Args {
    /// TOML config file; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session id to use; a fresh one is generated when omitted.
    #[arg(long)]
    session: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_config_and_session() {
        let args = Args::try_parse_from(["cloak", "--config", "cloak.toml", "--session", "s-1"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("cloak.toml")));
        assert_eq!(args.session.as_deref(), Some("s-1"));
    }

    #[test]
    fn rejects_unknown_flags_and_missing_values() {
        assert!(Args::try_parse_from(["cloak", "--verbose"]).is_err());
        assert!(Args::try_parse_from(["cloak", "--config"]).is_err());
        let args = Args::try_parse_from(["cloak"]).unwrap();
        assert!(args.config.is_none() && args.session.is_none());
    }
}
