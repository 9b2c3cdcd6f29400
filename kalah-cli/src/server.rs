//! Serve command - run the Kalah HTTP API
//!
//! Flags override `ServerConfig::default()`. `--routes` prints the endpoint
//! table and exits without binding a port.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use kalah_server::{run_server, ServerConfig, API_ROUTES};

#[derive(Args)]
pub struct ServerArgs {
    /// Port to listen on [default: 8002]
    #[arg(long)]
    pub port: Option<u16>,

    /// Front-end files served for non-API paths [default: web]
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Print the API routes and exit
    #[arg(long)]
    pub routes: bool,
}

pub fn run(args: ServerArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let mut out = std::io::stdout();
    write_route_table(&mut out, &config)?;
    if args.routes {
        return Ok(());
    }

    tracing::info!("Serving Kalah on port {}", config.port);
    tokio::runtime::Runtime::new()
        .context("Failed to start the async runtime")?
        .block_on(run_server(config))
}

/// Merge flags over the server defaults. Only a static path that exists but
/// is not a directory is fatal; the API works without static files.
fn resolve_config(args: &ServerArgs) -> Result<ServerConfig> {
    let defaults = ServerConfig::default();
    let static_dir = args
        .static_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&defaults.static_dir));

    if static_dir.is_file() {
        anyhow::bail!("--static-dir points at a file: {}", static_dir.display());
    }
    if !static_dir.exists() {
        tracing::warn!("No front end at {}; serving the API only", static_dir.display());
    }

    Ok(ServerConfig {
        port: args.port.unwrap_or(defaults.port),
        static_dir: static_dir.to_string_lossy().into_owned(),
    })
}

fn write_route_table<W: Write>(out: &mut W, config: &ServerConfig) -> Result<()> {
    writeln!(out, "Kalah API on http://localhost:{}", config.port)?;
    for route in API_ROUTES {
        writeln!(out, "  {:<5} {:<24} {}", route.method, route.path, route.summary)?;
    }
    writeln!(out, "  other paths: files from {}", config.static_dir)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(port: Option<u16>, static_dir: Option<&str>) -> ServerArgs {
        ServerArgs {
            port,
            static_dir: static_dir.map(PathBuf::from),
            routes: true,
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = resolve_config(&args(None, Some("/nonexistent/front-end"))).unwrap();
        assert_eq!(config.port, ServerConfig::default().port);
        assert_eq!(config.static_dir, "/nonexistent/front-end");

        let config = resolve_config(&args(Some(9000), None)).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.static_dir, ServerConfig::default().static_dir);
    }

    #[test]
    fn test_static_dir_cannot_be_a_file() {
        assert!(resolve_config(&args(None, Some("Cargo.toml"))).is_err());
    }

    #[test]
    fn test_route_table_lists_every_route() {
        let config = resolve_config(&args(Some(8100), Some("/nonexistent"))).unwrap();
        let mut out = Vec::new();
        write_route_table(&mut out, &config).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Kalah API on http://localhost:8100"));
        for route in API_ROUTES {
            assert!(text.contains(route.path), "missing {}", route.path);
        }
    }

    #[test]
    fn test_routes_flag_returns_without_serving() {
        assert!(run(args(Some(8101), Some("/nonexistent"))).is_ok());
    }
}
