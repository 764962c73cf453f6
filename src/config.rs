//! `searchd` configuration.
//!
//! Every option can be given as a flag or through the environment variable
//! named next to it.

use crate::search::handlers::{DEFAULT_SEARCH_LIMIT, SearchSettings};
use clap::Parser;
use std::net::SocketAddr;

#[derive(Debug, Clone, Parser)]
#[command(name = "searchd", about = "In-memory code search service")]
pub struct SearchdConfig {
    /// Listen address. A bare `:port` binds on all interfaces.
    #[arg(long, env = "SEARCHD_ADDR", default_value = "0.0.0.0:8090")]
    pub addr: String,

    /// Results returned by `/search` when the request has no `limit`.
    #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
    pub default_limit: usize,

    /// Documents to index at startup: `{"documents":[...]}`, an array, or one document.
    #[arg(long, env = "SEARCHD_SEED_JSON")]
    pub seed_json: Option<String>,

    /// Index a single demo document at startup when no seed JSON is given.
    /// `0`, `false`, `no`, `off` and an empty value leave it disabled.
    #[arg(
        long,
        env = "SEARCHD_SEED_DEMO",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub seed_demo: bool,
}

impl SearchdConfig {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        parse_listen_addr(&self.addr)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            default_limit: self.default_limit,
        }
    }
}

/// Parses `host:port`, accepting `:port` as shorthand for `0.0.0.0:port`.
pub fn parse_listen_addr(addr: &str) -> anyhow::Result<SocketAddr> {
    let addr = addr.trim();
    let full = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    full.parse()
        .map_err(|e| anyhow::anyhow!("invalid listen address {:?}: {}", addr, e))
}
