//! Command-line and environment configuration

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use crate::auth::{Authorizer, StaticCredentials};
use crate::db::pool::DEFAULT_MAX_CONNECTIONS;
use crate::http::ServerConfig;

/// Arguments for the server binary
#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-server", version, about = "Product and user records over HTTP")]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "CATALOG_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://catalog.db")]
    pub database_url: String,

    /// Maximum pooled connections
    #[arg(long, env = "CATALOG_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Username accepted by the clear-all endpoints
    #[arg(long, env = "CATALOG_ADMIN_USERNAME", default_value = "admin")]
    pub admin_username: String,

    /// Password accepted by the clear-all endpoints
    #[arg(long, env = "CATALOG_ADMIN_PASSWORD", default_value = "admin", hide_env_values = true)]
    pub admin_password: String,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
        }
    }

    pub fn authorizer(&self) -> Arc<dyn Authorizer> {
        Arc::new(StaticCredentials::new(
            self.admin_username.clone(),
            self.admin_password.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Caller, Decision};

    #[test]
    fn defaults() {
        let args = ServeArgs::try_parse_from(["catalog-server"]).unwrap();
        assert_eq!(args.bind.port(), 8000);
        assert_eq!(args.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(!args.server_config().cors_permissive);
    }

    #[test]
    fn flags_override() {
        let args = ServeArgs::try_parse_from([
            "catalog-server",
            "--bind",
            "0.0.0.0:9000",
            "--admin-username",
            "ops",
            "--admin-password",
            "pw",
            "--cors-permissive",
        ])
        .unwrap();

        assert_eq!(args.server_config().bind_addr.port(), 9000);
        assert!(args.server_config().cors_permissive);

        let caller = Caller::Basic {
            username: "ops".into(),
            password: "pw".into(),
        };
        assert_eq!(args.authorizer().authorize(&caller), Decision::Allowed);
    }
}
