use std::path::PathBuf;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};

use crate::auth::{AuthPayload, PermissionError, PermissionTable, Role, TokenCodec, TokenError};

#[derive(Debug, Parser)]
#[command(name = "blog-api-gateway")]
#[command(about = "REST/JSON gateway in front of the blog gRPC services")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "HTTP port (overrides HTTP_PORT)")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "YAML permission table (overrides PERMISSIONS_FILE)")]
    pub permissions: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP gateway (default)")]
    Serve,

    #[command(about = "Mint a bearer token with the configured secret, for local testing")]
    Token {
        #[arg(long, help = "Subject user id")]
        user_id: i64,

        #[arg(long, value_enum, default_value_t = RoleArg::User)]
        role: RoleArg,

        #[arg(long, default_value_t = 60, help = "Lifetime in minutes")]
        ttl_minutes: i64,
    },

    #[command(about = "Print the effective permission table as YAML")]
    Permissions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

/// Load the permission table from a file when one is given, the built-in
/// policy otherwise.
pub fn load_permissions(path: Option<&std::path::Path>) -> Result<PermissionTable, PermissionError> {
    match path {
        Some(path) => {
            let table = PermissionTable::from_yaml_file(path)?;
            tracing::info!(path = %path.display(), rules = table.len(), "loaded permission table");
            Ok(table)
        }
        None => Ok(PermissionTable::standard()),
    }
}

pub fn mint_token(secret: &str, user_id: i64, role: Role, ttl_minutes: i64) -> Result<String, TokenError> {
    let now = Utc::now();
    TokenCodec::new(secret)?.issue(&AuthPayload {
        subject_id: user_id,
        role,
        issued_at: now,
        expires_at: now + Duration::minutes(ttl_minutes),
    })
}

pub fn render_permissions(table: &PermissionTable) -> Result<String, PermissionError> {
    Ok(serde_yaml::to_string(&table.to_rules())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["blog-api-gateway", "--port", "8080"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.port, Some(8080));
    }

    #[test]
    fn token_subcommand_parses() {
        let cli = Cli::parse_from(["blog-api-gateway", "token", "--user-id", "3", "--role", "admin"]);
        match cli.command {
            Some(Commands::Token { user_id, role, ttl_minutes }) => {
                assert_eq!(user_id, 3);
                assert_eq!(role, RoleArg::Admin);
                assert_eq!(ttl_minutes, 60);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn minted_token_verifies() {
        let token = mint_token("dev-secret", 11, Role::Admin, 5).unwrap();
        let payload = TokenCodec::new("dev-secret").unwrap().verify(&token).unwrap();
        assert_eq!(payload.subject_id, 11);
        assert_eq!(payload.role, Role::Admin);
    }

    #[test]
    fn missing_permissions_file_is_an_error() {
        let err = load_permissions(Some(std::path::Path::new("/nonexistent/permissions.yaml"))).unwrap_err();
        assert!(matches!(err, PermissionError::Io(_)));
    }
}
