//! Startup configuration, resolved once from the process environment.

use std::env;
use std::net::{Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BODY_LIMIT: usize = 100 * 1024;
pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost";
pub const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Immutable gateway configuration. Built at startup and never mutated.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub port: u16,
    pub environment: Environment,
    pub allowed_origins: AllowList,
    pub body_limit: usize,
}

impl GatewayConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Unset and empty variables fall back to their defaults. Values that are
    /// present but unparsable also fall back, with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or_default(var("PORT"), "PORT", DEFAULT_PORT);
        let body_limit = parse_or_default(
            var("JSON_BODY_LIMIT"),
            "JSON_BODY_LIMIT",
            DEFAULT_BODY_LIMIT,
        );

        let environment = Environment::new(
            var("NODE_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string()),
        );
        let allowed_origins = AllowList::resolve(&environment, var("FRONTEND_URL").as_deref());

        Self {
            port,
            environment,
            allowed_origins,
            body_limit,
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Base URL of the delegated API as announced in the startup banner.
    pub fn api_base_url(&self) -> String {
        format!("http://localhost:{}/api", self.port)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or_default<T: std::str::FromStr + Copy>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "unparsable value, using default");
            default
        }),
        None => default,
    }
}

/// Deployment environment tag, e.g. `production` or `development`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment(String);

impl Environment {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn is_production(&self) -> bool {
        self.0 == "production"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Origins that receive CORS headers. Compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList(Vec<String>);

impl AllowList {
    /// Production trusts the single frontend origin; every other environment
    /// trusts the two local development servers.
    pub fn resolve(environment: &Environment, frontend_url: Option<&str>) -> Self {
        if environment.is_production() {
            let origin = frontend_url
                .filter(|url| !url.is_empty())
                .unwrap_or(DEFAULT_FRONTEND_URL);
            Self(vec![origin.to_string()])
        } else {
            Self(DEV_ORIGINS.iter().map(|o| o.to_string()).collect())
        }
    }

    pub fn contains(&self, origin: &[u8]) -> bool {
        self.0.iter().any(|allowed| allowed.as_bytes() == origin)
    }

    pub fn origins(&self) -> &[String] {
        &self.0
    }
}

/// Log output format, read from `LOG_FORMAT` before anything else is
/// resolved so that configuration warnings are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        env::var("LOG_FORMAT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unsupported log format: {other}")),
        }
    }
}
