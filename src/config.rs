use std::env;

pub const DEFAULT_GITHUB_USERNAME: &str = "baala-xo";
pub const DEFAULT_GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    // GitHub contribution calendar
    pub github_token: Option<String>,
    pub github_graphql_url: String,
    pub github_default_username: String,
    pub github_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            github_token: env::var("GITHUB_TOKEN").ok().filter(|s| !s.trim().is_empty()),
            github_graphql_url: env::var("GITHUB_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_GRAPHQL_URL.into()),
            github_default_username: env::var("GITHUB_DEFAULT_USERNAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GITHUB_USERNAME.into()),
            github_timeout_secs: env::var("GITHUB_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".into())
                .parse()
                .unwrap_or(10),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/portfolio".into(),
            host: "127.0.0.1".into(),
            port: 8080,
            frontend_url: "http://localhost:3000".into(),
            github_token: None,
            github_graphql_url: DEFAULT_GITHUB_GRAPHQL_URL.into(),
            github_default_username: DEFAULT_GITHUB_USERNAME.into(),
            github_timeout_secs: 10,
        }
    }
}
