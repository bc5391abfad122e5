/// Link service configuration loaded from environment variables.
#[derive(Debug)]
pub struct LinkConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for validating web-session JWTs (shared with the session issuer).
    pub jwt_secret: String,
    /// TCP port to listen on (default 3113). Env var: `LINK_PORT`.
    pub link_port: u16,
    /// Seconds between expired-code sweeps (default 300). Env var: `SWEEP_INTERVAL_SECS`.
    pub sweep_interval_secs: u64,
}

impl LinkConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            link_port: std::env::var("LINK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3113),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}
