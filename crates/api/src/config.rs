use crate::auth::jwt::JwtConfig;

/// One entry of the fixed HR credential list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrUser {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret and database URL have defaults suitable
/// for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Accounts allowed to log in as HR.
    pub hr_users: Vec<HrUser>,
    /// Base URL of the survey front end; invite links append their query to it.
    pub public_base_url: String,
    /// Survey sessions idle for longer than this are dropped (default: `3600`).
    pub session_idle_timeout_secs: u64,
    /// Invite link validity in days (default: `14`).
    pub invite_link_ttl_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                   |
    /// |-----------------------------|---------------------------|
    /// | `HOST`                      | `0.0.0.0`                 |
    /// | `PORT`                      | `3000`                    |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                      |
    /// | `HR_USERS`                  | empty (`user:phc;...`)    |
    /// | `PUBLIC_BASE_URL`           | `http://localhost:5173/`  |
    /// | `SESSION_IDLE_TIMEOUT_SECS` | `3600`                    |
    /// | `INVITE_LINK_TTL_DAYS`      | `14`                      |
    ///
    /// JWT settings are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let hr_users = parse_hr_users(&std::env::var("HR_USERS").unwrap_or_default())
            .unwrap_or_else(|e| panic!("Invalid HR_USERS: {e}"));

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173/".into());

        let session_idle_timeout_secs: u64 = std::env::var("SESSION_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_IDLE_TIMEOUT_SECS must be a valid u64");

        let invite_link_ttl_days: i64 = std::env::var("INVITE_LINK_TTL_DAYS")
            .unwrap_or_else(|_| "14".into())
            .parse()
            .expect("INVITE_LINK_TTL_DAYS must be a valid i64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            hr_users,
            public_base_url,
            session_idle_timeout_secs,
            invite_link_ttl_days,
        }
    }

    pub fn find_hr_user(&self, username: &str) -> Option<&HrUser> {
        self.hr_users.iter().find(|u| u.username == username)
    }
}

/// Parse `user:phc;user2:phc`. Empty input yields no users.
pub fn parse_hr_users(raw: &str) -> Result<Vec<HrUser>, String> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (username, hash) = entry
                .split_once(':')
                .ok_or_else(|| format!("entry '{entry}' is not in user:hash form"))?;
            let (username, hash) = (username.trim(), hash.trim());
            if username.is_empty() || hash.is_empty() {
                return Err(format!("entry '{entry}' has an empty user or hash"));
            }
            Ok(HrUser {
                username: username.to_string(),
                password_hash: hash.to_string(),
            })
        })
        .collect()
}
