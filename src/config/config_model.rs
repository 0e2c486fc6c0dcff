#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub auth: Auth,
    pub seed: Seed,
}

#[derive(Debug, Clone)]
pub struct Server {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct Auth {
    pub jwt_secret: String,
    pub jwt_expires_in_days: i64,
    pub dev_access_key: Option<String>,
    pub owner_email: Option<String>,
}

/// Accounts created on an empty store at startup.
#[derive(Debug, Clone)]
pub struct Seed {
    pub admin_email: String,
    pub admin_password: String,
}
