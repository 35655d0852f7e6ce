use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "gymtracker server")]
pub struct Cli {
    #[clap(long, env, default_value = "gymtracker.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "8080")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    #[arg(long, env, default_value = "http://localhost:3000")]
    pub cors_origin: String,
    #[clap(long, env, default_value = "false")]
    pub secure_sessions: bool,
    #[arg(long, env, default_value = "30")]
    pub session_expiry_days: i64,
    /// How often expired sessions are purged from the database
    #[arg(long, env, default_value = "3600")]
    pub session_cleanup_interval_secs: u64,
    /// bcrypt cost factor, 4 to 31
    #[arg(long, env, default_value_t = bcrypt::DEFAULT_COST)]
    pub password_hash_cost: u32,
    #[arg(long, env, default_value = "1048576")]
    pub max_body_bytes: usize,

    /// Workout generation is disabled when no key is set
    #[arg(long, env)]
    pub openai_api_key: Option<String>,
    #[arg(long, env, default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,
    #[arg(long, env, default_value = "gpt-4o-mini")]
    pub openai_model: String,
    #[arg(long, env, default_value = "0.7")]
    pub openai_temperature: f32,
    #[arg(long, env, default_value = "4000")]
    pub openai_max_tokens: u32,
    #[arg(long, env, default_value = "60")]
    pub openai_timeout_secs: u64,

    /// Deletes the database before starting the main program for debug purposes
    #[arg(long, env, default_value = "false")]
    pub debug_delete_database: bool,
}
