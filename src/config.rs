use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub jwt_secret: Option<String>,
    pub jwt_public_key: Option<String>,
    pub jwt_issuer: Option<String>,
    pub r2: Option<R2Config>,
    pub run_migrations: bool,
}

/// Object storage for ticket screenshots.
#[derive(Clone, Debug)]
pub struct R2Config {
    pub bucket: String,
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: String,
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenvy::dotenv().ok();

        let r2 = match (
            non_empty("R2_BUCKET"),
            non_empty("R2_ACCOUNT_ID"),
            non_empty("R2_ACCESS_KEY_ID"),
            non_empty("R2_SECRET_ACCESS_KEY"),
        ) {
            (Some(bucket), Some(account_id), Some(access_key_id), Some(secret_access_key)) => {
                Some(R2Config {
                    bucket,
                    account_id,
                    access_key_id,
                    secret_access_key,
                })
            }
            _ => None,
        };

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "50051".to_string())
                .parse()
                .unwrap_or(50051),
            jwt_secret: non_empty("AUTH_JWT_SECRET"),
            jwt_public_key: non_empty("AUTH_JWT_PUBLIC_KEY"),
            jwt_issuer: non_empty("AUTH_JWT_ISSUER"),
            r2,
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
