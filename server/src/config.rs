use dotenv::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,

    // WebSocket notification port
    pub notify_port: u16,

    // Database configuration
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("SERVER_PORT must be a valid port number");

        let notify_port = env::var("NOTIFY_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .expect("NOTIFY_PORT must be a valid port number");

        // mode=rwc so a first run creates the database file
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://orders.db?mode=rwc".to_string());

        Config {
            server_host,
            server_port,
            notify_port,
            database_url,
        }
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn notify_address(&self) -> String {
        format!("{}:{}", self.server_host, self.notify_port)
    }
}
