//! Basic usage example

use envset::{EnvRecord, EnvSet};

#[derive(Debug, Default, EnvRecord)]
pub struct Config {
    // Loaded from DATABASE_URL
    #[env(name = "DATABASE_URL")]
    pub database_url: String,

    // Numeric type
    #[env(name = "MAX_CONNECTIONS")]
    pub max_connections: u32,

    // Boolean type: true/false/t/f/1/0 in any case
    #[env(name = "DEBUG_MODE")]
    pub debug_mode: bool,

    // Comma separated list
    #[env(name = "ALLOWED_ORIGINS")]
    pub allowed_origins: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let mut set = EnvSet::from_environ([
        "DATABASE_URL=postgres://localhost/mydb",
        "MAX_CONNECTIONS=10",
        "DEBUG_MODE=1",
        "ALLOWED_ORIGINS=https://a.example,https://b.example",
        "EDITOR=vim",
    ])?;

    let mut config = Config::default();
    envset::unmarshal(&mut set, &mut config)?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Allowed Origins: {:?}", config.allowed_origins);

    println!("Unconsumed variables:");
    for entry in set.to_environ() {
        println!("  {entry}");
    }

    Ok(())
}
