//! Nested records read from the process environment

use envset::EnvRecord;

#[derive(Debug, Default, EnvRecord)]
pub struct Database {
    #[env(name = "DB_HOST")]
    pub host: String,

    #[env(name = "DB_PORT")]
    pub port: u16,
}

#[derive(Debug, Default, EnvRecord)]
pub struct Config {
    #[env(name = "SERVICE_NAME")]
    pub service_name: String,

    // Walked recursively, sharing the same set of variables
    #[env(nested)]
    pub database: Database,

    // Only walked when present
    #[env(nested)]
    pub replica: Option<Database>,
}

fn main() -> anyhow::Result<()> {
    // Set environment variables for demonstration
    std::env::set_var("SERVICE_NAME", "billing");
    std::env::set_var("DB_HOST", "db.internal");
    std::env::set_var("DB_PORT", "5432");

    let mut config = Config::default();
    let rest = envset::unmarshal_from_environment(&mut config)?;

    println!("{config:#?}");
    println!("{} variables left unconsumed", rest.len());

    Ok(())
}
