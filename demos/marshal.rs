//! Render a record back into environment variables

use envset::EnvRecord;

#[derive(Debug, EnvRecord)]
pub struct Config {
    #[env(name = "LISTEN_PORT")]
    pub port: u16,

    #[env(name = "WORKER_IDS")]
    pub worker_ids: Vec<i64>,

    // Skipped when None
    #[env(name = "LOG_FILE")]
    pub log_file: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let config = Config {
        port: 8080,
        worker_ids: vec![1, 2, 3],
        log_file: None,
    };

    let set = envset::marshal(&config)?;
    for entry in set.to_environ() {
        println!("{entry}");
    }

    // The set serializes as a flat JSON object
    println!("{}", serde_json::to_string_pretty(&set)?);

    Ok(())
}
