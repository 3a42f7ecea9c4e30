mod config;
mod scrape;

use config::Config;
use dotenv::dotenv;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    let storage = config.storage();
    match scrape::scrape(&config, &storage).await {
        Ok(count) => log::info!("Finished, {} job postings pushed", count),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
