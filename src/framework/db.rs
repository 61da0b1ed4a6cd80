use mongodb::{options::ClientOptions, Database};

use super::config::DbConfig;

pub async fn database(config: &DbConfig) -> mongodb::error::Result<Database> {
    let mut options = ClientOptions::parse(config.url()).await?;
    options.app_name = Some("anagram-bot".to_owned());

    let client = mongodb::Client::with_options(options)?;
    Ok(client.database(config.database()))
}
