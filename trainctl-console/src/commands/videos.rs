//! Video listing command

use anyhow::Result;
use trainctl_client::TrainingApi;

use crate::config::Config;
use crate::gallery::Gallery;

pub async fn list(config: &Config, api: &dyn TrainingApi) -> Result<()> {
    let gallery = Gallery::load(api, &config.video_base_path).await;
    println!("{}", gallery.render(&config.server_url));
    Ok(())
}
