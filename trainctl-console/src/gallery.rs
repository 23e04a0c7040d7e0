//! Video gallery
//!
//! Turns the `/videos` listing into something printable. An empty listing
//! and a failed load each get an explicit message so the gallery is never
//! just blank.

use colored::*;
use tracing::error;
use trainctl_client::TrainingApi;
use trainctl_core::domain::video::VideoRecord;

/// A playable video entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCard {
    pub name: String,
    /// Path on the server, e.g. "/static/videos/cartpole.mp4"
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gallery {
    Empty,
    Unavailable,
    Cards(Vec<VideoCard>),
}

impl Gallery {
    pub fn from_videos(videos: Vec<VideoRecord>, base_path: &str) -> Self {
        if videos.is_empty() {
            return Gallery::Empty;
        }

        Gallery::Cards(
            videos
                .into_iter()
                .map(|video| VideoCard {
                    source: video.source_path(base_path),
                    name: video.name,
                })
                .collect(),
        )
    }

    /// Fetches the listing; failures become [`Gallery::Unavailable`]
    pub async fn load(api: &dyn TrainingApi, base_path: &str) -> Self {
        match api.list_videos().await {
            Ok(videos) => Self::from_videos(videos, base_path),
            Err(e) => {
                error!("Error loading videos: {}", e);
                Gallery::Unavailable
            }
        }
    }

    /// Renders the gallery; card sources are prefixed with `server_url`
    pub fn render(&self, server_url: &str) -> String {
        match self {
            Gallery::Empty => format!(
                "{}\n{}",
                "No video examples available yet.".yellow(),
                "Train an agent and save videos to see them here.".dimmed()
            ),
            Gallery::Unavailable => format!(
                "{}\n{}",
                "Error loading videos.".red(),
                "Please try again later.".dimmed()
            ),
            Gallery::Cards(cards) => {
                let mut lines = vec![format!("Found {} video(s):", cards.len()).bold().to_string()];
                for card in cards {
                    lines.push(format!("  {} {}", "▸".cyan(), card.name));
                    lines.push(format!(
                        "    {}",
                        format!("{}{}", server_url.trim_end_matches('/'), card.source).dimmed()
                    ));
                }
                lines.join("\n")
            }
        }
    }
}
