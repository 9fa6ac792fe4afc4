//! Social share links for a score, built as plain URLs so any surface
//! (web, CLI) can hand them to the user.

use serde::{Deserialize, Serialize};

/// Supported share destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareTarget {
    WhatsApp,
    Telegram,
    Facebook,
}

impl ShareTarget {
    pub const ALL: [ShareTarget; 3] = [
        ShareTarget::WhatsApp,
        ShareTarget::Telegram,
        ShareTarget::Facebook,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ShareTarget::WhatsApp => "WhatsApp",
            ShareTarget::Telegram => "Telegram",
            ShareTarget::Facebook => "Facebook",
        }
    }
}

/// Build the share URL for one destination
pub fn share_url(target: ShareTarget, username: &str, score: i64) -> String {
    match target {
        ShareTarget::WhatsApp => {
            let text = format!("Hey, Look how {} scored {}!", username, score);
            format!("https://wa.me/?text={}", urlencoding::encode(&text))
        }
        ShareTarget::Telegram => {
            let text = format!("{} scored {}!", username, score);
            format!(
                "https://t.me/share/url?url={}",
                urlencoding::encode(&text)
            )
        }
        ShareTarget::Facebook => {
            let text = format!("{} scored {}!", username, score);
            format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                urlencoding::encode(&text)
            )
        }
    }
}
