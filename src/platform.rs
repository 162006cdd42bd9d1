//! Target platform enumeration for repurposed content.
//!
//! The display strings are part of the persisted data contract: content
//! items store the platform tag as text, so these must stay stable.

use serde::{Deserialize, Serialize};

/// A target platform for repurposed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    LinkedIn,
    InstagramPost,
    InstagramReel,
    Facebook,
    TweetThread,
    Email,
    Image,
    Video,
}

/// What kind of asset a platform produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Text,
    Image,
    Video,
}

impl Platform {
    /// All platforms, in selector order.
    pub const ALL: [Platform; 8] = [
        Platform::LinkedIn,
        Platform::InstagramPost,
        Platform::InstagramReel,
        Platform::Facebook,
        Platform::TweetThread,
        Platform::Email,
        Platform::Image,
        Platform::Video,
    ];

    /// The stored/displayed tag for this platform.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::InstagramPost => "Instagram Post",
            Platform::InstagramReel => "Instagram Reel",
            Platform::Facebook => "Facebook",
            Platform::TweetThread => "Tweet Thread",
            Platform::Email => "Email",
            Platform::Image => "Image (Nano Banana)",
            Platform::Video => "Video (Veo 3.1)",
        }
    }

    /// Generation routing for this platform.
    pub fn kind(&self) -> PlatformKind {
        match self {
            Platform::Image => PlatformKind::Image,
            Platform::Video => PlatformKind::Video,
            _ => PlatformKind::Text,
        }
    }

    /// Look up a platform by its stored tag.
    pub fn from_tag(tag: &str) -> Option<Platform> {
        Platform::ALL.iter().copied().find(|p| p.tag() == tag)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    /// Accepts CLI short names as well as the full stored tags.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(p) = Platform::from_tag(s) {
            return Ok(p);
        }
        match s.to_lowercase().as_str() {
            "linkedin" => Ok(Platform::LinkedIn),
            "instagram-post" | "instagram_post" | "post" => Ok(Platform::InstagramPost),
            "instagram-reel" | "instagram_reel" | "reel" => Ok(Platform::InstagramReel),
            "facebook" => Ok(Platform::Facebook),
            "tweet" | "tweet-thread" | "thread" => Ok(Platform::TweetThread),
            "email" => Ok(Platform::Email),
            "image" => Ok(Platform::Image),
            "video" => Ok(Platform::Video),
            _ => Err(format!(
                "Unknown platform: {}. Expected one of: linkedin, instagram-post, \
                 instagram-reel, facebook, tweet, email, image, video",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_exact() {
        assert_eq!(Platform::LinkedIn.tag(), "LinkedIn");
        assert_eq!(Platform::InstagramPost.tag(), "Instagram Post");
        assert_eq!(Platform::InstagramReel.tag(), "Instagram Reel");
        assert_eq!(Platform::Facebook.tag(), "Facebook");
        assert_eq!(Platform::TweetThread.tag(), "Tweet Thread");
        assert_eq!(Platform::Email.tag(), "Email");
        assert_eq!(Platform::Image.tag(), "Image (Nano Banana)");
        assert_eq!(Platform::Video.tag(), "Video (Veo 3.1)");
    }

    #[test]
    fn test_kind_routing() {
        assert_eq!(Platform::Image.kind(), PlatformKind::Image);
        assert_eq!(Platform::Video.kind(), PlatformKind::Video);
        for p in [
            Platform::LinkedIn,
            Platform::InstagramPost,
            Platform::InstagramReel,
            Platform::Facebook,
            Platform::TweetThread,
            Platform::Email,
        ] {
            assert_eq!(p.kind(), PlatformKind::Text);
        }
    }

    #[test]
    fn test_from_str_short_names() {
        assert_eq!("linkedin".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!("reel".parse::<Platform>().unwrap(), Platform::InstagramReel);
        assert_eq!("tweet".parse::<Platform>().unwrap(), Platform::TweetThread);
        assert_eq!("image".parse::<Platform>().unwrap(), Platform::Image);
        assert!("myspace".parse::<Platform>().is_err());
    }

    #[test]
    fn test_tag_round_trip() {
        for p in Platform::ALL {
            assert_eq!(Platform::from_tag(p.tag()), Some(p));
            assert_eq!(p.tag().parse::<Platform>().unwrap(), p);
        }
    }
}
