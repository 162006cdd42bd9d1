//! YouTube URL handling.

use regex::Regex;
use std::sync::OnceLock;

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Matches watch?v=, youtu.be/, /embed/, /v/ and /e/ URL shapes.
        // Bare 11-character ids are deliberately not accepted.
        Regex::new(
            r"(?:https?://)?(?:www\.)?(?:youtube\.com/(?:[^/\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([A-Za-z0-9_-]{11})",
        )
        .expect("Invalid regex")
    })
}

/// Extract the stable 11-character video id from a YouTube URL.
pub fn extract_video_id(url: &str) -> Option<String> {
    video_id_regex()
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Deterministic best-effort thumbnail for a video id, used when the
/// upstream metadata omits one.
pub fn fallback_thumbnail(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extract_video_id("youtube.com/watch?list=PL123&v=abc12345678"),
            Some("abc12345678".to_string())
        );
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        // Bare ids are not valid input; a full URL is required.
        assert_eq!(extract_video_id("dQw4w9WgXcQ"), None);
        assert_eq!(extract_video_id("https://vimeo.com/12345678901"), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_fallback_thumbnail() {
        assert_eq!(
            fallback_thumbnail("abc12345678"),
            "https://img.youtube.com/vi/abc12345678/maxresdefault.jpg"
        );
    }
}
