// src/feed/video.rs
//! Video link normalization.
//!
//! Every hosted video is identified by an 11-character token drawn from
//! `[A-Za-z0-9_-]`. Links arrive in many shapes (`watch?v=`, `youtu.be/`,
//! `/embed/`, `/vi/` thumbnails, `/live/`, ...); the feed stores exactly one canonical
//! form per token, which is also the deduplication key.

use once_cell::sync::OnceCell;
use regex::Regex;

pub const VIDEO_ID_LEN: usize = 11;
pub const CANONICAL_PREFIX: &str = "https://www.youtube.com/watch?v=";

fn video_id_regex() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();
    RE.get_or_init(|| {
        // marker, then exactly 11 id chars not followed by another id char
        Regex::new(
            r"(?:[?&]v=|youtu\.be/|/vi/|/embed/|/shorts/|/live/|/v/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
        )
        .expect("video id regex")
    })
}

/// Extract the 11-character video identifier from a URL, if any known shape matches.
pub fn extract_video_id(url: &str) -> Option<String> {
    video_id_regex()
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn canonical_url(video_id: &str) -> String {
    format!("{CANONICAL_PREFIX}{video_id}")
}

/// Re-express any supported link as its canonical watch URL.
pub fn canonicalize_link(link: &str) -> Option<String> {
    extract_video_id(link).map(|id| canonical_url(&id))
}
