//! Link validation for job submission.

use url::Url;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

const DROPBOX_HOSTS: &[&str] = &["dropbox.com", "www.dropbox.com", "dl.dropboxusercontent.com"];

const MAX_URL_LENGTH: usize = 2048;

fn parse_http_url(raw: &str) -> Option<Url> {
    if raw.len() > MAX_URL_LENGTH {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn host_matches(url: &Url, hosts: &[&str]) -> bool {
    url.host_str()
        .map(|h| {
            let h = h.to_lowercase();
            hosts.iter().any(|allowed| h == *allowed)
        })
        .unwrap_or(false)
}

/// Validate a YouTube video URL. Returns the normalized URL string.
/// Hosts are matched exactly, never by substring, so a hostile domain
/// embedding "youtube.com" in its path or name does not pass.
pub fn validate_youtube_url(raw: &str) -> Result<String, String> {
    parse_http_url(raw)
        .filter(|url| host_matches(url, YOUTUBE_HOSTS))
        .map(|url| url.to_string())
        .ok_or_else(|| "Invalid YouTube URL".to_string())
}

/// Validate a Dropbox share URL. Returns the normalized URL string.
pub fn validate_dropbox_url(raw: &str) -> Result<String, String> {
    parse_http_url(raw)
        .filter(|url| host_matches(url, DROPBOX_HOSTS))
        .map(|url| url.to_string())
        .ok_or_else(|| "Invalid Dropbox URL".to_string())
}
