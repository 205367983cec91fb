use regex::Regex;
use std::sync::LazyLock;

pub struct IdPattern {
    pub regex: Regex,
    pub description: &'static str,
}

/// Evaluated in order, first match wins. Query-parameter forms come before
/// path forms so `embed/<a>?v=<b>` resolves to `<b>`.
pub static ID_PATTERNS: LazyLock<Vec<IdPattern>> = LazyLock::new(|| {
    [
        (r"(?:v=|vi=)([a-zA-Z0-9_-]{11})", "watch link (v= or vi= parameter)"),
        (r"youtu\.be/([a-zA-Z0-9_-]{11})", "shortened youtu.be link"),
        (r"youtube\.com/embed/([a-zA-Z0-9_-]{11})", "embed link"),
        (r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})", "shorts link"),
    ]
    .into_iter()
    .map(|(pattern, description)| IdPattern {
        regex: Regex::new(pattern).expect("video id pattern must compile"),
        description,
    })
    .collect()
});

/// Returns the 11-character video id and the pattern that matched.
pub fn match_video_id(url: &str) -> Option<(&str, &'static str)> {
    ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .regex
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|id| (id.as_str(), pattern.description))
    })
}

pub fn extract_video_id(url: &str) -> Option<&str> {
    match_video_id(url).map(|(id, _)| id)
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_known_url_shapes() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42",
            "https://youtube.com/?vi=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "youtube.com/shorts/dQw4w9WgXcQ",
        ];
        for url in cases {
            assert_eq!(extract_video_id(url), Some(ID), "url: {}", url);
        }
    }

    #[test]
    fn test_pattern_order() {
        let descriptions: Vec<_> = ID_PATTERNS.iter().map(|p| p.description).collect();
        assert_eq!(
            descriptions,
            vec![
                "watch link (v= or vi= parameter)",
                "shortened youtu.be link",
                "embed link",
                "shorts link",
            ]
        );

        let (id, matched) =
            match_video_id("https://www.youtube.com/embed/AAAAAAAAAAA?v=BBBBBBBBBBB").unwrap();
        assert_eq!(id, "BBBBBBBBBBB");
        assert_eq!(matched, "watch link (v= or vi= parameter)");
    }

    #[test]
    fn test_no_id() {
        for url in [
            "",
            "https://www.youtube.com/watch?v=short",
            "https://vimeo.com/123456789",
            "https://www.youtube.com/results?search_query=pancakes",
            "not a url at all",
        ] {
            assert_eq!(extract_video_id(url), None, "url: {}", url);
        }
    }

    #[test]
    fn test_canonical_urls() {
        assert_eq!(watch_url(ID), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(embed_url(ID), "https://www.youtube.com/embed/dQw4w9WgXcQ");
    }
}
