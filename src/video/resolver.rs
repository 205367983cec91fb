use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{RecipeError, Result};
use crate::models::VideoResolution;
use crate::video::extract::{embed_url, match_video_id, watch_url};

const SEARCH_RESULTS_URL: &str = "https://www.youtube.com/results";

/// Turns model-supplied video links into canonical, checked URLs.
pub struct VideoResolver {
    http_client: Client,
    pub oembed_endpoint: String,
}

impl VideoResolver {
    pub fn new(oembed_endpoint: &str, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecipeError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            oembed_endpoint: oembed_endpoint.to_string(),
        })
    }

    /// Only a 200 from the oEmbed lookup counts. Failures are never raised.
    pub async fn is_embeddable(&self, watch_url: &str) -> bool {
        let result = self
            .http_client
            .get(&self.oembed_endpoint)
            .query(&[("url", watch_url), ("format", "json")])
            .send()
            .await;

        match result {
            Ok(response) => {
                debug!("oEmbed lookup for {} returned {}", watch_url, response.status());
                response.status() == StatusCode::OK
            }
            Err(e) => {
                warn!("oEmbed lookup for {} failed: {}", watch_url, e);
                false
            }
        }
    }

    /// Embed URL when embeddable, watch URL when not, nothing when no id.
    pub async fn resolve(&self, url: &str) -> VideoResolution {
        let Some((video_id, matched)) = match_video_id(url) else {
            debug!("No video id in {}", url);
            return VideoResolution::unresolved();
        };
        debug!("Extracted video id {} from {} ({})", video_id, url, matched);

        let watch = watch_url(video_id);
        if self.is_embeddable(&watch).await {
            VideoResolution {
                url: Some(embed_url(video_id)),
                embeddable: true,
            }
        } else {
            VideoResolution {
                url: Some(watch),
                embeddable: false,
            }
        }
    }
}

/// Search results page for `query`, used when a video can't be shown.
pub fn fallback_search_url(query: &str) -> String {
    format!(
        "{}?search_query={}",
        SEARCH_RESULTS_URL,
        urlencoding::encode(query)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WATCH: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

    async fn resolver_with_status(status: u16) -> (MockServer, VideoResolver) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oembed"))
            .and(query_param("url", WATCH))
            .and(query_param("format", "json"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let resolver =
            VideoResolver::new(&format!("{}/oembed", server.uri()), Duration::from_secs(5))
                .unwrap();
        (server, resolver)
    }

    #[tokio::test]
    async fn test_embeddable_returns_embed_url() {
        let (_server, resolver) = resolver_with_status(200).await;
        let resolution = resolver.resolve("https://youtu.be/dQw4w9WgXcQ").await;
        assert_eq!(
            resolution,
            VideoResolution {
                url: Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string()),
                embeddable: true,
            }
        );
    }

    #[tokio::test]
    async fn test_non_200_returns_watch_url() {
        for status in [401, 404, 500] {
            let (_server, resolver) = resolver_with_status(status).await;
            let resolution = resolver
                .resolve("https://www.youtube.com/shorts/dQw4w9WgXcQ")
                .await;
            assert_eq!(resolution.url.as_deref(), Some(WATCH));
            assert!(!resolution.embeddable);
        }
    }

    #[tokio::test]
    async fn test_transport_failure_returns_watch_url() {
        let resolver =
            VideoResolver::new("http://127.0.0.1:1/oembed", Duration::from_secs(2)).unwrap();
        let resolution = resolver.resolve(WATCH).await;
        assert_eq!(resolution.url.as_deref(), Some(WATCH));
        assert!(!resolution.embeddable);
    }

    #[tokio::test]
    async fn test_no_id_skips_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let resolver =
            VideoResolver::new(&format!("{}/oembed", server.uri()), Duration::from_secs(5))
                .unwrap();
        let resolution = resolver.resolve("https://example.com/video").await;
        assert_eq!(resolution, VideoResolution::unresolved());
    }

    #[test]
    fn test_fallback_search_url() {
        let url = fallback_search_url("chicken soup");
        assert_eq!(
            url,
            "https://www.youtube.com/results?search_query=chicken%20soup"
        );
        assert_eq!(url.matches("chicken%20soup").count(), 1);

        assert_eq!(
            fallback_search_url("mac & cheese"),
            "https://www.youtube.com/results?search_query=mac%20%26%20cheese"
        );
    }
}
