use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("invalid image locator: {0}")]
    InvalidLocator(String),

    #[error("image request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("image request returned status {0}")]
    Status(u16),
}

/// Fetches an image so the host's cache holds it before it is shown.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, src: &str) -> Result<(), ImageLoadError>;
}

/// Loads images over HTTP, resolving relative locators against `base_url`.
#[derive(Clone)]
pub struct HttpImageLoader {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpImageLoader {
    pub fn new(base_url: Option<Url>) -> Result<Self, ImageLoadError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn with_client(client: reqwest::Client, base_url: Option<Url>) -> Self {
        Self { client, base_url }
    }

    fn resolve(&self, src: &str) -> Result<Url, ImageLoadError> {
        match Url::parse(src) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base_url
                .as_ref()
                .and_then(|base| base.join(src).ok())
                .ok_or_else(|| ImageLoadError::InvalidLocator(src.to_string())),
            Err(_) => Err(ImageLoadError::InvalidLocator(src.to_string())),
        }
    }
}

impl fmt::Debug for HttpImageLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpImageLoader")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, src: &str) -> Result<(), ImageLoadError> {
        let url = self.resolve(src)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }
        // Drain the body so the transfer completes.
        response.bytes().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_locators_need_a_base() {
        let loader = HttpImageLoader::with_client(reqwest::Client::new(), None);
        assert!(matches!(
            loader.resolve("/hero/1.jpg"),
            Err(ImageLoadError::InvalidLocator(_))
        ));

        let base = Url::parse("https://shanny.tech/").unwrap();
        let loader =
            HttpImageLoader::with_client(reqwest::Client::new(), Some(base));
        assert_eq!(
            loader.resolve("/hero/1.jpg").unwrap().as_str(),
            "https://shanny.tech/hero/1.jpg"
        );
        assert_eq!(
            loader.resolve("https://cdn.example.com/a.png").unwrap().as_str(),
            "https://cdn.example.com/a.png"
        );
    }
}
