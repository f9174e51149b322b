// src/loader/source.rs

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid question source {0:?}")]
    BadLocation(String),
}

/// Somewhere the questions CSV can be fetched from as text.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Human readable location, used in logs.
    fn describe(&self) -> String;

    async fn fetch_text(&self) -> Result<String, LoadError>;
}

/// A CSV file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch_text(&self) -> Result<String, LoadError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.describe(),
                source,
            })
    }
}

/// A CSV served over http(s). Non-2xx responses count as failures.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: Url,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch_text(&self) -> Result<String, LoadError> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                url: self.describe(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

/// Picks a source for a configured location.
///
/// `http://` and `https://` URLs are fetched over the network, `file://` URLs and
/// anything that does not parse as an absolute URL are read from disk.
pub fn source_for(location: &str) -> Result<Box<dyn QuestionSource>, LoadError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(LoadError::BadLocation(location.to_string()));
    }

    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Box::new(HttpSource::new(url))),
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| LoadError::BadLocation(location.to_string()))?;
            Ok(Box::new(FileSource::new(path)))
        }
        _ => Ok(Box::new(FileSource::new(location))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_are_files() {
        let source = source_for("assets/questions.csv").unwrap();
        assert_eq!(source.describe(), "assets/questions.csv");
    }

    #[test]
    fn http_urls_are_fetched() {
        let source = source_for("http://localhost:3000/assets/questions.csv").unwrap();
        assert_eq!(
            source.describe(),
            "http://localhost:3000/assets/questions.csv"
        );
    }

    #[test]
    fn blank_location_is_rejected() {
        assert!(matches!(
            source_for("   "),
            Err(LoadError::BadLocation(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let source = FileSource::new("definitely/not/here.csv");
        assert!(matches!(
            source.fetch_text().await,
            Err(LoadError::Io { .. })
        ));
    }
}
