use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use url::Url;

use super::models::{parse_cells, Cell};
use crate::config::SourceConfig;
use crate::{Error, Result};

/// Upper bound on a cell document; anything larger is not a comic layout
const MAX_DOCUMENT_BYTES: usize = 8 * 1024 * 1024;

/// Trait for anything that can provide the cell layout of a comic
#[async_trait::async_trait]
pub trait CellSource: Send + Sync {
    /// Human readable origin, used in logs
    fn describe(&self) -> String;

    /// Fetch every cell in reading order
    async fn fetch(&self) -> Result<Vec<Cell>>;
}

/// Cells read from a JSON file on disk
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CellSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<Cell>> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let cells = parse_cells(&text)?;
        tracing::debug!(path = %self.path.display(), count = cells.len(), "Loaded cells from file");
        Ok(cells)
    }
}

/// Cells fetched over HTTP(S) as a JSON document
pub struct HttpCellSource {
    client: Client,
    url: Url,
}

impl HttpCellSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self> {
        let url = Url::parse(url)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::build_headers())
            .build()?;

        Ok(Self { client, url })
    }

    fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }
}

#[async_trait::async_trait]
impl CellSource for HttpCellSource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn fetch(&self) -> Result<Vec<Cell>> {
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::CellSource(format!(
                "{} returned HTTP {}",
                self.url, status
            )));
        }

        let body = response.bytes().await?;
        if body.len() > MAX_DOCUMENT_BYTES {
            return Err(Error::CellSource(format!(
                "{} is {} bytes, larger than the {} byte limit",
                self.url,
                body.len(),
                MAX_DOCUMENT_BYTES
            )));
        }

        let text = String::from_utf8_lossy(&body);
        let cells = parse_cells(&text)?;
        tracing::debug!(url = %self.url, count = cells.len(), "Fetched cells over HTTP");
        Ok(cells)
    }
}

/// Cells already held in memory
pub struct StaticCellSource {
    cells: Vec<Cell>,
}

impl StaticCellSource {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

#[async_trait::async_trait]
impl CellSource for StaticCellSource {
    fn describe(&self) -> String {
        format!("{} in-memory cells", self.cells.len())
    }

    async fn fetch(&self) -> Result<Vec<Cell>> {
        Ok(self.cells.clone())
    }
}

/// Pick a source for a configured location: http(s) URLs go over the
/// network, anything else is treated as a file path
pub fn source_for(config: &SourceConfig) -> Result<Box<dyn CellSource>> {
    let location = config.location.trim();
    if location.is_empty() {
        return Err(Error::Config("source.location is empty".to_string()));
    }

    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Box::new(
            HttpCellSource::new(location, config.request_timeout_secs)?,
        )),
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| Error::Config(format!("Invalid file URL: {}", location)))?;
            Ok(Box::new(JsonFileSource::new(path)))
        }
        _ => Ok(Box::new(JsonFileSource::new(location))),
    }
}
