use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::config::{DictionaryConfig, LOOKUP_TIMEOUT};
use crate::error::LookupError;

/// Anything that can turn a word into a short definition.
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn define(&self, word: &str) -> Result<String, LookupError>;
}

/// Client for dictionaryapi.dev-compatible endpoints (`GET {base}/{word}`).
#[derive(Debug, Clone)]
pub struct FreeDictionaryClient {
    client: Client,
    base_url: String,
}

impl FreeDictionaryClient {
    pub fn new(config: &DictionaryConfig) -> Result<Self, LookupError> {
        let client = Client::builder().timeout(LOOKUP_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn entry_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

#[async_trait]
impl DefinitionSource for FreeDictionaryClient {
    async fn define(&self, word: &str) -> Result<String, LookupError> {
        let url = self.entry_url(word)?;
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(LookupError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        parse_first_definition(&body)
    }
}

#[derive(Debug, Deserialize)]
struct EntryRaw {
    #[serde(default)]
    meanings: Vec<MeaningRaw>,
}

#[derive(Debug, Deserialize)]
struct MeaningRaw {
    #[serde(default)]
    definitions: Vec<DefinitionRaw>,
}

#[derive(Debug, Deserialize)]
struct DefinitionRaw {
    #[serde(default)]
    definition: String,
}

/// Picks the first non-empty definition from a dictionary response body.
pub fn parse_first_definition(body: &str) -> Result<String, LookupError> {
    let entries: Vec<EntryRaw> = serde_json::from_str(body)?;
    entries
        .iter()
        .flat_map(|entry| &entry.meanings)
        .flat_map(|meaning| &meaning.definitions)
        .map(|d| d.definition.trim())
        .find(|d| !d.is_empty())
        .map(str::to_string)
        .ok_or(LookupError::NoDefinition)
}
