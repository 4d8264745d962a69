//! Client for the api-ninjas jokes endpoint.
//!
//! Every failure here is non-fatal to the caller: the post service logs
//! the error and creates the post without the joke.

use async_trait::async_trait;
use serde::Deserialize;

use minigram_core::ports::{JokeError, JokeProvider};

const JOKES_ENDPOINT: &str = "https://api.api-ninjas.com/v1/jokes?limit=1";

#[derive(Debug, Deserialize)]
struct JokeEntry {
    joke: String,
}

/// Fetches one-liner jokes from api-ninjas.
pub struct ApiNinjasJokeClient {
    api_key: String,
    client: reqwest::Client,
}

impl ApiNinjasJokeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl JokeProvider for ApiNinjasJokeClient {
    async fn fetch_joke(&self) -> Result<String, JokeError> {
        if self.api_key.is_empty() {
            return Err(JokeError::MissingApiKey);
        }

        let response = self
            .client
            .get(JOKES_ENDPOINT)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| JokeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JokeError::Status(response.status().as_u16()));
        }

        let entries: Vec<JokeEntry> = response
            .json()
            .await
            .map_err(|e| JokeError::Request(e.to_string()))?;

        first_joke(entries)
    }
}

fn first_joke(entries: Vec<JokeEntry>) -> Result<String, JokeError> {
    entries
        .into_iter()
        .map(|e| e.joke)
        .find(|joke| !joke.is_empty())
        .ok_or(JokeError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_an_error() {
        let client = ApiNinjasJokeClient::new(String::new());

        let err = client.fetch_joke().await.unwrap_err();

        assert!(matches!(err, JokeError::MissingApiKey));
    }

    #[test]
    fn payload_parses_to_the_first_joke() {
        let entries: Vec<JokeEntry> =
            serde_json::from_str(r#"[{"joke": "I used to be a banker, but I lost interest."}]"#)
                .unwrap();

        let joke = first_joke(entries).unwrap();

        assert_eq!(joke, "I used to be a banker, but I lost interest.");
    }

    #[test]
    fn empty_payload_is_an_error() {
        assert!(matches!(first_joke(Vec::new()), Err(JokeError::Empty)));
    }

    #[test]
    fn blank_joke_is_an_error() {
        let entries: Vec<JokeEntry> = serde_json::from_str(r#"[{"joke": ""}]"#).unwrap();

        assert!(matches!(first_joke(entries), Err(JokeError::Empty)));
    }
}
