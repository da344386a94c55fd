use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use futures::AsyncReadExt;
use http::{Request, Uri};
use isahc::HttpClient;
use serde::de::DeserializeOwned;

use crate::model::Quote;

/// Access token baked into the application. Override with
/// [`Client::with_token`].
const DEFAULT_TOKEN: &str = "ctmmlc9r01qjlgiqg2o0ctmmlc9r01qjlgiqg2og";

#[derive(Debug)]
pub struct Client {
    client: HttpClient,
    base: String,
    token: String,
}

impl Client {
    pub fn new() -> Self {
        Client::default()
    }

    pub fn with_token(token: String) -> Self {
        Client {
            token,
            ..Client::default()
        }
    }

    fn get_url(&self, path: &str, params: HashMap<&str, String>) -> Result<Uri> {
        let params = serde_urlencoded::to_string(params).unwrap_or_else(|_| String::from(""));
        let uri = format!("{}/{}?{}", self.base, path, params);
        Ok(uri.parse::<Uri>()?)
    }

    async fn get<T: DeserializeOwned>(&self, url: Uri) -> Result<T> {
        let req = Request::builder().method(http::Method::GET).uri(url);

        let res = self
            .client
            .send_async(req.body(())?)
            .await
            .context("Failed to send request")?;

        if !res.status().is_success() {
            bail!("Request failed with status {}", res.status());
        }

        let mut body = res.into_body();
        let mut bytes = Vec::new();
        body.read_to_end(&mut bytes).await?;

        let response = serde_json::from_slice(&bytes)?;

        Ok(response)
    }

    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let mut params = HashMap::new();
        params.insert("symbol", symbol.to_string());
        params.insert("token", self.token.clone());

        let url = self.get_url("quote", params)?;

        let quote: Quote = self
            .get(url)
            .await
            .with_context(|| format!("Failed to get quote for {}", symbol))?;

        Ok(quote)
    }
}

impl Default for Client {
    fn default() -> Client {
        let client = HttpClient::builder().build().unwrap();

        let base = String::from("https://finnhub.io/api/v1");

        Client {
            client,
            base,
            token: String::from(DEFAULT_TOKEN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_url_carries_symbol_and_token() {
        let client = Client::with_token(String::from("abc123"));

        let mut params = HashMap::new();
        params.insert("symbol", String::from("AAPL"));
        params.insert("token", client.token.clone());

        let url = client.get_url("quote", params).unwrap().to_string();

        assert!(url.starts_with("https://finnhub.io/api/v1/quote?"));
        assert!(url.contains("symbol=AAPL"));
        assert!(url.contains("token=abc123"));
    }

    #[async_std::test]
    #[ignore]
    async fn test_quote() {
        let client = Client::new();

        let symbols = vec!["AAPL", "AMZN", "TSLA"];

        for symbol in symbols {
            let quote = client.get_quote(symbol).await;

            if let Err(e) = quote {
                println!("{}", e);

                panic!();
            }
        }
    }
}
