use rquest::{Client, Response, RequestBuilder};
use rquest_util::Emulation;
use http::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use http::StatusCode;
use crate::error::{Error, Result};
use tracing::debug;

pub struct HttpClient {
    client: Client,
    headers: HeaderMap,
}

impl HttpClient {
    pub fn new(emulation: Emulation) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/html,application/xhtml+xml"));
        // Film titles and role names come back localized otherwise.
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        debug!(
            emulation = ?emulation,
            "Creating client with emulation"
        );

        let client = Client::builder()
            .emulation(emulation)
            .build()?;

        Ok(Self { client, headers })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        let mut request = self.client.get(url);

        for (key, value) in self.headers.iter() {
            request = request.header(key, value);
        }

        request
    }

    pub async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;

        debug!(
            status = response.status().as_u16(),
            url = %response.url(),
            "Response received"
        );

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                debug!("Rate limit exceeded");
                Err(Error::RateLimit)
            },
            StatusCode::FORBIDDEN => {
                debug!(url = %response.url(), "Received 403 Forbidden");
                Err(Error::Forbidden)
            },
            _ => Ok(response)
        }
    }

    /// Fetches `url` and returns the body of a 200 response.
    pub async fn get_html(&self, url: &str) -> Result<String> {
        let response = self.send(self.get(url)).await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::NOT_FOUND => Err(Error::NotFound(url.to_string())),
            status => Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}
