//! Paged query endpoint.

use std::future::Future;

use flow_core::{OptionsFlow, QueryParams};
use flow_protocol::{decode_page, to_wire_query};
use tracing::debug;

use crate::config::FeedConfig;
use crate::error::FeedError;

/// Something that can return one page of trade records.
pub trait PageSource: Send + Sync + 'static {
    fn fetch_page(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<Vec<OptionsFlow>, FeedError>> + Send;
}

/// POSTs the wire query as JSON and decodes the array response.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPageSource {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            url: config.query_url.clone(),
        })
    }
}

impl PageSource for HttpPageSource {
    fn fetch_page(
        &self,
        params: QueryParams,
    ) -> impl Future<Output = Result<Vec<OptionsFlow>, FeedError>> + Send {
        let wire = to_wire_query(&params);
        let request = self.client.post(&self.url).json(&wire);

        async move {
            debug!(start_row = wire.start_row, end_row = wire.end_row, "querying page");
            let response = request.send().await?;
            let status = response.status();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(FeedError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            Ok(decode_page(&body)?)
        }
    }
}
