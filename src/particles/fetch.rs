use std::{future::Future, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{SceneError, SceneResult};

/// Run `fut` until it completes, `limit` elapses, or `cancel` fires.
///
/// This is the only place asynchronous setup waits on anything.
pub async fn bounded<F, T>(fut: F, limit: Duration, cancel: &CancellationToken) -> SceneResult<T>
where
    F: Future<Output = SceneResult<T>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SceneError::Cancelled),
        res = tokio::time::timeout(limit, fut) => match res {
            Ok(out) => out,
            Err(_) => Err(SceneError::timeout(format!(
                "gave up after {} ms",
                limit.as_millis()
            ))),
        },
    }
}

#[cfg(feature = "fetch")]
pub use http::HttpGeoJsonShape;

#[cfg(feature = "fetch")]
mod http {
    use anyhow::Context;

    use crate::{
        SceneResult,
        foundation::core::Vec2,
        particles::def::ParticleDef,
        particles::source::{ShapeSource, project_geojson},
    };

    /// GeoJSON shape data fetched over HTTP.
    #[derive(Clone, Debug)]
    pub struct HttpGeoJsonShape {
        url: String,
        client: reqwest::Client,
    }

    impl HttpGeoJsonShape {
        /// Fetch from `url` with a default client.
        pub fn new(url: impl Into<String>) -> Self {
            Self::with_client(url, reqwest::Client::new())
        }

        /// Fetch from `url` with a caller-configured client.
        pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
            Self {
                url: url.into(),
                client,
            }
        }
    }

    impl ShapeSource for HttpGeoJsonShape {
        fn name(&self) -> &str {
            "http-geojson"
        }

        async fn load(&self, def: &ParticleDef) -> SceneResult<Vec<Vec2>> {
            tracing::debug!(url = %self.url, "fetching shape data");
            let bytes = self
                .client
                .get(&self.url)
                .send()
                .await
                .context("send shape request")?
                .error_for_status()
                .context("shape request status")?
                .bytes()
                .await
                .context("read shape body")?;
            let doc: serde_json::Value =
                serde_json::from_slice(&bytes).context("parse shape geojson")?;
            project_geojson(&doc, def)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/fetch.rs"]
mod tests;
