pub mod account;
pub mod link;
pub mod lookup;
pub mod register;
pub mod root;
pub mod status;

use reqwest::{Response, Url};
use serde::Deserialize;

/// Default API endpoint of a local node.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9101";

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
    kind: String,
}

#[derive(Deserialize)]
pub struct IdResponse {
    pub id: u64,
}

/// Build `<endpoint>/api/v1/<segments...>`, percent-encoding each segment.
pub fn api_url(endpoint: &str, segments: &[&str]) -> anyhow::Result<Url> {
    let mut url = Url::parse(endpoint)?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("endpoint {} cannot carry a path", endpoint))?
        .pop_if_empty()
        .extend(["api", "v1"])
        .extend(segments);
    Ok(url)
}

/// Turn a non-success response into an error naming the failed action.
pub async fn fail(action: &str, resp: Response) -> anyhow::Result<()> {
    let status = resp.status();
    if let Ok(err) = resp.json::<ErrorResponse>().await {
        anyhow::bail!("{} failed (HTTP {}, {}): {}", action, status, err.kind, err.error);
    } else {
        anyhow::bail!("{} failed (HTTP {})", action, status);
    }
}

/// Report a node that could not be reached. The command fails, since the
/// request never reached the registry.
pub fn unreachable(endpoint: &str, err: reqwest::Error) -> anyhow::Result<()> {
    eprintln!("Is the node running? Start it with: lucid-node");
    anyhow::bail!("could not reach node at {}: {}", endpoint, err);
}
