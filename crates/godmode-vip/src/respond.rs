//! Response synthesis for VIP invite links.
//!
//! Once a request is classified, exactly one of two responses is produced:
//!
//! - **Preview fetchers** get a 200 HTML document with Open Graph and Twitter
//!   Card tags, plus a meta refresh and an inline script pointing at the
//!   loop-broken page (`/vip?id=..&_r=1`).
//! - **Browsers** get a 307 to `/vip` with `id` preserved and `_r=1` set.
//!
//! The canonical URL advertised to crawlers never carries `_r`; every
//! redirect target carries it exactly once.

use axum::http::uri::Authority;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Redirect, Response};
use url::Url;
use url::form_urlencoded;

use crate::classify::Classification;
use crate::error::VipError;
use crate::render;
use crate::state::AppState;

/// Path of the interactive invite page.
pub const VIP_PATH: &str = "/vip";

/// Query parameter carrying the creator identifier.
pub const ID_PARAM: &str = "id";

/// Loop-breaker query parameter.
pub const LOOP_BREAKER_PARAM: &str = "_r";

/// Fixed preview image, relative to the origin.
pub const PREVIEW_IMAGE_PATH: &str = "/assets/logo.png";

/// An inbound request with its absolute URL.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl InboundRequest {
    /// Build from request parts.
    ///
    /// Absolute request URIs are used as-is. Otherwise the origin is
    /// `public_origin` when configured, or `{X-Forwarded-Proto}://{Host}`.
    /// Fails if no absolute URL can be formed.
    pub fn from_parts(
        method: Method,
        uri: &Uri,
        headers: HeaderMap,
        public_origin: Option<&str>,
    ) -> Result<Self, VipError> {
        let url = if uri.scheme().is_some() && uri.authority().is_some() {
            Url::parse(&uri.to_string())
        } else {
            let origin = match public_origin {
                Some(origin) => origin.to_string(),
                None => forwarded_origin(&headers)?,
            };
            let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
            Url::parse(&format!("{origin}{path_and_query}"))
        }
        .map_err(|e| VipError::InvalidRequestUrl(format!("{uri}: {e}")))?;

        Ok(Self {
            method,
            url,
            headers,
        })
    }

    /// `User-Agent` value, empty when absent or not valid UTF-8.
    pub fn user_agent(&self) -> &str {
        self.headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// The `id` query value. Empty values count as absent.
    pub fn identifier(&self) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == ID_PARAM)
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty())
    }

    /// Whether the loop breaker is already present.
    pub fn is_loop_broken(&self) -> bool {
        self.url.query_pairs().any(|(k, _)| k == LOOP_BREAKER_PARAM)
    }

    /// Serialized origin, e.g. `https://godmode.app`.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

fn forwarded_origin(headers: &HeaderMap) -> Result<String, VipError> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|h| !h.is_empty())
        .ok_or_else(|| VipError::InvalidRequestUrl("missing Host header".to_string()))?;
    let host: Authority = host
        .parse()
        .map_err(|e| VipError::InvalidRequestUrl(format!("invalid Host header {host:?}: {e}")))?;
    let proto = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|p| *p == "http" || *p == "https")
        .unwrap_or("http");
    Ok(format!("{proto}://{host}"))
}

/// Both branches answer the same URL, so shared caches must key on the agent.
const VARY_USER_AGENT: &str = "User-Agent";

/// Metadata advertised to link-preview fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    pub title: String,
    pub description: String,
    /// `{origin}/vip?id={id}`, without the loop breaker.
    pub canonical_url: String,
    pub preview_image_url: String,
    /// `{origin}/vip?id={id}&_r=1`, followed by meta refresh and script.
    pub redirect_url: String,
    pub site_name: String,
}

impl MetadataDocument {
    /// Assemble the document. `display_name` is the directory hit, if any.
    pub fn build(
        origin: &str,
        identifier: Option<&str>,
        display_name: Option<&str>,
        site_name: &str,
    ) -> Self {
        let (title, description) = match display_name {
            Some(name) => (
                format!("{name} invited you to {site_name}"),
                format!("{name} shared exclusive VIP access to {site_name}"),
            ),
            None => (
                format!("You have been invited to {site_name}"),
                format!("Exclusive VIP access to {site_name}"),
            ),
        };

        let id = encode_query_value(identifier.unwrap_or(""));
        let canonical_url = format!("{origin}{VIP_PATH}?{ID_PARAM}={id}");
        let redirect_url = format!("{canonical_url}&{LOOP_BREAKER_PARAM}=1");

        Self {
            title,
            description,
            canonical_url,
            preview_image_url: format!("{origin}{PREVIEW_IMAGE_PATH}"),
            redirect_url,
            site_name: site_name.to_string(),
        }
    }
}

fn encode_query_value(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Browser redirect target: the request URL with path forced to `/vip`,
/// `id` kept and `_r` set to `1`. Applying it twice changes nothing.
pub fn redirect_target(request_url: &Url, identifier: Option<&str>) -> Url {
    let mut target = request_url.clone();
    target.set_path(VIP_PATH);
    if let Some(id) = identifier {
        set_query_param(&mut target, ID_PARAM, id);
    }
    set_query_param(&mut target, LOOP_BREAKER_PARAM, "1");
    target
}

/// Replace the first `key` in place, drop any duplicates, append if absent.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (k, v) in url.query_pairs().into_owned() {
        if k != key {
            pairs.push((k, v));
        } else if !replaced {
            pairs.push((k, value.to_string()));
            replaced = true;
        }
    }
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }
    url.query_pairs_mut().clear().extend_pairs(&pairs);
}

/// Produce the response for a classified request.
pub async fn synthesize(
    state: &AppState,
    request: &InboundRequest,
    classification: Classification,
) -> Response {
    let identifier = request.identifier();

    match classification {
        Classification::AutomatedPreviewFetcher => {
            let display_name = match identifier.as_deref() {
                Some(id) => state
                    .directory
                    .find(id, state.config.directory_timeout)
                    .await
                    .map(|record| record.display_name()),
                None => None,
            };

            let doc = MetadataDocument::build(
                &request.origin(),
                identifier.as_deref(),
                display_name.as_deref(),
                &state.config.site_name,
            );

            tracing::info!(
                id = ?identifier,
                found = display_name.is_some(),
                "serving preview metadata"
            );

            metadata_response(&doc)
        }
        Classification::InteractiveClient => {
            let target = redirect_target(&request.url, identifier.as_deref());
            tracing::info!(id = ?identifier, location = %target, "redirecting browser");
            redirect_response(&target)
        }
    }
}

/// 200 HTML response for a metadata document.
pub fn metadata_response(doc: &MetadataDocument) -> Response {
    let html = render::metadata_page(doc).into_string();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=UTF-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=60, s-maxage=300"),
    );
    headers.insert(header::VARY, HeaderValue::from_static(VARY_USER_AGENT));

    // ETag (xxHash of content)
    let hash = xxhash_rust::xxh3::xxh3_64(html.as_bytes());
    let etag = format!("\"{}\"", hex_fmt::HexFmt(&hash.to_be_bytes()));
    if let Ok(val) = HeaderValue::from_str(&etag) {
        headers.insert(header::ETAG, val);
    }

    (StatusCode::OK, headers, html).into_response()
}

/// 307 redirect that is never cached.
pub fn redirect_response(target: &Url) -> Response {
    (
        [
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
            (header::VARY, HeaderValue::from_static(VARY_USER_AGENT)),
        ],
        Redirect::temporary(target.as_str()),
    )
        .into_response()
}
