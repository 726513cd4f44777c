//! HTTP transport shared by the resource clients

use crate::{
    config::Config,
    error::ConfigError,
    upload::{Payload, UploadBody},
    ClientError, Result,
};
use reqwest::{
    header::{self, HeaderValue},
    Client, Method, RequestBuilder, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

/// Issues requests against the configured API and classifies failures
#[derive(Clone)]
pub(crate) struct Transport {
    config: Config,
    http: Client,
    base: Url,
    /// `Bearer <token>` for metadata calls, absent for anonymous clients
    auth: Option<HeaderValue>,
    /// `Bearer <anon_key>` for signed uploads
    upload_auth: HeaderValue,
}

impl Transport {
    pub fn new(config: Config) -> std::result::Result<Self, ConfigError> {
        let base = parse_base("api", &config.api_url)?;
        parse_base("transform", &config.transform_url)?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| ConfigError::InvalidHeader("user-agent"))?,
        );

        let auth = config
            .token
            .as_deref()
            .map(|token| bearer(token, "authorization"))
            .transpose()?;
        let upload_auth = bearer(&config.anon_key, "anonymous key")?;

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            config,
            http,
            base,
            auth,
            upload_auth,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET a metadata endpoint and decode the JSON body.
    ///
    /// Each segment is appended to the API base percent-encoded, so ids can
    /// never escape their path segment.
    pub async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        self.call(Method::GET, segments, None::<&()>).await
    }

    /// POST a JSON body to a metadata endpoint and decode the JSON reply
    pub async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, segments, Some(body)).await
    }

    /// PUT an upload body to a signed URL, authenticated with the anonymous key
    pub async fn put_upload(&self, signed_url: &str, body: UploadBody) -> Result<()> {
        let mut req = self
            .http
            .put(signed_url)
            .header(header::AUTHORIZATION, self.upload_auth.clone());

        req = match body.into_payload()? {
            Payload::Raw {
                body,
                content_type,
                cache_control,
            } => req
                .header(header::CACHE_CONTROL, cache_control)
                .header(header::CONTENT_TYPE, content_type)
                .body(body),
            Payload::Multipart(form) => req.multipart(form),
        };

        debug!("Sending PUT upload to signed URL");
        self.send(req).await?;
        Ok(())
    }

    /// API base with `segments` appended
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::unknown("API base URL cannot take path segments"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn call<B, T>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("Sending {} request to {}", method, url);

        let mut req = self.http.request(method, url);
        if let Some(auth) = &self.auth {
            req = req.header(header::AUTHORIZATION, auth.clone());
        }
        if let Some(data) = body {
            req = req.json(data);
        }

        let response = self.send(req).await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(&e))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::unknown(format!("unexpected response body: {}", e)))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response> {
        let response = req.send().await.map_err(|e| classify_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let error = ClientError::from_response_body(status.as_u16(), &text);
            debug!(
                status = status.as_u16(),
                kind = error.kind().as_str(),
                "Request failed"
            );
            return Err(error);
        }

        Ok(response)
    }
}

fn parse_base(field: &'static str, value: &str) -> std::result::Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase {
            field,
            value: value.to_string(),
        });
    }
    Ok(url)
}

fn bearer(secret: &str, name: &'static str) -> std::result::Result<HeaderValue, ConfigError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", secret))
        .map_err(|_| ConfigError::InvalidHeader(name))?;
    value.set_sensitive(true);
    Ok(value)
}

fn classify_transport(err: &reqwest::Error) -> ClientError {
    debug!("Transport failure: {}", err);
    ClientError::from_transport(err)
}
