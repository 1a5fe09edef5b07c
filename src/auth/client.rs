//! OpenID Connect client for the demo identity provider
//!
//! Thin wrapper over reqwest that knows the Keycloak endpoint layout:
//! authorization, token, userinfo, and logout all live under the configured
//! realm URL. Tokens pass through verbatim; nothing here parses, verifies,
//! or refreshes them.

use crate::config::Config;
use crate::constants::{
    HTTP_TIMEOUT_SECS, PROVIDER_AUTH_PATH, PROVIDER_LOGOUT_PATH, PROVIDER_TOKEN_PATH,
    PROVIDER_USERINFO_PATH,
};
use crate::{AuthFlowError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use url::Url;

/// Tokens returned by the provider's token endpoint.
///
/// All fields are optional on the wire; the provider decides which it
/// issues for the requested scope.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSet {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// OIDC client bound to one provider realm and one registered OAuth client
pub struct OidcClient {
    endpoint: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    logout_redirect_uri: String,
    scope: String,
    token_client: reqwest::Client,
    userinfo_client: reqwest::Client,
}

impl OidcClient {
    /// Build a client from the process configuration.
    ///
    /// The token client has redirects disabled to prevent authorization
    /// code interception; both clients carry a bounded timeout so the two
    /// suspension points in the flow cannot hang a request forever.
    pub fn new(config: &Config) -> Result<Self> {
        let timeout = Duration::from_secs(HTTP_TIMEOUT_SECS);

        let token_client = reqwest::ClientBuilder::new()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let userinfo_client = reqwest::ClientBuilder::new().timeout(timeout).build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            logout_redirect_uri: config.logout_redirect_uri.clone(),
            scope: config.scope.clone(),
            token_client,
            userinfo_client,
        })
    }

    /// Authorization-request URL for the login leg.
    ///
    /// `redirect_uri` and `scope` are percent-encoded by the URL builder.
    pub fn authorize_url(&self) -> Result<String> {
        let mut url = Url::parse(&format!("{}{}", self.endpoint, PROVIDER_AUTH_PATH))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scope);
        Ok(url.into())
    }

    /// Provider logout URL, with `id_token_hint` appended iff a hint is given.
    pub fn logout_url(&self, id_token_hint: Option<&str>) -> Result<String> {
        let mut url = Url::parse(&format!("{}{}", self.endpoint, PROVIDER_LOGOUT_PATH))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("client_id", &self.client_id)
                .append_pair("post_logout_redirect_uri", &self.logout_redirect_uri);
            if let Some(hint) = id_token_hint {
                pairs.append_pair("id_token_hint", hint);
            }
        }
        Ok(url.into())
    }

    /// Exchange an authorization code for tokens.
    ///
    /// Form-encoded POST per RFC 6749 section 4.1.3. A non-2xx answer is an
    /// error carrying the upstream body for server-side logging; the caller
    /// surfaces only a generic failure to the browser.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .token_client
            .post(format!("{}{}", self.endpoint, PROVIDER_TOKEN_PATH))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AuthFlowError::TokenExchange {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch the claims object from the userinfo endpoint with bearer auth.
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<Map<String, Value>> {
        let response = self
            .userinfo_client
            .get(format!("{}{}", self.endpoint, PROVIDER_USERINFO_PATH))
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthFlowError::Userinfo {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}
