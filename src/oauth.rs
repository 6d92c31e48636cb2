//! OAuth redirect helpers for the Google and GitHub sign-in buttons.
//!
//! Google uses the implicit flow (token returned in the URL fragment);
//! GitHub returns an authorization code in the query string. Either value
//! is handed to the gateway, which exchanges it with the backend.

#[cfg(test)]
#[path = "oauth_test.rs"]
mod oauth_test;

use reqwest::Url;

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GOOGLE_SCOPE: &str = "email profile openid";
const GITHUB_SCOPE: &str = "user:email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthConfig {
    pub google_client_id: String,
    pub github_client_id: String,
    /// Where both providers send the browser back (the login view).
    pub redirect_uri: String,
}

impl OAuthConfig {
    /// Google implicit-flow authorization URL.
    #[must_use]
    pub fn google_authorize_url(&self) -> String {
        authorize_url(
            GOOGLE_AUTHORIZE_URL,
            &[
                ("client_id", self.google_client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "token"),
                ("scope", GOOGLE_SCOPE),
            ],
        )
    }

    /// GitHub authorization-code URL.
    #[must_use]
    pub fn github_authorize_url(&self) -> String {
        authorize_url(
            GITHUB_AUTHORIZE_URL,
            &[
                ("client_id", self.github_client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", GITHUB_SCOPE),
            ],
        )
    }
}

fn authorize_url(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.into(),
        // Both bases are constants; parsing cannot fail for them.
        Err(_) => base.to_owned(),
    }
}

/// Credential carried back on the login view's redirect URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OAuthCallback {
    GithubCode(String),
    GoogleToken(String),
}

/// Extract an OAuth credential from a redirect URL.
///
/// `?code=` wins over `#access_token=` when both are present. Returns `None`
/// for unparseable URLs or URLs carrying neither parameter.
#[must_use]
pub fn parse_callback(url: &str) -> Option<OAuthCallback> {
    let url = Url::parse(url).ok()?;

    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty());
    if let Some(code) = code {
        return Some(OAuthCallback::GithubCode(code));
    }

    let hash = url.fragment()?;
    fragment::pairs(hash)
        .into_iter()
        .find(|(k, _)| k == "access_token")
        .map(|(_, v)| v)
        .filter(|v| !v.is_empty())
        .map(OAuthCallback::GoogleToken)
}

mod fragment {
    use reqwest::Url;

    /// Decode `a=b&c=d` pairs by reusing the query parser on a scratch URL.
    pub(super) fn pairs(raw: &str) -> Vec<(String, String)> {
        let Ok(mut scratch) = Url::parse("http://localhost/") else {
            return Vec::new();
        };
        scratch.set_query(Some(raw));
        scratch
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}
