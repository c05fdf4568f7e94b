//! URLs for the CAS single sign-on server.

use contest_domain::settings::CasSettings;
use std::borrow::Cow;
use url::Url;

#[contest_derive::contest_error]
pub enum CasError {
    #[error("CAS url error{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },
}

/// URL builder over a configured CAS server.
#[derive(Debug, Clone)]
pub struct CasUrls {
    server: Url,
}

impl CasUrls {
    /// # Errors
    /// Returns [`CasError::Url`] if the configured server URL is not absolute.
    pub fn new(settings: &CasSettings) -> Result<Self, CasError> {
        let mut server = Url::parse(&settings.server_url).context("Parsing CAS server url")?;
        if !server.path().ends_with('/') {
            let path = format!("{}/", server.path());
            server.set_path(&path);
        }
        Ok(Self { server })
    }

    #[must_use]
    pub const fn server(&self) -> &Url {
        &self.server
    }

    /// Login page that sends the user back to `service` after authentication.
    ///
    /// # Errors
    /// Returns [`CasError::Url`] if the server URL cannot be joined.
    pub fn login(&self, service: &str) -> Result<Url, CasError> {
        let mut url = self.server.join("login").context("Joining CAS login path")?;
        url.query_pairs_mut().append_pair("service", service);
        Ok(url)
    }

    /// Logout page, optionally redirecting to `service` afterwards.
    ///
    /// # Errors
    /// Returns [`CasError::Url`] if the server URL cannot be joined.
    pub fn logout(&self, service: Option<&str>) -> Result<Url, CasError> {
        let mut url = self.server.join("logout").context("Joining CAS logout path")?;
        if let Some(service) = service {
            url.query_pairs_mut().append_pair("service", service);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contest_domain::settings::AuthSettings;

    fn urls() -> CasUrls {
        CasUrls::new(&CasSettings::for_auth(&AuthSettings::default())).expect("valid server")
    }

    #[test]
    fn login_url_keeps_server_path_and_encodes_service() {
        let url = urls().login("https://contest.bitnp.net/quiz/?a=1&b=2").expect("login url");
        assert_eq!(
            url.as_str(),
            "https://login.bit.edu.cn/devcas/login?service=https%3A%2F%2Fcontest.bitnp.net%2Fquiz%2F%3Fa%3D1%26b%3D2"
        );
    }

    #[test]
    fn logout_url_with_and_without_service() {
        let cas = urls();
        assert_eq!(cas.logout(None).expect("url").as_str(), "https://login.bit.edu.cn/devcas/logout");
        assert!(cas.logout(Some("https://contest.bitnp.net/")).expect("url").query().is_some());
    }

    #[test]
    fn server_without_trailing_slash_is_normalized() {
        let settings = CasSettings {
            server_url: "https://cas.example.edu/cas".to_owned(),
            ..CasSettings::for_auth(&AuthSettings::default())
        };
        let cas = CasUrls::new(&settings).expect("valid");
        assert_eq!(cas.login("x").expect("url").path(), "/cas/login");
    }

    #[test]
    fn relative_server_url_is_rejected() {
        let settings = CasSettings {
            server_url: "devcas/".to_owned(),
            ..CasSettings::for_auth(&AuthSettings::default())
        };
        assert!(matches!(CasUrls::new(&settings), Err(CasError::Url { .. })));
    }
}
