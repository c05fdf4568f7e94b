use crate::cas::{CasError, CasUrls};
use crate::security::{AllowedHosts, TrustedOrigins};
use crate::settings::effective_allowed_hosts;
use axum::extract::FromRef;
use contest_domain::settings::Settings;
use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;

#[contest_derive::contest_error]
pub enum ApiStateError {
    #[error("State validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    #[error("State CAS error{}: {source}", format_context(.context))]
    Cas { source: CasError, context: Option<Cow<'static, str>> },
}

#[derive(Debug)]
pub struct ApiStateInner {
    pub settings: Arc<Settings>,
    pub allowed_hosts: AllowedHosts,
    pub trusted_origins: TrustedOrigins,
    pub cas: CasUrls,
    /// Requests arrive over TLS terminated by this process.
    pub secure: bool,
    pub started: Instant,
}

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    #[must_use]
    pub fn builder() -> ApiStateBuilder {
        ApiStateBuilder::default()
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FromRef<ApiState> for Arc<Settings> {
    fn from_ref(state: &ApiState) -> Self {
        state.inner.settings.clone()
    }
}

#[derive(Debug, Default)]
pub struct ApiStateBuilder {
    settings: Option<Arc<Settings>>,
    secure: bool,
}

impl ApiStateBuilder {
    #[must_use]
    pub fn settings(mut self, settings: impl Into<Arc<Settings>>) -> Self {
        self.settings = Some(settings.into());
        self
    }

    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Compiles the host and origin policies from the settings.
    ///
    /// # Errors
    /// Returns [`ApiStateError::Validation`] without settings, or [`ApiStateError::Cas`] when
    /// the CAS server url is unusable.
    pub fn build(self) -> Result<ApiState, ApiStateError> {
        let settings = self.settings.ok_or_else(|| ApiStateError::Validation {
            message: "Settings not provided".into(),
            context: None,
        })?;

        let allowed_hosts = AllowedHosts::new(effective_allowed_hosts(&settings));
        let trusted_origins = TrustedOrigins::new(&settings.csrf_trusted_origins);
        let cas = CasUrls::new(&settings.cas).context("Compiling CAS urls")?;

        Ok(ApiState {
            inner: Arc::new(ApiStateInner {
                settings,
                allowed_hosts,
                trusted_origins,
                cas,
                secure: self.secure,
                started: Instant::now(),
            }),
        })
    }
}
