//! Named building blocks referenced by the settings: installed applications, the middleware
//! stack, template context processors, password validators and authentication backends.
//!
//! Each enum carries the dotted module path it is known by in the contest project, so the
//! resolved settings can be reported and compared with deployments verbatim.

use serde::Serialize;
use std::fmt;

macro_rules! named_component {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $path:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $path)] $variant, )+
        }

        impl $name {
            /// Dotted path of the component.
            #[must_use]
            pub const fn path(self) -> &'static str {
                match self {
                    $( Self::$variant => $path, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.path())
            }
        }
    };
}

named_component! {
    /// Applications registered with the service.
    pub enum App {
        Quiz => "quiz.apps.QuizConfig",
        QuizTemplateTags => "quiz.templatetags",
        Humanize => "django.contrib.humanize",
        Admin => "django.contrib.admin",
        Auth => "django.contrib.auth",
        ContentTypes => "django.contrib.contenttypes",
        Sessions => "django.contrib.sessions",
        Messages => "django.contrib.messages",
        StaticFiles => "django.contrib.staticfiles",
        Cas => "django_cas_ng",
        /// Carries template tags, so it stays installed even without a frontend build.
        Tailwind => "tailwind",
        Theme => "theme",
        Js => "js",
        /// Development only.
        BrowserReload => "django_browser_reload",
    }
}

named_component! {
    /// Request middleware, listed outermost first.
    pub enum Middleware {
        Security => "django.middleware.security.SecurityMiddleware",
        Sessions => "django.contrib.sessions.middleware.SessionMiddleware",
        Common => "django.middleware.common.CommonMiddleware",
        Csrf => "django.middleware.csrf.CsrfViewMiddleware",
        Authentication => "django.contrib.auth.middleware.AuthenticationMiddleware",
        Messages => "django.contrib.messages.middleware.MessageMiddleware",
        Clickjacking => "django.middleware.clickjacking.XFrameOptionsMiddleware",
        /// Development only.
        BrowserReload => "django_browser_reload.middleware.BrowserReloadMiddleware",
        Cas => "django_cas_ng.middleware.CASMiddleware",
    }
}

named_component! {
    /// Template context processors.
    pub enum ContextProcessor {
        Debug => "django.template.context_processors.debug",
        Request => "django.template.context_processors.request",
        Auth => "django.contrib.auth.context_processors.auth",
        Messages => "django.contrib.messages.context_processors.messages",
    }
}

named_component! {
    /// Password validators applied to local accounts.
    pub enum PasswordValidator {
        UserAttributeSimilarity => "django.contrib.auth.password_validation.UserAttributeSimilarityValidator",
        MinimumLength => "django.contrib.auth.password_validation.MinimumLengthValidator",
        CommonPassword => "django.contrib.auth.password_validation.CommonPasswordValidator",
        Numeric => "django.contrib.auth.password_validation.NumericPasswordValidator",
    }
}

named_component! {
    /// Authentication backends, tried in order.
    pub enum AuthBackend {
        Model => "django.contrib.auth.backends.ModelBackend",
        Cas => "quiz.auth_backends.CASBackend",
    }
}

named_component! {
    /// Database engines.
    pub enum DatabaseEngine {
        Sqlite => "django.db.backends.sqlite3",
    }
}

impl Middleware {
    /// Whether the HTTP layer enforces this middleware itself.
    ///
    /// The remaining entries are handled by the quiz application layer.
    #[must_use]
    pub const fn is_http_layer(self) -> bool {
        matches!(self, Self::Security | Self::Common | Self::Csrf | Self::Clickjacking)
    }

    /// Whether the entry is only present in development mode.
    #[must_use]
    pub const fn is_debug_only(self) -> bool {
        matches!(self, Self::BrowserReload)
    }
}

impl App {
    /// Whether the entry is only present in development mode.
    #[must_use]
    pub const fn is_debug_only(self) -> bool {
        matches!(self, Self::BrowserReload)
    }
}
