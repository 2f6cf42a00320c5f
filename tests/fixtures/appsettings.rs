// @generated by json-settings-gen. Do not edit.

pub mod app_settings {
    #![allow(dead_code, non_camel_case_types, clippy::all)]

    /// Colon-addressed configuration source the accessors read from.
    pub trait ConfigProvider {
        /// Raw value at `path`, if set.
        fn get(&self, path: &str) -> Option<String>;

        /// Values of the direct children of `path`, in order. Empty if unset.
        fn children(&self, path: &str) -> Vec<String>;
    }

    /// Typed view over the whole configuration document.
    #[derive(Clone, Copy)]
    pub struct AppSettings<'a> {
        provider: &'a dyn ConfigProvider,
    }

    impl<'a> AppSettings<'a> {
        pub fn new(provider: &'a dyn ConfigProvider) -> Self {
            Self { provider }
        }

        /// Configuration section: "ConnectionStrings"
        pub fn connection_strings(&self) -> ConnectionStringsSettings<'a> {
            ConnectionStringsSettings { provider: self.provider }
        }

        /// Configuration section: "Logging"
        pub fn logging(&self) -> LoggingSettings<'a> {
            LoggingSettings { provider: self.provider }
        }

        /// Configuration section: "ApiSettings"
        pub fn api_settings(&self) -> ApiSettingsSettings<'a> {
            ApiSettingsSettings { provider: self.provider }
        }

        /// Configuration key: "FeatureFlags"
        pub fn feature_flags(&self) -> Vec<String> {
            self.provider.children("FeatureFlags")
        }

        /// Configuration key: "AllowedHosts"
        pub fn allowed_hosts(&self) -> String {
            self.provider.get("AllowedHosts").unwrap_or_default()
        }
    }

    /// Accessors under "ConnectionStrings".
    #[derive(Clone, Copy)]
    pub struct ConnectionStringsSettings<'a> {
        provider: &'a dyn ConfigProvider,
    }

    impl<'a> ConnectionStringsSettings<'a> {
        /// Configuration key: "ConnectionStrings:DefaultConnection"
        pub fn default_connection(&self) -> String {
            self.provider.get("ConnectionStrings:DefaultConnection").unwrap_or_default()
        }

        /// Configuration key: "ConnectionStrings:Redis"
        pub fn redis(&self) -> String {
            self.provider.get("ConnectionStrings:Redis").unwrap_or_default()
        }
    }

    /// Accessors under "Logging".
    #[derive(Clone, Copy)]
    pub struct LoggingSettings<'a> {
        provider: &'a dyn ConfigProvider,
    }

    impl<'a> LoggingSettings<'a> {
        /// Configuration section: "Logging:LogLevel"
        pub fn log_level(&self) -> LoggingLogLevelSettings<'a> {
            LoggingLogLevelSettings { provider: self.provider }
        }
    }

    /// Accessors under "Logging:LogLevel".
    #[derive(Clone, Copy)]
    pub struct LoggingLogLevelSettings<'a> {
        provider: &'a dyn ConfigProvider,
    }

    impl<'a> LoggingLogLevelSettings<'a> {
        /// Configuration key: "Logging:LogLevel:Default"
        pub fn default(&self) -> String {
            self.provider.get("Logging:LogLevel:Default").unwrap_or_default()
        }

        /// Configuration key: "Logging:LogLevel:Microsoft.AspNetCore"
        pub fn microsoft_asp_net_core(&self) -> String {
            self.provider.get("Logging:LogLevel:Microsoft.AspNetCore").unwrap_or_default()
        }

        /// Value by exact key name, for keys whose accessor name differs from the key.
        pub fn get(&self, key: &str) -> String {
            self.provider.get(&["Logging:LogLevel:", key].concat()).unwrap_or_default()
        }
    }

    /// Accessors under "ApiSettings".
    #[derive(Clone, Copy)]
    pub struct ApiSettingsSettings<'a> {
        provider: &'a dyn ConfigProvider,
    }

    impl<'a> ApiSettingsSettings<'a> {
        /// Configuration key: "ApiSettings:BaseUrl"
        pub fn base_url(&self) -> String {
            self.provider.get("ApiSettings:BaseUrl").unwrap_or_default()
        }

        /// Configuration key: "ApiSettings:Timeout"
        pub fn timeout(&self) -> i32 {
            self.provider.get("ApiSettings:Timeout").and_then(|v| v.trim().parse().ok()).unwrap_or(0)
        }

        /// Configuration key: "ApiSettings:RetryCount"
        pub fn retry_count(&self) -> i32 {
            self.provider.get("ApiSettings:RetryCount").and_then(|v| v.trim().parse().ok()).unwrap_or(0)
        }

        /// Configuration key: "ApiSettings:EnableCaching"
        pub fn enable_caching(&self) -> bool {
            self.provider.get("ApiSettings:EnableCaching").is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
        }

        /// Configuration key: "ApiSettings:BackoffFactor"
        pub fn backoff_factor(&self) -> f64 {
            self.provider.get("ApiSettings:BackoffFactor").and_then(|v| v.trim().parse().ok()).unwrap_or(0.0)
        }
    }
}
