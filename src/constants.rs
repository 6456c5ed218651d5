pub mod api {
    pub const BASE_URL: &str = "https://api.openshift.com/api/assisted-install/v2";
}

pub mod sso {
    pub const TOKEN_URL: &str =
        "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";
    pub const CLIENT_ID: &str = "cloud-services";
    pub const GRANT_TYPE: &str = "refresh_token";
}

pub mod env {
    pub const API_TOKEN: &str = "AI_API_TOKEN";
    pub const OFFLINE_TOKEN: &str = "AI_OFFLINE_TOKEN";
    pub const PULL_SECRET: &str = "AI_PULL_SECRET";
    pub const API_URL: &str = "AI_API_URL";
    pub const SSO_URL: &str = "AI_SSO_URL";
    pub const TIMEOUT_MS: &str = "AI_TIMEOUT_MS";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
}

pub mod limits {
    pub const LOG_BODY_LENGTH: usize = 512;
    pub const SUGGESTION_LIMIT: usize = 3;
}

pub mod protocols {
    pub const ALLOWED_HTTP: &[&str] = &["http:", "https:"];
}
