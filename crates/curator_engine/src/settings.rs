use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    server_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_content_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl ClientSettings {
    /// Settings for `server_url`; a trailing `/` is dropped so paths can be appended verbatim.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: normalize_server_url(server_url.into()),
            ..Self::default()
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub(crate) fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_content_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: concat!("curator/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

fn normalize_server_url(raw: String) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => trimmed.to_string(),
    }
}
