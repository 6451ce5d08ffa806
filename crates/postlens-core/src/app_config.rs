use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub ig_username: String,
    pub ig_password: String,
    pub session_file: PathBuf,
    pub target_username: Option<String>,
    pub api_base_url: String,
    pub posts_to_fetch: usize,
    pub min_hashtag_occurrences: usize,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("ig_username", &self.ig_username)
            .field("ig_password", &"[redacted]")
            .field("session_file", &self.session_file)
            .field("target_username", &self.target_username)
            .field("api_base_url", &self.api_base_url)
            .field("posts_to_fetch", &self.posts_to_fetch)
            .field("min_hashtag_occurrences", &self.min_hashtag_occurrences)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .finish()
    }
}
