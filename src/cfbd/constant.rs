const BASE_URL: &str = "https://api.collegefootballdata.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub fn category_url(category: &str) -> String {
    format!("{BASE_URL}/{category}")
}
