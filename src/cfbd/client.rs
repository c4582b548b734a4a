use std::time::Duration;

use log::debug;

use crate::Result;
use crate::error::Error;
use crate::table::Table;

use super::query::Query;

/// Client wraps one authenticated blocking HTTP client. The bearer
/// token is pre-formatted so it can be attached to each request as-is;
/// it is never logged.
pub struct Client {
    http: reqwest::blocking::Client,
    token: String,
}

impl Client {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Client> {
        Ok(Client {
            http: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()?,
            token: format!("Bearer {api_key}"),
        })
    }

    /// Issue the query as a single GET and normalize the JSON payload.
    /// No retries; a non-200 status or a transport failure aborts the
    /// invocation.
    pub fn fetch(&self, query: &Query) -> Result<Table> {
        self.fetch_url(&query.url())
    }

    /// Fetch from an explicit URL. Split out from [`Client::fetch`] so
    /// tests can point the client at a local stub server.
    pub fn fetch_url(&self, url: &str) -> Result<Table> {
        debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .header("Authorization", &self.token)
            .header("Accept", "application/json")
            .send()?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::ApiRequest {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = serde_json::from_str(&resp.text()?)?;
        Table::from_json(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    // One-shot HTTP stub: accept a single connection, ignore the
    // request, send the canned response, hang up.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    fn client() -> Client {
        Client::new("test-key", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn ok_response_becomes_a_table() {
        let url = serve_once(
            "200 OK",
            r#"[{"id": 1, "team": "Alabama"}, {"id": 2, "team": "Georgia"}]"#,
        );
        let table = client().fetch_url(&url).unwrap();
        assert_eq!(table.columns(), ["ID", "TEAM"]);
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn non_200_is_an_api_error() {
        let url = serve_once("404 Not Found", r#"{"message": "no such category"}"#);
        match client().fetch_url(&url) {
            Err(Error::ApiRequest { status }) => assert_eq!(status, 404),
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        // Nothing listens here; the connection is refused immediately.
        let result = client().fetch_url("http://127.0.0.1:1/games");
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn garbage_body_is_a_decode_error() {
        let url = serve_once("200 OK", "not json at all");
        assert!(matches!(client().fetch_url(&url), Err(Error::Decode(_))));
    }
}
