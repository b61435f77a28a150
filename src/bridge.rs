use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::HueError;

/// Read/write access to the bridge's REST API.
///
/// Paths are relative to the API root for the configured key, e.g. `groups`
/// or `groups/3/action`.
pub trait BridgeGateway {
    /// Absolute URL for `path`, used in requests and error reports.
    fn url(&self, path: &str) -> String;
    fn get(&self, path: &str) -> Result<Value, HueError>;
    fn put(&self, path: &str, body: &Value) -> Result<Value, HueError>;
}

/// Blocking HTTP gateway talking to a real bridge.
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &Config) -> Result<Self, HueError> {
        let base_url = config.base_url();
        // The bridge sits on the local network; never route it through a proxy.
        let client = Client::builder()
            .no_proxy()
            .timeout(config.timeout)
            .build()
            .map_err(|err| HueError::Transport {
                url: base_url.clone(),
                reason: err.to_string(),
            })?;
        Ok(Self { client, base_url })
    }

    fn send(&self, url: String, request: RequestBuilder) -> Result<Value, HueError> {
        let response = request.send().map_err(|err| HueError::Transport {
            url: url.clone(),
            reason: if err.is_timeout() {
                "request timed out".to_string()
            } else {
                err.to_string()
            },
        })?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(HueError::Api {
                url,
                status: status.as_u16(),
            });
        }
        let body: Value = response.json().map_err(|err| HueError::Malformed {
            url: url.clone(),
            reason: err.to_string(),
        })?;
        check_bridge_errors(&url, &body)?;
        Ok(body)
    }
}

impl BridgeGateway for HttpGateway {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> Result<Value, HueError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let request = self.client.get(&url);
        self.send(url, request)
    }

    fn put(&self, path: &str, body: &Value) -> Result<Value, HueError> {
        let url = self.url(path);
        debug!(%url, %body, "PUT");
        let request = self.client.put(&url).json(body);
        self.send(url, request)
    }
}

/// The bridge answers many faults with HTTP 200 and a list of
/// `{"error": {"description": ...}}` entries; turn those into errors.
pub fn check_bridge_errors(url: &str, body: &Value) -> Result<(), HueError> {
    let Some(items) = body.as_array() else {
        return Ok(());
    };
    let descriptions: Vec<String> = items
        .iter()
        .filter_map(|item| item.get("error"))
        .map(|error| {
            error
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string()
        })
        .collect();
    if descriptions.is_empty() {
        return Ok(());
    }
    Err(HueError::Rejected {
        url: url.to_string(),
        description: descriptions.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::{SocketAddr, TcpListener};
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    const URL: &str = "http://10.0.0.2/api/k/groups";

    fn gateway_for(addr: SocketAddr, timeout: Duration) -> HttpGateway {
        let config = Config {
            path: "huenix.conf".into(),
            bridge_address: addr.to_string(),
            api_key: "k".into(),
            timeout,
        };
        HttpGateway::new(&config).unwrap()
    }

    /// Answer one request with `response`; yields the request line that was received.
    fn serve_once(response: String) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0;
            loop {
                let mut header = String::new();
                reader.read_line(&mut header).unwrap();
                if header.trim().is_empty() {
                    break;
                }
                if let Some((name, value)) = header.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            request_line.trim_end().to_string()
        });
        (addr, handle)
    }

    #[test]
    fn non_200_status_is_an_api_error() {
        let (addr, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
        );
        let gateway = gateway_for(addr, Duration::from_secs(5));

        let err = gateway.get("groups/9").unwrap_err();

        assert_eq!(server.join().unwrap(), "GET /api/k/groups/9 HTTP/1.1");
        match err {
            HueError::Api { url, status } => {
                assert_eq!(url, format!("http://{addr}/api/k/groups/9"));
                assert_eq!(status, 404);
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_body_is_malformed() {
        let (addr, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot json!"
                .to_string(),
        );
        let gateway = gateway_for(addr, Duration::from_secs(5));

        let err = gateway.get("groups").unwrap_err();

        server.join().unwrap();
        match err {
            HueError::Malformed { url, .. } => assert_eq!(url, format!("http://{addr}/api/k/groups")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn put_sends_json_and_surfaces_bridge_errors() {
        let body = r#"[{"error":{"type":6,"address":"/groups/1/action/hue","description":"parameter, hue, not available"}}]"#;
        let (addr, server) = serve_once(format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ));
        let gateway = gateway_for(addr, Duration::from_secs(5));

        let err = gateway
            .put("groups/1/action", &json!({ "hue": 8000 }))
            .unwrap_err();

        assert_eq!(server.join().unwrap(), "PUT /api/k/groups/1/action HTTP/1.1");
        match err {
            HueError::Rejected { url, description } => {
                assert_eq!(url, format!("http://{addr}/api/k/groups/1/action"));
                assert_eq!(description, "parameter, hue, not available");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn closed_port_is_a_transport_error() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let gateway = gateway_for(addr, Duration::from_secs(5));

        match gateway.get("groups").unwrap_err() {
            HueError::Transport { url, .. } => assert_eq!(url, format!("http://{addr}/api/k/groups")),
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[test]
    fn silent_bridge_times_out() {
        // Connections queue in the backlog but are never answered.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let gateway = gateway_for(listener.local_addr().unwrap(), Duration::from_millis(200));

        match gateway.get("groups").unwrap_err() {
            HueError::Transport { reason, .. } => assert_eq!(reason, "request timed out"),
            other => panic!("expected Transport, got {other:?}"),
        }
        drop(listener);
    }

    #[test]
    fn success_lists_pass() {
        let body = json!([{ "success": { "/groups/1/action/on": true } }]);
        assert!(check_bridge_errors(URL, &body).is_ok());
        assert!(check_bridge_errors(URL, &json!({ "1": { "name": "Den" } })).is_ok());
    }

    #[test]
    fn error_entries_become_rejections() {
        let body = json!([
            { "success": { "/groups/1/action/on": true } },
            { "error": { "type": 6, "address": "/groups/1/action/hue", "description": "parameter, hue, not available" } },
            { "error": { "type": 1, "address": "/", "description": "unauthorized user" } },
        ]);
        match check_bridge_errors(URL, &body) {
            Err(HueError::Rejected { url, description }) => {
                assert_eq!(url, URL);
                assert_eq!(description, "parameter, hue, not available; unauthorized user");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn gateway_urls_are_rooted_at_the_key() {
        let config = Config {
            path: "huenix.conf".into(),
            bridge_address: "10.0.0.2".into(),
            api_key: "k".into(),
            timeout: crate::config::DEFAULT_TIMEOUT,
        };
        let gateway = HttpGateway::new(&config).unwrap();
        assert_eq!(gateway.url("groups/0/action"), "http://10.0.0.2/api/k/groups/0/action");
    }
}
