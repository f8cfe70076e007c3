use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use wgapi::api::transport::FORM_CONTENT_TYPE;
use wgapi::{ApiError, HttpMethod, PreparedRequest, Transport, UreqTransport};

fn http_response(status: &str, headers: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {}\r\n{}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        headers,
        body.len(),
        body
    )
}

/// Answers one connection per scripted response, in order, and returns the
/// raw requests it received.
fn scripted_server(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let mut requests = Vec::new();
        for response in responses {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0usize;

            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }

            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            request.push_str(&String::from_utf8(body).unwrap());

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            requests.push(request);
        }
        requests
    });

    (base, handle)
}

/// Serves a single HTTP exchange and returns the raw request it received.
fn one_shot_server(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let (base, server) = scripted_server(vec![http_response(status, "", body)]);
    let handle = thread::spawn(move || server.join().unwrap().remove(0));
    (base, handle)
}

#[test]
fn get_sends_query_string() {
    let (base, server) = one_shot_server("200 OK", r#"{"status":"ok"}"#);
    let request = PreparedRequest {
        method: HttpMethod::Get,
        url: format!("{}/wot/account/list/?search=timroden&application_id=K1&language=en", base),
        body: None,
    };

    let body = UreqTransport::new().send(&request).unwrap();
    assert_eq!(body, r#"{"status":"ok"}"#);

    let raw = server.join().unwrap();
    assert!(raw.starts_with(
        "GET /wot/account/list/?search=timroden&application_id=K1&language=en HTTP/1.1"
    ));
}

#[test]
fn post_sends_form_body() {
    let (base, server) = one_shot_server("200 OK", r#"{"status":"ok"}"#);
    let request = PreparedRequest {
        method: HttpMethod::Post,
        url: format!("{}/wot/account/list/", base),
        body: Some("search=timroden&application_id=K1&language=en".to_string()),
    };

    UreqTransport::new().send(&request).unwrap();

    let raw = server.join().unwrap();
    assert!(raw.starts_with("POST /wot/account/list/ HTTP/1.1"));
    assert!(raw
        .to_lowercase()
        .contains(&format!("content-type: {}", FORM_CONTENT_TYPE)));
    assert!(raw.ends_with("\r\n\r\nsearch=timroden&application_id=K1&language=en"));
}

#[test]
fn error_status_body_is_passed_through() {
    let payload = r#"{"status":"error","error":{"message":"INVALID_APPLICATION_ID","code":407}}"#;
    let (base, server) = one_shot_server("404 Not Found", payload);
    let request = PreparedRequest {
        method: HttpMethod::Get,
        url: format!("{}/wot/clan/top/?application_id=bad&language=en", base),
        body: None,
    };

    let body = UreqTransport::new().send(&request).unwrap();
    assert_eq!(body, payload);
    server.join().unwrap();
}

#[test]
fn empty_body_is_a_transport_error() {
    let (base, server) = one_shot_server("200 OK", "");
    let request = PreparedRequest {
        method: HttpMethod::Get,
        url: format!("{}/wot/clan/top/?application_id=K1&language=en", base),
        body: None,
    };

    let err = UreqTransport::new().send(&request).unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{:?}", err);
    server.join().unwrap();
}

#[test]
fn refused_connection_is_a_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let request = PreparedRequest {
        method: HttpMethod::Get,
        url: format!("http://127.0.0.1:{}/wot/clan/top/", port),
        body: None,
    };

    match UreqTransport::new().send(&request) {
        Err(ApiError::Transport { code, message }) => {
            assert!(!code.is_empty());
            assert!(!message.is_empty());
        }
        other => panic!("expected a transport error, got {:?}", other),
    }
}

#[test]
fn redirect_is_followed() {
    let (base, server) = scripted_server(vec![
        http_response("302 Found", "Location: /wot/clan/top/moved/\r\n", ""),
        http_response("200 OK", "", "ok"),
    ]);
    let request = PreparedRequest {
        method: HttpMethod::Get,
        url: format!("{}/wot/clan/top/?application_id=K1&language=en", base),
        body: None,
    };

    let body = UreqTransport::new().send(&request).unwrap();
    assert_eq!(body, "ok");

    let requests = server.join().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].starts_with("GET /wot/clan/top/?application_id=K1&language=en HTTP/1.1"));
    assert!(requests[1].starts_with("GET /wot/clan/top/moved/ HTTP/1.1"));
}
