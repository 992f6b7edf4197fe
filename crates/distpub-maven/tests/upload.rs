use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

use distpub_core::publish::RepositoryTarget;
use distpub_maven::checksum::{checksum_headers, SHA1_HEADER};
use distpub_maven::repository::ArtifactoryRepository;
use distpub_maven::upload::{HttpTransport, TransportError, UploadRequest, UploadTransport};

const ARTIFACT_PATH: &str = "com/test/group/foo/1.0.0/foo-1.0.0-linux-amd64.tgz";

/// One HTTP request as seen by the server.
struct Received {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Received {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Accept a single connection on 127.0.0.1, answer it with `status`, and
/// hand back what was received.
fn serve_once(status: &'static str) -> (String, thread::JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            let (name, value) = line.split_once(':').unwrap();
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }

        let len = headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
            .map(|(_, v)| v.parse::<usize>().unwrap())
            .unwrap_or(0);
        let mut body = vec![0; len];
        reader.read_exact(&mut body).unwrap();

        write!(
            stream,
            "HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
        )
        .unwrap();
        stream.flush().unwrap();

        Received {
            request_line: request_line.trim_end().to_string(),
            headers,
            body,
        }
    });

    (format!("http://{addr}"), handle)
}

fn transport(base_url: &str, username: &str, password: &str) -> (HttpTransport, String) {
    let repo = ArtifactoryRepository::from_target(&RepositoryTarget {
        base_url: base_url.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        repository: "testRepo".to_string(),
    });
    let url = repo.file_url(ARTIFACT_PATH);
    let client = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    (HttpTransport::with_client(client, repo), url)
}

fn request(url: &str, body: &[u8]) -> UploadRequest {
    UploadRequest {
        url: url.to_string(),
        body: body.to_vec(),
        headers: checksum_headers(body),
    }
}

#[test]
fn test_put_sends_body_auth_and_checksums() {
    let (base, server) = serve_once("201 Created");
    let (transport, url) = transport(&base, "testUsername", "testPassword");

    transport.put(&request(&url, b"archive bytes")).unwrap();

    let received = server.join().unwrap();
    assert_eq!(
        received.request_line,
        format!("PUT /artifactory/testRepo/{ARTIFACT_PATH} HTTP/1.1")
    );
    assert_eq!(
        received.header("authorization"),
        Some("Basic dGVzdFVzZXJuYW1lOnRlc3RQYXNzd29yZA==")
    );
    assert_eq!(received.body, b"archive bytes");
    assert_eq!(
        received.header(SHA1_HEADER),
        Some(checksum_headers(b"archive bytes")[0].1.as_str())
    );
}

#[test]
fn test_put_with_username_only() {
    let (base, server) = serve_once("200 OK");
    let (transport, url) = transport(&base, "testUsername", "");

    transport.put(&request(&url, b"x")).unwrap();

    let received = server.join().unwrap();
    assert_eq!(
        received.header("authorization"),
        Some("Basic dGVzdFVzZXJuYW1lOg==")
    );
}

#[test]
fn test_put_without_credentials_sends_no_auth() {
    let (base, server) = serve_once("200 OK");
    let (transport, url) = transport(&base, "", "");

    transport.put(&request(&url, b"x")).unwrap();

    let received = server.join().unwrap();
    assert_eq!(received.header("authorization"), None);
}

#[test]
fn test_server_error_is_status() {
    let (base, server) = serve_once("500 Internal Server Error");
    let (transport, url) = transport(&base, "testUsername", "testPassword");

    let err = transport.put(&request(&url, b"x")).unwrap_err();
    server.join().unwrap();

    match err {
        TransportError::Status { status } => assert_eq!(status, "500 Internal Server Error"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unreachable_server_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let (transport, url) = transport(&base, "", "");

    let err = transport.put(&request(&url, b"x")).unwrap_err();
    assert!(matches!(err, TransportError::Request(_)), "got: {err}");
}
