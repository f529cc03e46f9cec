//! A local HTTP/1.1 server answering scripted responses, one connection per request.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

use reqwest::Url;

use crate::client::Client;
use crate::credentials::SolverAiCredentials;

pub(crate) const TOKEN: &str = "secret";

pub(crate) struct StubResponse {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl StubResponse {
    pub(crate) fn json(status: u16, body: serde_json::Value) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    pub(crate) fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/html",
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("Should be a JSON body")
    }

    pub(crate) fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub(crate) struct StubServer {
    url: Url,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl StubServer {
    /// Serve `responses` in order, then stop accepting connections.
    pub(crate) fn start(responses: Vec<StubResponse>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind a local port");
        let address = listener.local_addr().expect("Should have a local address");
        let handle = std::thread::spawn(move || {
            responses
                .into_iter()
                .map(|response| {
                    let (stream, _) = listener.accept().expect("Should accept a connection");
                    serve(stream, response)
                })
                .collect()
        });
        Self {
            url: format!("http://{address}/")
                .parse()
                .expect("Should be a valid url"),
            handle,
        }
    }

    pub(crate) fn client(&self) -> Client {
        let http_client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .expect("Should build the http client");
        Client::with_http_client(http_client, self.url.clone(), SolverAiCredentials::new(TOKEN))
    }

    /// Wait until every scripted response is sent and return the requests received.
    pub(crate) fn requests(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("Stub server should not panic")
    }
}

fn serve(stream: TcpStream, response: StubResponse) -> RecordedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("Should clone the stream"));

    let request_line = read_line(&mut reader);
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut headers = Vec::new();
    loop {
        let line = read_line(&mut reader);
        if line.is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            headers.push((key.trim().to_string(), value.trim().to_string()));
        }
    }

    let mut request = RecordedRequest {
        method,
        path,
        headers,
        body: Vec::new(),
    };
    if let Some(length) = request.header("content-length") {
        let length: usize = length.parse().expect("Should be a valid content length");
        request.body = vec![0; length];
        reader
            .read_exact(&mut request.body)
            .expect("Should read the body");
    } else if request
        .header("transfer-encoding")
        .is_some_and(|encoding| encoding.eq_ignore_ascii_case("chunked"))
    {
        request.body = read_chunked(&mut reader);
    }

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Stub\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        response.content_type,
        response.body.len(),
        response.body
    )
    .expect("Should write the response");
    stream.flush().expect("Should flush the response");
    request
}

fn read_line(reader: &mut impl BufRead) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).expect("Should read a line");
    line.trim_end_matches(['\r', '\n']).to_string()
}

fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
    let mut body = Vec::new();
    loop {
        let size_line = read_line(reader);
        let size = usize::from_str_radix(size_line.split(';').next().unwrap_or("0").trim(), 16)
            .expect("Should be a chunk size");
        if size == 0 {
            read_line(reader);
            return body;
        }
        let mut chunk = vec![0; size];
        reader.read_exact(&mut chunk).expect("Should read a chunk");
        body.extend_from_slice(&chunk);
        read_line(reader);
    }
}
