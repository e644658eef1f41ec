use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use snake_arcade::error::LeaderboardError;
use snake_arcade::leaderboard::{
    LeaderboardClient, LeaderboardConfig, LeaderboardEntry, LeaderboardPanel, LeaderboardTasks,
    ReplyKind,
};

/// What the fake service saw
struct Recorded {
    request_line: String,
    body: String,
}

/// Serve exactly one request with a canned status and body
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Recorded>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }

        let mut body_bytes = vec![0; content_length];
        reader.read_exact(&mut body_bytes).unwrap();

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();

        Recorded {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8(body_bytes).unwrap(),
        }
    });

    (base_url, handle)
}

fn client(base_url: &str) -> LeaderboardClient {
    LeaderboardClient::new(&LeaderboardConfig {
        enabled: true,
        base_url: base_url.to_string(),
        timeout_ms: 2_000,
    })
}

/// A port nothing listens on
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}

#[test]
fn fetch_returns_entries_in_server_order() {
    let (base_url, server) = serve_once("200 OK", r#"[["Alice",5],["Bob",3]]"#);

    let entries = client(&base_url).fetch().unwrap();
    let recorded = server.join().unwrap();

    assert_eq!(recorded.request_line, "GET /leaderboard HTTP/1.1");
    assert_eq!(
        entries,
        vec![
            LeaderboardEntry("Alice".to_string(), 5),
            LeaderboardEntry("Bob".to_string(), 3),
        ]
    );

    let mut panel = LeaderboardPanel::new();
    panel.apply_fetch(Ok(entries));
    assert_eq!(panel.lines(), vec!["Alice: 5", "Bob: 3"]);
}

#[test]
fn submit_posts_name_and_score() {
    let (base_url, server) = serve_once("200 OK", "{}");

    client(&format!("{base_url}/")).submit("Alice", 12).unwrap();
    let recorded = server.join().unwrap();

    assert_eq!(recorded.request_line, "POST /submit HTTP/1.1");
    let body: serde_json::Value = serde_json::from_str(&recorded.body).unwrap();
    assert_eq!(body, serde_json::json!({"name": "Alice", "score": 12}));
}

#[test]
fn server_error_status_is_a_failure() {
    let (base_url, server) = serve_once("500 Internal Server Error", "{}");

    let result = client(&base_url).submit("Bob", 1);
    server.join().unwrap();

    assert!(matches!(result, Err(LeaderboardError::Http(_))));

    let mut panel = LeaderboardPanel::new();
    panel.apply_submit(result);
    assert_eq!(panel.status(), Some("Failed to submit score."));
}

#[test]
fn malformed_leaderboard_is_a_failure() {
    let (base_url, server) = serve_once("200 OK", r#"{"not": "a list"}"#);

    let result = client(&base_url).fetch();
    server.join().unwrap();

    assert!(result.is_err());

    let mut panel = LeaderboardPanel::new();
    panel.apply_fetch(result);
    assert_eq!(panel.lines(), vec!["Failed to load leaderboard."]);
}

#[test]
fn unreachable_service_is_a_failure() {
    let client = client(&closed_port_url());

    assert!(client.fetch().is_err());
    assert!(client.submit("Carol", 4).is_err());
}

#[tokio::test]
async fn background_fetch_reports_with_generation() {
    let (base_url, server) = serve_once("200 OK", r#"[["Zed",9]]"#);
    let (mut tasks, mut replies) = LeaderboardTasks::new(Some(client(&base_url)));

    assert!(tasks.spawn_fetch(4));
    let reply = tokio::time::timeout(Duration::from_secs(5), replies.recv())
        .await
        .expect("reply in time")
        .expect("channel open");
    server.join().unwrap();

    assert_eq!(reply.generation, 4);
    match reply.kind {
        ReplyKind::Fetched(Ok(entries)) => {
            assert_eq!(entries, vec![LeaderboardEntry("Zed".to_string(), 9)]);
        }
        other => panic!("unexpected reply: {other:?}"),
    }
}

#[tokio::test]
async fn background_submit_failure_is_reported_not_raised() {
    let (mut tasks, mut replies) = LeaderboardTasks::new(Some(client(&closed_port_url())));

    assert!(tasks.spawn_submit(1, "Dana".to_string(), 2));
    let reply = tokio::time::timeout(Duration::from_secs(5), replies.recv())
        .await
        .expect("reply in time")
        .expect("channel open");

    assert!(matches!(reply.kind, ReplyKind::Submitted(Err(_))));
}
