use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use colors_helper::{ColorStore, ColorsError, Fetcher, HttpFetcher, Rgb, StoreConfig};
use tempfile::tempdir;

const PALETTE_CSV: &str = "Name,R,G,B,Hex Code\n\
    Red,255,59,48,#FF3B30\n\
    Light Red,255,129,118,#FF8176\n\
    Green,52,199,89,#34C759\n";

/// Answers a single request on a loopback port with a canned response.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line).expect("read request");
            if read == 0 || line == "\r\n" {
                break;
            }
        }

        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .expect("write response");
    });

    (format!("http://{addr}/good_colors.csv"), handle)
}

#[test]
fn http_fetcher_writes_response_body() {
    let (url, server) = serve_once("200 OK", PALETTE_CSV);
    let dir = tempdir().expect("tempdir");
    let dest = dir.path().join("download.csv");

    let written = HttpFetcher::new().fetch_to(&url, &dest).expect("fetch");
    server.join().expect("server thread");

    assert_eq!(written, PALETTE_CSV.len() as u64);
    assert_eq!(fs::read_to_string(&dest).unwrap(), PALETTE_CSV);
}

#[test]
fn http_fetcher_reports_error_status() {
    let (url, server) = serve_once("404 Not Found", "missing");
    let dir = tempdir().expect("tempdir");

    let err = HttpFetcher::new()
        .fetch_to(&url, &dir.path().join("download.csv"))
        .expect_err("404 should fail");
    server.join().expect("server thread");

    match err {
        ColorsError::Network { url: failed, reason } => {
            assert_eq!(failed, url);
            assert!(reason.contains("404"), "reason was {reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn http_fetcher_with_timeout_fetches_prompt_response() {
    let (url, server) = serve_once("200 OK", PALETTE_CSV);
    let dir = tempdir().expect("tempdir");
    let dest = dir.path().join("download.csv");

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(5));
    let written = fetcher.fetch_to(&url, &dest).expect("fetch");
    server.join().expect("server thread");

    assert_eq!(written, PALETTE_CSV.len() as u64);
}

#[test]
fn http_fetcher_with_timeout_gives_up_on_silent_server() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let url = format!("http://{}/good_colors.csv", listener.local_addr().unwrap());
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        thread::sleep(Duration::from_millis(1_500));
        drop(stream);
    });
    let dir = tempdir().expect("tempdir");

    let started = Instant::now();
    let err = HttpFetcher::with_timeout(Duration::from_millis(200))
        .fetch_to(&url, &dir.path().join("download.csv"))
        .expect_err("request should time out");
    let elapsed = started.elapsed();
    server.join().expect("server thread");

    assert!(matches!(err, ColorsError::Network { .. }), "got {err:?}");
    assert!(elapsed < Duration::from_millis(1_500), "took {elapsed:?}");
}

#[test]
fn color_store_over_http() {
    let (url, server) = serve_once("200 OK", PALETTE_CSV);
    let dir = tempdir().expect("tempdir");
    let config = StoreConfig::default()
        .with_url(url)
        .with_csv_path(dir.path().join("good_colors.csv"));
    let mut store = ColorStore::with_fetcher(config, HttpFetcher::new());

    assert_eq!(store.name2rgb("green").unwrap(), Rgb::new(52, 199, 89));
    server.join().expect("server thread");

    // Served once; later calls must come from the cache.
    assert_eq!(store.name2hexcode("RED").unwrap(), "#FF3B30");
    assert_eq!(store.colors().unwrap(), ["Red", "Green"]);
}
