use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use chrono::{DateTime, Days, Local};
use daywords::{
    journal::service::EntryService,
    server::{build_router, storage::entry_store::SqliteEntryStore, AppState},
    utils::clock::DefaultClock,
};
use serde_json::Value;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn journal_service(dir: &TempDir) -> EntryService {
    let store = SqliteEntryStore::open(&dir.path().join("journal.db")).expect("open store");
    EntryService::new(Box::new(store), Box::new(DefaultClock), 900)
}

async fn spawn_app(service: EntryService) -> SocketAddr {
    let app = build_router(AppState {
        service: Arc::new(service),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");

    let request = match body {
        Some(body) => format!(
            "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        ),
        None => format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n"),
    };
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");

    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("status line");
    (status, head.to_string(), body.to_string())
}

#[tokio::test]
async fn saving_then_rendering_today_shows_the_entry() -> Result<()> {
    let dir = TempDir::new()?;
    let addr = spawn_app(journal_service(&dir)).await;

    let (status, _, body) =
        send_raw(addr, "POST", "/save", Some(r#"{"text": "hello world"}"#)).await;
    assert_eq!(status, 200);

    let saved: Value = serde_json::from_str(&body)?;
    assert_eq!(saved["message"], "saved post");
    DateTime::parse_from_rfc3339(saved["time"].as_str().expect("time field"))?;

    let (status, _, body) = send_raw(addr, "GET", "/", None).await;
    assert_eq!(status, 200);
    assert!(body.contains("hello world"));
    assert!(body.contains("2 words"));
    Ok(())
}

#[tokio::test]
async fn a_future_day_redirects_to_today() -> Result<()> {
    let dir = TempDir::new()?;
    let addr = spawn_app(journal_service(&dir)).await;

    let (status, head, _) = send_raw(addr, "GET", "/day/2099-01-01", None).await;

    assert_eq!(status, 307);
    assert!(head.to_lowercase().contains("location: /"));
    Ok(())
}

#[tokio::test]
async fn todays_date_is_only_served_at_the_canonical_url() -> Result<()> {
    let dir = TempDir::new()?;
    let addr = spawn_app(journal_service(&dir)).await;
    let today = Local::now().date_naive();

    let (status, head, _) =
        send_raw(addr, "GET", &format!("/day/{}", today.format("%Y-%m-%d")), None).await;

    assert_eq!(status, 307);
    assert!(head.to_lowercase().contains("location: /"));
    Ok(())
}

#[tokio::test]
async fn an_unparseable_date_is_not_found() -> Result<()> {
    let dir = TempDir::new()?;
    let addr = spawn_app(journal_service(&dir)).await;

    let (status, _, body) = send_raw(addr, "GET", "/day/not-a-date", None).await;

    assert_eq!(status, 404);
    assert!(body.contains("not-a-date"));
    Ok(())
}

#[tokio::test]
async fn saving_without_the_text_field_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let addr = spawn_app(journal_service(&dir)).await;

    let (status, _, body) = send_raw(addr, "POST", "/save", Some("{}")).await;

    assert_eq!(status, 400);
    assert!(body.contains(r#"{"error":"Missing field 'text'"}"#));
    Ok(())
}

#[tokio::test]
async fn saving_a_malformed_body_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let addr = spawn_app(journal_service(&dir)).await;

    let (status, _, body) = send_raw(addr, "POST", "/save", Some("not json")).await;

    assert_eq!(status, 400);
    assert!(body.contains("error"));
    Ok(())
}

#[tokio::test]
async fn a_backfilled_past_day_renders_read_only() -> Result<()> {
    let dir = TempDir::new()?;
    let service = journal_service(&dir);
    let yesterday = Local::now()
        .date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap();
    service
        .import_entry(yesterday, "words from yesterday".into())
        .await?;
    let addr = spawn_app(service).await;

    let (status, _, body) = send_raw(
        addr,
        "GET",
        &format!("/day/{}", yesterday.format("%Y-%m-%d")),
        None,
    )
    .await;

    assert_eq!(status, 200);
    assert!(body.contains("words from yesterday"));
    assert!(body.contains("<textarea disabled"));
    assert!(body.contains("This day is over"));
    Ok(())
}
