use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct EntryView {
    id: i64,
    timestamp: String,
    local_date: String,
    local_time: String,
}

#[derive(Debug, Deserialize)]
struct MonthView {
    year: i32,
    month: u32,
    days_in_month: u32,
    first_weekday: u32,
    counts: BTreeMap<u32, usize>,
}

#[derive(Debug, Deserialize)]
struct DayView {
    date: String,
    is_today: bool,
    entries: Vec<EntryView>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path(tag: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_{tag}_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/logs")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    let base_url = format!("http://127.0.0.1:{port}");
    let server = TestServer { base_url, child };
    wait_until_ready(&server.base_url).await;
    server
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = spawn_server(&unique_data_path("shared")).await;

    #[cfg(unix)]
    cleanup::register(server.child.id());

    let server = Arc::new(server);
    *guard = Some(Arc::clone(&server));
    server
}

async fn add_entry(client: &Client, base_url: &str) -> EntryView {
    let response = client
        .post(format!("{base_url}/api/logs"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn list_entries(client: &Client, base_url: &str) -> Vec<EntryView> {
    client
        .get(format!("{base_url}/api/logs"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn month(client: &Client, base_url: &str, year: i32, month: u32) -> MonthView {
    client
        .get(format!("{base_url}/api/month?year={year}&month={month}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn day(client: &Client, base_url: &str, date: &str) -> DayView {
    client
        .get(format!("{base_url}/api/day?date={date}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn split_date(date: &str) -> (i32, u32, u32) {
    let mut parts = date.split('-');
    let year = parts.next().unwrap().parse().unwrap();
    let month = parts.next().unwrap().parse().unwrap();
    let day = parts.next().unwrap().parse().unwrap();
    (year, month, day)
}

#[tokio::test]
async fn http_index_serves_calendar_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client.get(&server.base_url).send().await.unwrap();
    assert!(response.status().is_success());
    let body = response.text().await.unwrap();
    assert!(body.contains("calendar-grid"));
    assert!(!body.contains("{{"));
}

#[tokio::test]
async fn http_add_updates_month_and_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let created = add_entry(&client, &server.base_url).await;
    let (year, month_no, day_no) = split_date(&created.local_date);
    let before = month(&client, &server.base_url, year, month_no).await;
    let before_count = before.counts.get(&day_no).copied().unwrap_or(0);

    let second = add_entry(&client, &server.base_url).await;
    assert!(second.id > created.id);
    assert!(second.timestamp.ends_with('Z'));
    assert_eq!(second.local_time.len(), 8);

    let after = month(&client, &server.base_url, year, month_no).await;
    assert_eq!(after.year, year);
    assert_eq!(after.month, month_no);
    assert!((28..=31).contains(&after.days_in_month));
    assert!(after.first_weekday <= 6);
    if second.local_date == created.local_date {
        assert_eq!(after.counts.get(&day_no).copied(), Some(before_count + 1));
    }

    let details = day(&client, &server.base_url, &second.local_date).await;
    assert_eq!(details.date, second.local_date);
    assert!(details.is_today);
    assert_eq!(details.entries.first().map(|entry| entry.id), Some(second.id));

    let all = list_entries(&client, &server.base_url).await;
    assert_eq!(all.first().map(|entry| entry.id), Some(second.id));
}

#[tokio::test]
async fn http_delete_removes_entry() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let created = add_entry(&client, &server.base_url).await;
    let before = list_entries(&client, &server.base_url).await;

    let response = client
        .delete(format!("{}/api/logs/{}", server.base_url, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let after = list_entries(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|entry| entry.id != created.id));

    let response = client
        .delete(format!("{}/api/logs/{}", server.base_url, 999999))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(list_entries(&client, &server.base_url).await.len(), after.len());
}

#[tokio::test]
async fn http_invalid_queries_are_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    for path in [
        "/api/month?year=2024&month=13",
        "/api/month?year=2024&month=0",
        "/api/day?date=2023-02-29",
        "/api/day?date=2024-04-31",
        "/api/day?date=yesterday",
    ] {
        let response = client
            .get(format!("{}{path}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{path}");
    }

    let leap = month(&client, &server.base_url, 2024, 2).await;
    assert_eq!(leap.days_in_month, 29);
    assert_eq!(leap.first_weekday, 4);

    let empty = day(&client, &server.base_url, "1999-01-01").await;
    assert!(empty.entries.is_empty());
    assert!(!empty.is_today);
}

#[tokio::test]
async fn http_logs_survive_restart() {
    let data_path = unique_data_path("restart");
    let client = Client::new();

    let (first, second) = {
        let server = spawn_server(&data_path).await;
        let first = add_entry(&client, &server.base_url).await;
        let second = add_entry(&client, &server.base_url).await;
        (first, second)
    };

    let server = spawn_server(&data_path).await;
    let ids: Vec<i64> = list_entries(&client, &server.base_url)
        .await
        .iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);

    drop(server);
    let _ = std::fs::remove_file(&data_path);
}

#[tokio::test]
async fn http_corrupt_slot_starts_empty() {
    let data_path = unique_data_path("corrupt");
    std::fs::write(&data_path, "not json").unwrap();
    let client = Client::new();

    let server = spawn_server(&data_path).await;
    assert!(list_entries(&client, &server.base_url).await.is_empty());

    let created = add_entry(&client, &server.base_url).await;
    let stored: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&data_path).unwrap()).unwrap();
    assert_eq!(stored[0]["id"].as_i64(), Some(created.id));

    drop(server);
    let _ = std::fs::remove_file(&data_path);
}
