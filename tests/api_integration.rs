#![cfg(feature = "api")]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

const ZONE_KEYS: &[&str] = &[
    "zone",
    "displayName",
    "population",
    "status",
    "latency",
    "download",
    "upload",
    "packetLoss",
    "jitter",
    "retransmissionRate",
    "connectionDropRate",
    "voiceQuality",
    "videoQuality",
    "infrastructureHealth",
    "congestionLevel",
    "activeTowers",
    "totalTowers",
    "powerAvailability",
    "predictedOutageRisk",
    "distanceToStorm",
    "floodRisk",
    "estimatedRepairTime",
];

struct ChildGuard {
    child: Child,
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn served_clock_continues_after_batch_run() {
    let port = allocate_port();
    let _child = spawn_api_process(port);
    let addr = format!("127.0.0.1:{port}");

    wait_for_server(&addr, Duration::from_secs(8));

    let (status, body) = http_request(&addr, "GET", "/status", None)
        .expect("/status request should succeed");
    assert_eq!(status, 200);

    let snapshot: Value = serde_json::from_str(&body).expect("status body should be JSON object");
    // 5 batch ticks plus the readiness probe and this request
    assert!(snapshot["tick"].as_u64().unwrap_or(0) >= 7);

    let zones = snapshot["zones"].as_array().expect("zones should be an array");
    assert_eq!(zones.len(), 3);
    for zone in zones {
        let zone_obj = zone.as_object().expect("zone should be an object");
        for key in ZONE_KEYS {
            assert!(zone_obj.contains_key(*key), "missing key: {key}");
        }
    }

    let (status, body) = http_request(&addr, "POST", "/storm", Some(r#"{"intensity":0.5}"#))
        .expect("/storm request should succeed");
    assert_eq!(status, 200);
    let update: Value = serde_json::from_str(&body).expect("storm body should be JSON object");
    assert_eq!(update["message"], "Storm intensity set to 50%");
    assert_eq!(update["windSpeed"], 105);

    let (status, _) = http_request(&addr, "POST", "/storm", Some(r#"{"intensity":"max"}"#))
        .expect("/storm request should succeed");
    assert_eq!(status, 400);
}

fn allocate_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("ephemeral port bind should succeed");
    let port = listener
        .local_addr()
        .expect("local_addr should be available")
        .port();
    drop(listener);
    port
}

fn spawn_api_process(port: u16) -> ChildGuard {
    let child = Command::new(env!("CARGO_BIN_EXE_storm-telecom-sim"))
        .args(["--preset", "buffalo", "--ticks", "5", "--serve", "--port"])
        .arg(port.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("storm-telecom-sim process should spawn");

    ChildGuard { child }
}

fn wait_for_server(addr: &str, timeout: Duration) {
    let start = Instant::now();
    loop {
        if let Ok((status, _)) = http_request(addr, "GET", "/status", None) {
            if status == 200 {
                return;
            }
        }

        if start.elapsed() >= timeout {
            panic!("timed out waiting for API server on {addr}");
        }

        thread::sleep(Duration::from_millis(50));
    }
}

fn http_request(
    addr: &str,
    method: &str,
    path: &str,
    body: Option<&str>,
) -> Result<(u16, String), String> {
    let mut stream = TcpStream::connect(addr).map_err(|err| format!("connect: {err}"))?;
    let payload = body.unwrap_or("");
    let mut request = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    if body.is_some() {
        request.push_str("Content-Type: application/json\r\n");
    }
    request.push_str(&format!("Content-Length: {}\r\n\r\n{payload}", payload.len()));
    stream
        .write_all(request.as_bytes())
        .map_err(|err| format!("write: {err}"))?;

    let mut raw = String::new();
    stream
        .read_to_string(&mut raw)
        .map_err(|err| format!("read: {err}"))?;

    let (head, body) = raw
        .split_once("\r\n\r\n")
        .ok_or_else(|| "invalid HTTP response".to_string())?;
    let status_line = head
        .lines()
        .next()
        .ok_or_else(|| "missing status line".to_string())?;
    let status_code = status_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| "missing status code".to_string())?
        .parse::<u16>()
        .map_err(|err| format!("invalid status code: {err}"))?;

    Ok((status_code, body.to_string()))
}
