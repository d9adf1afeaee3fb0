use std::net::{TcpListener, TcpStream};
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use fittrack::app::FitTrackApp;
use fittrack::background::noop_waker;
use fittrack::config::AppConfig;
use fittrack::storage::MemoryStore;

/// Accepts connections and never answers them. Returns the base URL.
fn silent_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let mut held: Vec<TcpStream> = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{}", addr)
}

fn config(timeout_secs: u64) -> AppConfig {
    let host = silent_host();
    let mut config = AppConfig {
        base_url: Some(host.clone()),
        request_timeout_secs: timeout_secs,
        ..AppConfig::default()
    };
    config.weather.api_base = host;
    config
}

#[test]
fn startup_does_not_wait_for_a_silent_host() {
    let config = config(30);
    let started = Instant::now();
    let app = FitTrackApp::new(&config, Rc::new(MemoryStore::new()), noop_waker());

    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(app.pending_loads() > 0);
}

#[test]
fn silent_host_loads_settle_after_the_timeout() {
    let config = config(1);
    let mut app = FitTrackApp::new(&config, Rc::new(MemoryStore::new()), noop_waker());

    let deadline = Instant::now() + Duration::from_secs(20);
    while app.pending_loads() > 0 && Instant::now() < deadline {
        app.poll_loads();
        thread::sleep(Duration::from_millis(20));
    }
    assert_eq!(app.pending_loads(), 0);
}
