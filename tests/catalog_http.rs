use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use fittrack::catalog::{load_view, HttpSource, LoadState, MEMBERS, WORKOUTS};
use fittrack::models::{Member, Workout};
use fittrack::pages::WorkoutsPage;
use fittrack::render::Rendered;
use fittrack::selection::Favorites;
use fittrack::storage::MemoryStore;
use std::rc::Rc;

/// Serves exactly one canned HTTP response and returns the base URL.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let _ = stream.write_all(response.as_bytes());
    });
    format!("http://{}", addr)
}

const WORKOUTS_JSON: &str = r#"{"workouts":[
    {"id":"a","name":"Push Up","muscleGroup":"chest","difficulty":"beginner",
     "equipment":"none","caloriesBurned":80,"description":"","image":""},
    {"id":"b","name":"Squat","muscleGroup":"legs","difficulty":"beginner",
     "equipment":"none","caloriesBurned":100,"description":"","image":""}]}"#;

#[test]
fn not_found_renders_fixed_error_and_empty_catalog() {
    let source = HttpSource::new(serve_once("404 Not Found", ""), Duration::from_secs(5));
    let state = load_view(&source, &WORKOUTS, |w: Workout| w);

    assert_eq!(state, LoadState::Failed(WORKOUTS.error_message));
    assert!(state.items().is_empty());

    let page = WorkoutsPage::with_catalog(state);
    let favorites = Favorites::load(Rc::new(MemoryStore::new()));
    assert_eq!(
        page.cards(&favorites),
        Rendered::Error("Error loading workouts. Please try again later.")
    );
}

#[test]
fn ok_response_loads_records_in_order() {
    let source = HttpSource::new(serve_once("200 OK", WORKOUTS_JSON), Duration::from_secs(5));
    let state = load_view(&source, &WORKOUTS, |w: Workout| w.id);
    assert_eq!(state, LoadState::Ready(vec!["a".to_string(), "b".to_string()]));
}

#[test]
fn malformed_body_is_a_load_failure() {
    let source = HttpSource::new(serve_once("200 OK", "{not json"), Duration::from_secs(5));
    let state = load_view(&source, &MEMBERS, |m: Member| m);
    assert_eq!(state.error(), Some("Unable to load member data."));
}

#[test]
fn unreachable_host_is_a_load_failure() {
    // bind then drop so nothing is listening on the port
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let source = HttpSource::new(format!("http://{}", addr), Duration::from_secs(2));
    let state = load_view(&source, &WORKOUTS, |w: Workout| w);
    assert_eq!(state.error(), Some(WORKOUTS.error_message));
}
