//! Integration tests for the probe -> search -> save flow.
//!
//! These tests run complete scans against mock HTTP servers.

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use stampscan_core::{
    HttpClient, HttpProber, ImageDownloader, PacingPolicy, Probe, ProbeOutcome, Scenario,
    ScenarioOutcome, SearchParams, Sleeper, UrlTemplate, find_first_valid, run_scenario,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns immediately, remembering what it was asked to wait for.
#[derive(Default)]
struct InstantSleeper {
    slept: Mutex<Vec<Duration>>,
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

fn image_response(len: usize) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("Content-Type", "image/jpeg")
        .set_body_bytes(vec![0xAB; len])
}

fn prober() -> HttpProber {
    HttpProber::new(HttpClient::for_probing().expect("probe client"))
}

fn downloader() -> ImageDownloader {
    ImageDownloader::new(HttpClient::for_download().expect("download client"))
}

fn scenario(server: &MockServer, start: i64, max_tries: u64, output_dir: &Path) -> Scenario {
    Scenario {
        template: UrlTemplate::new(format!("{}/0-{{ts}}/4.jpg", server.uri())),
        search: SearchParams::new(start, 1, max_tries),
        pacing: PacingPolicy::with_base_delay(Duration::from_millis(100)),
        output_dir: output_dir.to_path_buf(),
    }
}

/// Mounts a catch-all 404 for everything not matched by earlier mocks.
async fn mount_not_found(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scan_finds_index_three_and_never_probes_index_four() {
    let mock_server = MockServer::start().await;
    for ts in [1003, 1004] {
        Mock::given(method("HEAD"))
            .and(path(format!("/0-{ts}/4.jpg")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/0-{ts}/4.jpg")))
            .respond_with(image_response(1024))
            .mount(&mock_server)
            .await;
    }
    mount_not_found(&mock_server).await;

    let template = UrlTemplate::new(format!("{}/0-{{ts}}/4.jpg", mock_server.uri()));
    let sleeper = InstantSleeper::default();
    let hit = find_first_valid(
        &template,
        &SearchParams::new(1000, 1, 50),
        &prober(),
        &PacingPolicy::default(),
        &sleeper,
    )
    .await
    .expect("index 3 should be found");

    assert_eq!(hit.timestamp, 1003);
    assert_eq!(hit.url, format!("{}/0-1003/4.jpg", mock_server.uri()));
    assert_eq!(sleeper.slept.lock().unwrap().len(), 3);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(
        requests.iter().all(|r| r.url.path() != "/0-1004/4.jpg"),
        "candidate after the first hit must not be probed"
    );
    assert!(requests.iter().any(|r| r.url.path() == "/0-1002/4.jpg"));
}

#[tokio::test]
async fn test_scenario_saves_confirmed_image() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0-7/4.jpg"))
        .respond_with(image_response(4096))
        .mount(&mock_server)
        .await;
    mount_not_found(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("downloads");

    let outcome = run_scenario(
        &scenario(&mock_server, 5, 10, &out),
        &prober(),
        &InstantSleeper::default(),
        &downloader(),
    )
    .await;

    match outcome {
        ScenarioOutcome::Saved { hit, path } => {
            assert_eq!(hit.timestamp, 7);
            assert_eq!(path, out.join("4.jpg"));
            assert_eq!(std::fs::read(&path).unwrap().len(), 4096);
        }
        other => panic!("expected Saved, got {other:?}"),
    }
}

#[tokio::test]
async fn test_scenario_reports_exhausted_search() {
    let mock_server = MockServer::start().await;
    mount_not_found(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let sleeper = InstantSleeper::default();

    let outcome = run_scenario(
        &scenario(&mock_server, 0, 4, temp_dir.path()),
        &prober(),
        &sleeper,
        &downloader(),
    )
    .await;

    assert!(matches!(outcome, ScenarioOutcome::NotFound { tries: 4 }));
    assert_eq!(
        *sleeper.slept.lock().unwrap(),
        vec![Duration::from_millis(100); 4]
    );
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_scenario_refetch_404_is_reported_and_nothing_written() {
    let mock_server = MockServer::start().await;
    // The probe's GET sees an image; the download's GET sees 404.
    Mock::given(method("GET"))
        .and(path("/0-1/4.jpg"))
        .respond_with(image_response(1024))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;
    mount_not_found(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("downloads");

    let outcome = run_scenario(
        &scenario(&mock_server, 1, 3, &out),
        &prober().with_head_first(false),
        &InstantSleeper::default(),
        &downloader(),
    )
    .await;

    match outcome {
        ScenarioOutcome::DownloadFailed { hit, error } => {
            assert_eq!(hit.timestamp, 1);
            assert_eq!(error.status(), Some(404));
            assert!(error.to_string().contains("HTTP 404"));
        }
        other => panic!("expected DownloadFailed, got {other:?}"),
    }
    assert!(!out.join("4.jpg").exists());
}

#[tokio::test]
async fn test_small_placeholder_images_are_skipped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/0-0/4.jpg"))
        .respond_with(image_response(64))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/0-1/4.jpg"))
        .respond_with(image_response(256))
        .mount(&mock_server)
        .await;
    mount_not_found(&mock_server).await;

    let template = UrlTemplate::new(format!("{}/0-{{ts}}/4.jpg", mock_server.uri()));
    let hit = find_first_valid(
        &template,
        &SearchParams::new(0, 1, 5),
        &prober(),
        &PacingPolicy::immediate(),
        &InstantSleeper::default(),
    )
    .await
    .expect("second candidate is a real image");

    assert_eq!(hit.timestamp, 1);
}

/// Boxed trait objects can drive the search.
#[tokio::test]
async fn test_probe_trait_objects_drive_the_search() {
    struct AlwaysConfirm;

    #[async_trait]
    impl Probe for AlwaysConfirm {
        async fn probe(&self, _url: &str) -> ProbeOutcome {
            ProbeOutcome::Confirmed
        }
    }

    let probe: Box<dyn Probe> = Box::new(AlwaysConfirm);
    let sleeper: Box<dyn Sleeper> = Box::new(InstantSleeper::default());
    let hit = find_first_valid(
        &UrlTemplate::new("https://img.example.com/{ts}.png"),
        &SearchParams::new(9, 1, 1),
        probe.as_ref(),
        &PacingPolicy::default(),
        sleeper.as_ref(),
    )
    .await
    .unwrap();

    assert_eq!(hit.url, "https://img.example.com/9.png");
}
