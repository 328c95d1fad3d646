use anyhow::Result;
use cvn_buttons::domain::model::{default_bindings, COWBOY_PIN, NINJA_PIN};
use cvn_buttons::{ButtonError, CliConfig, HttpNotifier, SimulatedGpio, TriggerMode, WatchEngine};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn config(server_url: &str, mode: TriggerMode) -> CliConfig {
    CliConfig {
        server_url: Some(server_url.to_string()),
        mode,
        poll_interval_ms: None,
        drain_on_shutdown: true,
        verbose: false,
        json_logs: false,
    }
}

fn gpio() -> Result<Arc<SimulatedGpio>> {
    Ok(Arc::new(SimulatedGpio::init(&default_bindings())?))
}

#[tokio::test]
async fn test_both_buttons_pressed_together() -> Result<()> {
    let server = MockServer::start();
    let cowboy_mock = server.mock(|when, then| {
        when.method(GET).path("/cvn/add/cowboy");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"success": true, "ninjas": 10, "cowboys": 11}));
    });
    let ninja_mock = server.mock(|when, then| {
        when.method(GET).path("/cvn/add/ninja");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"success": true, "ninjas": 11, "cowboys": 11}));
    });

    let gpio = gpio()?;
    gpio.script(COWBOY_PIN, [false, false, false]);
    gpio.script(NINJA_PIN, [false, false, false]);

    let config = config(&server.url("/cvn/add"), TriggerMode::Edge);
    let notifier = Arc::new(HttpNotifier::new(server.url("/cvn/add")));
    let engine = WatchEngine::new(Arc::clone(&gpio), notifier, &config);

    let reports = engine
        .run(tokio::time::sleep(Duration::from_millis(500)))
        .await?;

    // one request per press, regardless of how long it was held
    cowboy_mock.assert_hits(1);
    ninja_mock.assert_hits(1);
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.presses == 1));
    assert!(gpio.reads(COWBOY_PIN) > 3);
    assert!(gpio.reads(NINJA_PIN) > 3);
    Ok(())
}

#[tokio::test]
async fn test_level_mode_repeats_while_held() -> Result<()> {
    let server = MockServer::start();
    let ninja_mock = server.mock(|when, then| {
        when.method(GET).path("/ninja");
        then.status(200).body("ok");
    });
    let cowboy_mock = server.mock(|when, then| {
        when.method(GET).path("/cowboy");
        then.status(200).body("ok");
    });

    let gpio = gpio()?;
    gpio.script(NINJA_PIN, [true, false, false, true, true, false]);

    let config = config(&server.base_url(), TriggerMode::Level);
    let notifier = Arc::new(HttpNotifier::new(server.base_url()));
    let engine = WatchEngine::new(gpio, notifier, &config);

    engine
        .run(tokio::time::sleep(Duration::from_millis(1200)))
        .await?;

    ninja_mock.assert_hits(3);
    cowboy_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_edge_mode_survives_server_errors() -> Result<()> {
    let server = MockServer::start();
    let ninja_mock = server.mock(|when, then| {
        when.method(GET).path("/ninja");
        then.status(500).body("redis down");
    });

    let gpio = gpio()?;
    gpio.script(NINJA_PIN, [false, true, false, true]);

    let config = config(&server.base_url(), TriggerMode::Edge);
    let notifier = Arc::new(HttpNotifier::new(server.base_url()));
    let engine = WatchEngine::new(gpio, notifier, &config);

    let reports = engine
        .run(tokio::time::sleep(Duration::from_millis(500)))
        .await?;

    ninja_mock.assert_hits(2);
    let ninja = reports
        .iter()
        .find(|r| r.binding.pin == NINJA_PIN)
        .expect("ninja report");
    assert_eq!(ninja.presses, 2);
    Ok(())
}

#[tokio::test]
async fn test_edge_mode_unreachable_server_keeps_polling() -> Result<()> {
    let gpio = gpio()?;
    gpio.script(COWBOY_PIN, [false, true, false]);

    let config = config("http://127.0.0.1:1", TriggerMode::Edge);
    let notifier = Arc::new(HttpNotifier::new("http://127.0.0.1:1"));
    let engine = WatchEngine::new(Arc::clone(&gpio), notifier, &config);

    let reports = engine
        .run(tokio::time::sleep(Duration::from_millis(400)))
        .await?;

    let cowboy = reports
        .iter()
        .find(|r| r.binding.pin == COWBOY_PIN)
        .expect("cowboy report");
    assert_eq!(cowboy.presses, 2);
    assert!(cowboy.samples > 3);
    Ok(())
}

#[tokio::test]
async fn test_level_mode_unreachable_server_is_fatal() {
    let gpio = SimulatedGpio::init(&default_bindings()).unwrap();
    gpio.script(NINJA_PIN, [false]);

    let config = config("http://127.0.0.1:1", TriggerMode::Level);
    let notifier = Arc::new(HttpNotifier::new("http://127.0.0.1:1"));
    let engine = WatchEngine::new(Arc::new(gpio), notifier, &config);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        engine.run(std::future::pending()),
    )
    .await
    .expect("engine should stop on its own");

    let err = result.unwrap_err();
    assert!(matches!(err, ButtonError::ApiError(_)));
    assert_eq!(err.severity(), cvn_buttons::utils::error::ErrorSeverity::Medium);
}
