//! End-to-end flows through the app: navigation, view-model lifetimes and
//! configuration working together.

use std::io::Write;
use std::time::Duration;

use pneumodetect::notify::drain;
use pneumodetect::vitals::Metric;
use pneumodetect::{App, Config, Error, LoginForm, MetricStatus, Phase, Route};

const TICK: Duration = Duration::from_millis(1);

fn seeded_config() -> Config {
    let mut config = Config::default();
    config.random.seed = Some(2024);
    config
}

#[tokio::test(start_paused = true)]
async fn test_screening_journey() {
    let (mut app, mut notices) = App::new(seeded_config());

    app.follow(Route::Dashboard).unwrap();
    app.follow(Route::CoughAnalysis).unwrap();

    let cough = app.cough().unwrap();
    cough.start_recording().unwrap();
    let result = cough.wait_for_result().await.unwrap();
    assert_eq!(cough.phase(), Phase::Complete);
    assert_eq!(result.confidence_percent, 87);
    assert!([15, 52, 78].contains(&result.score()));
    cough.reset();
    assert_eq!(cough.phase(), Phase::Idle);

    let messages: Vec<String> = drain(&mut notices).into_iter().map(|n| n.message).collect();
    assert_eq!(messages.len(), 3);

    app.follow(Route::Vitals).unwrap();
    let vitals = app.vitals().unwrap();
    let watcher = vitals.subscribe();
    vitals.connect().unwrap();

    for expected in 1..=3u64 {
        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::time::sleep(TICK).await;
        let reading = watcher.borrow().reading;
        assert_eq!(reading.sequence, expected);
        // Generated samples always classify as normal
        for metric in Metric::ALL {
            assert_eq!(reading.assessment.status(metric), MetricStatus::Normal);
        }
    }

    app.follow(Route::Reports).unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(watcher.borrow().samples_produced, 3);
    assert_eq!(
        app.history(),
        &[
            Route::Home,
            Route::Dashboard,
            Route::CoughAnalysis,
            Route::Vitals,
            Route::Reports
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_same_seed_same_outcome() {
    let mut risks = Vec::new();
    for _ in 0..2 {
        let (mut app, _notices) = App::new(seeded_config());
        app.follow(Route::CoughAnalysis).unwrap();
        let cough = app.cough().unwrap();
        cough.start_recording().unwrap();
        risks.push(cough.wait_for_result().await.unwrap().risk);
    }
    assert_eq!(risks[0], risks[1]);
}

#[tokio::test(start_paused = true)]
async fn test_configured_timings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[cough]\nrecording_ms = 100\nanalysis_ms = 50\nconfidence_percent = 90\n\n[vitals]\nsample_interval_ms = 250"
    )
    .unwrap();

    let config = Config::load_from(Some(file.path().to_path_buf())).unwrap();
    let (mut app, _notices) = App::new(config);

    app.follow(Route::CoughAnalysis).unwrap();
    let cough = app.cough().unwrap();
    cough.start_recording().unwrap();
    tokio::time::sleep(Duration::from_millis(100) + TICK).await;
    assert_eq!(cough.phase(), Phase::Analyzing);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(cough.phase(), Phase::Complete);
    assert_eq!(cough.snapshot().result.unwrap().confidence_percent, 90);

    app.follow(Route::Vitals).unwrap();
    let vitals = app.vitals().unwrap();
    vitals.connect().unwrap();
    tokio::time::sleep(Duration::from_millis(1_000) + TICK).await;
    assert_eq!(vitals.samples_produced(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_auth_then_dashboard() {
    let (mut app, mut notices) = App::new(seeded_config());

    let err = app.login(&LoginForm::default()).await.unwrap_err();
    assert!(err.is_navigation_error());

    app.follow(Route::Auth).unwrap();
    let err = app.login(&LoginForm::default()).await.unwrap_err();
    assert!(matches!(err, Error::MissingField { .. }));
    assert_eq!(app.route(), Route::Auth);

    let form = LoginForm {
        email: "patient@example.com".to_string(),
        password: "secret".to_string(),
    };
    app.login(&form).await.unwrap();
    assert_eq!(app.route(), Route::Dashboard);
    assert_eq!(drain(&mut notices).len(), 1);
}

#[test]
fn test_admin_is_reachable_only_directly() {
    let (mut app, _notices) = App::new(Config::default());
    for route in Route::ALL {
        assert!(!route.links_to(Route::Admin));
    }
    assert!(app.follow(Route::Admin).is_err());
    app.open(Route::Admin);
    assert_eq!(app.route(), Route::Admin);
    app.follow(Route::Dashboard).unwrap();
}
