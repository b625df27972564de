use fuse_finder::test_support::spawn_test_server;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

#[tokio::test]
async fn health_reports_ok() {
    let Some(addr) = spawn_test_server().await else {
        eprintln!("skipping: local TCP bind is not permitted in this environment");
        return;
    };

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("HTTP request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(
        &response.text().await.expect("health body should be readable"),
    )
    .expect("health body should be JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn diagram_svg_highlights_requested_zone_with_popup() {
    let Some(addr) = spawn_test_server().await else {
        eprintln!("skipping: local TCP bind is not permitted in this environment");
        return;
    };

    let response = reqwest::get(format!(
        "http://{addr}/diagram/engine_bay?selected=standard"
    ))
    .await
    .expect("HTTP request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some("image/svg+xml"));

    let svg = response.text().await.expect("svg body should be readable");
    assert!(svg.contains(r#"data-zone="engine_bay" data-active="true""#));
    assert_eq!(svg.matches(r#"data-active="true""#).count(), 1);
    assert!(svg.contains(r#"data-side="below""#));
    assert!(svg.contains("Standard (ATO)"));
    assert!(svg.contains("1976 – 2010s"));
}

#[tokio::test]
async fn diagram_scene_for_unrecognized_category_is_inert() {
    let Some(addr) = spawn_test_server().await else {
        eprintln!("skipping: local TCP bind is not permitted in this environment");
        return;
    };

    let response = reqwest::get(format!("http://{addr}/diagram/glovebox/scene"))
        .await
        .expect("HTTP request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let scene: serde_json::Value =
        serde_json::from_str(&response.text().await.expect("scene body should be readable"))
            .expect("scene body should be JSON");
    assert_eq!(scene["category"], "unknown");
    let elements = scene["elements"]
        .as_array()
        .expect("elements should be an array");
    assert!(
        elements
            .iter()
            .all(|element| element["kind"] != "fuse_icon" && element["active"] != true)
    );
}

#[tokio::test]
async fn diagram_rejects_unknown_fuse_type() {
    let Some(addr) = spawn_test_server().await else {
        eprintln!("skipping: local TCP bind is not permitted in this environment");
        return;
    };

    let response = reqwest::get(format!("http://{addr}/diagram/trunk?selected=maxi"))
        .await
        .expect("HTTP request should complete");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value =
        serde_json::from_str(&response.text().await.expect("error body should be readable"))
            .expect("error body should be JSON");
    let error = body["error"].as_str().expect("error field should be a string");
    assert!(error.contains("maxi"), "unexpected error: {error}");
}

#[tokio::test]
async fn lookup_post_renders_its_category() {
    let Some(addr) = spawn_test_server().await else {
        eprintln!("skipping: local TCP bind is not permitted in this environment");
        return;
    };

    let lookup = serde_json::json!({
        "boxLocation": "Trunk, behind the left side panel",
        "locationCategory": "trunk",
        "fuseNumber": "R7",
        "amperage": "20A",
        "circuit": "Power liftgate",
        "description": "Feeds the liftgate motor."
    });
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/diagram"))
        .header(CONTENT_TYPE, "application/json")
        .body(lookup.to_string())
        .send()
        .await
        .expect("HTTP request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let svg = response.text().await.expect("svg body should be readable");
    assert!(svg.contains(r#"data-zone="trunk" data-active="true""#));
    assert!(svg.contains("Tap a fuse to identify"));
}

#[tokio::test]
async fn diagram_ignores_cache_busting_query_parameters() {
    let Some(addr) = spawn_test_server().await else {
        eprintln!("skipping: local TCP bind is not permitted in this environment");
        return;
    };

    let response = reqwest::get(format!("http://{addr}/diagram/trunk?selected=mini&v=2"))
        .await
        .expect("HTTP request should complete");
    assert_eq!(response.status(), StatusCode::OK);
    let svg = response.text().await.expect("svg body should be readable");
    assert!(svg.contains(r#"data-hit="popup" data-fuse="mini" data-side="above""#));
}
