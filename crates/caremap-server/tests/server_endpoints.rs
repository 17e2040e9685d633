use std::sync::Arc;
use std::time::Duration;

use caremap_core::{Doctor, Facility, FacilityType};
use caremap_db_memory::InMemoryStore;
use caremap_server::{AppConfig, AppState, RoutingGateway, build_app};
use serde_json::{Value, json};
use tokio::task::JoinHandle;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store
        .insert_facility(
            Facility::new(1, "kvwl", "F-1", "Hausarztpraxis am Markt", FacilityType::MedicalPractice)
                .with_address("Markt 1", "48143", "Münster")
                .with_phone("0251 123456")
                .with_coordinates(51.9625, 7.6256)
                .with_wheelchair_accessible(true),
        )
        .await
        .unwrap();
    store
        .insert_facility(
            Facility::new(2, "kvwl", "F-2", "Löwen-Apotheke", FacilityType::Pharmacy)
                .with_wheelchair_accessible(false),
        )
        .await
        .unwrap();
    store
        .insert_doctor(
            Doctor::new(10, 1, "kvwl", "D-10", "Dr. Maria Weber")
                .with_names("Maria", "Weber")
                .with_specialty("Allgemeinmedizin"),
        )
        .await
        .unwrap();
    store
        .insert_doctor(Doctor::new(11, 1, "kvwl", "D-11", "Dr. Jan Becker").with_names("Jan", "Becker"))
        .await
        .unwrap();
    store
}

async fn start_server(engine: &MockServer) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let mut cfg = AppConfig::default();
    cfg.routing.osrm.base_url = Some(engine.uri());

    let routing = RoutingGateway::new(
        engine.uri(),
        Duration::from_secs(2),
        Duration::from_millis(500),
    )
    .expect("gateway");
    let state = AppState::new(Arc::new(seeded_store().await), routing);
    let app = build_app(state, &cfg);

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

async fn get_json(client: &reqwest::Client, url: String) -> (u16, Value) {
    let resp = client.get(url).send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn health_endpoints_work() {
    let engine = MockServer::start().await;
    let (base, shutdown_tx, handle) = start_server(&engine).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(&client, format!("{base}/")).await;
    assert_eq!(status, 200);
    assert_eq!(body["service"], "CareMap");
    assert_eq!(body["storage"], "memory");

    let (status, body) = get_json(&client, format!("{base}/healthz")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");

    let (status, body) = get_json(&client, format!("{base}/readyz")).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "ready");

    let resp = client
        .get(format!("{base}/healthz"))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "req-42");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn directory_endpoints_work() {
    let engine = MockServer::start().await;
    let (base, shutdown_tx, handle) = start_server(&engine).await;
    let client = reqwest::Client::new();

    // Doctors sorted by last name
    let (status, body) = get_json(&client, format!("{base}/api/doctors")).await;
    assert_eq!(status, 200);
    let doctors = body.as_array().unwrap();
    assert_eq!(doctors.len(), 2);
    assert_eq!(doctors[0]["doctorId"], 11);
    assert_eq!(doctors[1]["doctorId"], 10);
    assert_eq!(doctors[1]["specialty"], "Allgemeinmedizin");
    assert_eq!(doctors[1]["facilityName"], "Hausarztpraxis am Markt");
    assert_eq!(doctors[1]["facilityType"], "ARZTPRAXIS");
    assert_eq!(doctors[1]["city"], "Münster");
    assert_eq!(doctors[1]["wheelchairAccessible"], true);

    let (status, body) = get_json(&client, format!("{base}/api/doctors/10")).await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Dr. Maria Weber");
    assert_eq!(body["latitude"], 51.9625);

    let (status, body) = get_json(&client, format!("{base}/api/doctors/999")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, body) = get_json(&client, format!("{base}/api/doctors/abc")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "bad_request");

    // Facilities
    let (status, body) = get_json(&client, format!("{base}/api/facilities")).await;
    assert_eq!(status, 200);
    let ids: Vec<_> = body.as_array().unwrap().iter().map(|f| f["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
    assert_eq!(body[1]["type"], "APOTHEKE");
    assert_eq!(body[1]["sourceKey"], "F-2");
    assert_eq!(body[1]["street"], Value::Null);

    let (status, body) = get_json(&client, format!("{base}/api/facilities?type=pharmacy")).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 2);

    let (status, body) =
        get_json(&client, format!("{base}/api/facilities?q=markt&wheelchairAccessible=true")).await;
    assert_eq!(status, 200);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["id"], 1);

    let (status, body) = get_json(&client, format!("{base}/api/facilities?type=ZOO")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, body) = get_json(&client, format!("{base}/api/facilities/2")).await;
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Löwen-Apotheke");

    let (status, body) = get_json(&client, format!("{base}/api/facilities/3")).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["message"], "Facility 3 not found");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn route_endpoint_proxies_engine() {
    let engine = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/7\.6256,51\.9625;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{
                "distance": 1200.5,
                "duration": 95.2,
                "geometry": {"type": "LineString", "coordinates": [[7.6256, 51.9625], [7.63, 51.96]]}
            }]
        })))
        .mount(&engine)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/0\.0,0\.0;"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "NoRoute", "routes": []})))
        .mount(&engine)
        .await;

    let (base, shutdown_tx, handle) = start_server(&engine).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(
        &client,
        format!("{base}/api/route?fromLat=51.9625&fromLon=7.6256&toLat=51.96&toLon=7.63"),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["distanceMeters"], 1200.5);
    assert_eq!(body["durationSeconds"], 95.2);
    assert_eq!(body["geometry"].as_array().unwrap().len(), 2);

    let (status, body) =
        get_json(&client, format!("{base}/api/route?fromLat=0&fromLon=0&toLat=1&toLon=1")).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["code"], "no_route_found");

    let (status, body) =
        get_json(&client, format!("{base}/api/route?fromLat=51.9&fromLon=7.6&toLat=51.9")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "bad_request");

    let (status, _) = get_json(
        &client,
        format!("{base}/api/route?fromLat=north&fromLon=7.6&toLat=51.9&toLon=7.6"),
    )
    .await;
    assert_eq!(status, 400);

    let (status, body) =
        get_json(&client, format!("{base}/api/route?fromLat=NaN&fromLon=7.6&toLat=51.9&toLon=7.6")).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["message"], "coordinates must be finite numbers");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn route_endpoint_reports_unavailable_engine() {
    let engine = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&engine)
        .await;

    let (base, shutdown_tx, handle) = start_server(&engine).await;
    let client = reqwest::Client::new();

    let (status, body) = get_json(
        &client,
        format!("{base}/api/route?fromLat=51.9&fromLon=7.6&toLat=51.8&toLon=7.5"),
    )
    .await;
    assert_eq!(status, 503);
    assert_eq!(body["error"]["code"], "upstream_unavailable");

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
