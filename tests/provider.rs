use monkey_cli::config::Config;
use monkey_cli::provider::seed_monkeys;
use monkey_cli::random::SeededPicker;
use monkey_cli::{MonkeyProvider, ProviderError};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn provider_for(server: &MockServer) -> MonkeyProvider {
    let config = Config::with_endpoint(format!("{}/api/monkeys", server.uri()));
    MonkeyProvider::new(&config).unwrap()
}

async fn serve(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/api/monkeys"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn unreachable_endpoint_falls_back_to_seed() {
    let config = Config::with_endpoint("http://127.0.0.1:1/api/monkeys");
    let provider = MonkeyProvider::new(&config).unwrap();

    let monkeys = provider.fetch_all(&CancellationToken::new()).await.unwrap();
    assert_eq!(monkeys.len(), 6);
    assert_eq!(monkeys, seed_monkeys());
}

#[tokio::test]
async fn remote_records_take_precedence() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Mandrill", "location": "Central Africa", "population": 800},
            {"Name": "Proboscis Monkey", "Location": "Borneo", "Population": 7000},
            {"NAME": "Gelada", "LOCATION": "Ethiopia", "POPULATION": 200000}
        ])),
    )
    .await;
    let provider = provider_for(&server).await;

    let monkeys = provider.fetch_all(&CancellationToken::new()).await.unwrap();
    let names: Vec<&str> = monkeys.iter().map(|m| m.name()).collect();
    assert_eq!(names, ["Mandrill", "Proboscis Monkey", "Gelada"]);
    assert_eq!(monkeys[2].population(), 200_000);
}

#[tokio::test]
async fn empty_remote_array_falls_back_to_seed() {
    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let provider = provider_for(&server).await;

    let monkeys = provider.fetch_all(&CancellationToken::new()).await.unwrap();
    assert_eq!(monkeys, seed_monkeys());
}

#[tokio::test]
async fn error_status_falls_back_to_seed() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(503).set_body_json(json!([
            {"name": "Mandrill", "location": "Central Africa", "population": 800}
        ])),
    )
    .await;
    let provider = provider_for(&server).await;

    let monkeys = provider.fetch_all(&CancellationToken::new()).await.unwrap();
    assert_eq!(monkeys, seed_monkeys());
}

#[tokio::test]
async fn request_timeout_falls_back_to_seed() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([
                {"name": "Mandrill", "location": "Central Africa", "population": 800}
            ]))
            .set_delay(Duration::from_secs(3)),
    )
    .await;
    let config = Config::from_values(
        Some(format!("{}/api/monkeys", server.uri())),
        Some("1".into()),
    )
    .unwrap();
    let provider = MonkeyProvider::new(&config).unwrap();

    let result = provider.fetch_all(&CancellationToken::new()).await;
    assert_eq!(result, Ok(seed_monkeys()));
}

#[tokio::test]
async fn repeated_keys_in_remote_payload_keep_the_last_value() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_string(
            r#"[{"name": "X", "Name": "Mandrill", "location": "Gabon", "population": 800}]"#,
        ),
    )
    .await;
    let provider = provider_for(&server).await;

    let monkeys = provider.fetch_all(&CancellationToken::new()).await.unwrap();
    assert_eq!(monkeys.len(), 1);
    assert_eq!(monkeys[0].name(), "Mandrill");
}

#[tokio::test]
async fn malformed_payload_falls_back_to_seed() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({"monkeys": []})),
    )
    .await;
    let provider = provider_for(&server).await;
    let token = CancellationToken::new();
    assert_eq!(provider.fetch_all(&token).await.unwrap(), seed_monkeys());

    let server = MockServer::start().await;
    serve(&server, ResponseTemplate::new(200).set_body_string("not json")).await;
    let provider = provider_for(&server).await;
    assert_eq!(provider.fetch_all(&token).await.unwrap(), seed_monkeys());
}

#[tokio::test]
async fn lookup_runs_against_remote_data() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Spider Monkey", "location": "Panama", "population": 12}
        ])),
    )
    .await;
    let provider = provider_for(&server).await;
    let token = CancellationToken::new();

    for query in ["Spider Monkey", "spider monkey", "SPIDER MONKEY"] {
        let found = provider.find_by_name(query, &token).await.unwrap().unwrap();
        assert_eq!(found.location(), "Panama");
    }
    // Seed-only names are not visible while the remote answers.
    assert_eq!(provider.find_by_name("Baboon", &token).await, Ok(None));
    assert_eq!(provider.find_by_name("Unicorn", &token).await, Ok(None));
}

#[tokio::test]
async fn cancellation_during_request_is_not_masked() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([
                {"name": "Mandrill", "location": "Central Africa", "population": 800}
            ]))
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    let provider = provider_for(&server).await;
    let token = CancellationToken::new();

    let canceller = {
        let token = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            token.cancel();
        })
    };

    let started = Instant::now();
    let result = provider.fetch_all(&token).await;
    canceller.await.unwrap();

    assert_eq!(result, Err(ProviderError::Cancelled));
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn cancelled_pick_against_remote_leaves_counter() {
    let server = MockServer::start().await;
    serve(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([]))
            .set_delay(Duration::from_secs(5)),
    )
    .await;
    let provider = provider_for(&server).await;
    let token = CancellationToken::new();
    token.cancel();

    assert_eq!(provider.pick_random(&token).await, Err(ProviderError::Cancelled));
    assert_eq!(provider.selection_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_picks_never_lose_increments() {
    const K: u64 = 64;
    let provider = Arc::new(MonkeyProvider::offline().with_picker(SeededPicker::new(9)));

    let handles: Vec<_> = (0..K)
        .map(|_| {
            let provider = Arc::clone(&provider);
            tokio::spawn(async move {
                provider
                    .pick_random(&CancellationToken::new())
                    .await
                    .unwrap()
                    .count
            })
        })
        .collect();

    let mut counts = Vec::with_capacity(K as usize);
    for handle in handles {
        counts.push(handle.await.unwrap());
    }
    counts.sort_unstable();

    assert_eq!(counts, (1..=K).collect::<Vec<_>>());
    assert_eq!(provider.selection_count(), K);
}

#[tokio::test]
async fn empty_dataset_fails_pick() {
    let provider = MonkeyProvider::offline().with_seed(Vec::new());
    let token = CancellationToken::new();

    assert_eq!(provider.fetch_all(&token).await, Ok(Vec::new()));
    assert_eq!(provider.pick_random(&token).await, Err(ProviderError::EmptyDataset));
    assert_eq!(provider.selection_count(), 0);
}
