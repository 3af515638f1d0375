//! Concurrent routing while the route table is being republished.

use std::time::{Duration, Instant};

use tenant_gateway::config::{GatewayConfig, RouteDefinition};

mod common;

use common::{client, route, start_gateway, start_mock_backend};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reload_under_load() {
    let blue = start_mock_backend("blue").await;
    let green = start_mock_backend("green").await;

    let table = |target| {
        vec![
            RouteDefinition { path_prefix: "/app".into(), ..route("app", target) },
            RouteDefinition { host: "admin.example.com".into(), ..route("admin", target) },
        ]
    };

    let gateway = start_gateway(table(blue)).await;

    // Flip between two complete tables while requests are in flight.
    let updates = gateway.updates.clone();
    let flipper = tokio::spawn(async move {
        for i in 0..20 {
            let mut config = GatewayConfig::default();
            config.routes = table(if i % 2 == 0 { green } else { blue });
            if updates.send(config).is_err() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    });

    let concurrency = 10;
    let requests_per_task = 20;
    let start = Instant::now();

    let mut tasks = Vec::new();
    for _ in 0..concurrency {
        let client = client();
        let url = gateway.url("/app/page");
        tasks.push(tokio::spawn(async move {
            let mut bodies = Vec::new();
            for _ in 0..requests_per_task {
                let res = client.get(&url).send().await.expect("gateway unreachable");
                assert_eq!(res.status(), 200, "a reload must never expose a partial table");
                bodies.push(res.text().await.unwrap());
            }
            bodies
        }));
    }

    let mut total = 0;
    for task in tasks {
        for body in task.await.unwrap() {
            assert!(body == "blue" || body == "green", "unexpected body {body}");
            total += 1;
        }
    }
    flipper.await.unwrap();

    println!(
        "\n{} requests in {:?} across {} tasks during 20 reloads\n",
        total,
        start.elapsed(),
        concurrency
    );
    assert_eq!(total, concurrency * requests_per_task);
}
