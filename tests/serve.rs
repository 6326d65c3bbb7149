//! End-to-end tests over a real TCP listener.

use std::sync::Arc;
use std::time::Duration;

use edge_flags::config::EdgeConfig;
use edge_flags::http::HttpServer;
use edge_flags::lifecycle::Shutdown;

mod common;

#[tokio::test]
async fn test_serves_over_tcp_and_shuts_down() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(EdgeConfig::default(), Arc::new(common::flag_store()));
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{addr}/secure/MY"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/svg+xml");
    assert!(res.headers().contains_key("etag"));
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), common::MY_FLAG);

    let res = client
        .get(format!("http://{addr}/secure"))
        .header("Cf-Access-Authenticated-User-Email", "alice@example.com")
        .header("CF-IPCountry", "US")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let page = res.text().await.unwrap();
    assert!(page.contains("alice@example.com"));
    assert!(page.contains(r#"href="/secure/US""#));

    let res = client
        .get(format!("http://{addr}/random/path"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), server_task)
        .await
        .expect("server did not stop after shutdown")
        .unwrap();
    assert!(result.is_ok());
}
