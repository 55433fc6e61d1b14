/// HttpGateway against a live filesystem endpoint.

use std::sync::Arc;

use stagehand_fsgate::*;

struct TestServer {
    endpoint: String,
    dir: tempfile::TempDir,
}

async fn start_test_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let gateway = Arc::new(LocalGateway::open(dir.path()).unwrap().with_max_file_bytes(1024));
    let app = router(gateway);

    // Bind to random port.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        endpoint: format!("http://{}{}", addr, FILESYSTEM_PATH),
        dir,
    }
}

#[tokio::test]
async fn remote_operations() {
    let server = start_test_server().await;
    let gateway = HttpGateway::new(&server.endpoint);

    assert!(gateway.ensure_directory_exists("app/produtos").await.success);
    assert!(server.dir.path().join("app/produtos").is_dir());

    assert!(!gateway.file_exists("app/produtos/page.tsx").await);
    assert!(gateway.create_file("app/produtos/page.tsx", "export {}").await.success);
    assert!(gateway.file_exists("app/produtos/page.tsx").await);
    assert!(gateway.check_write_permission("app/produtos").await.success);
}

#[tokio::test]
async fn remote_failures_are_results() {
    let server = start_test_server().await;
    let gateway = HttpGateway::new(&server.endpoint);

    let result = gateway.ensure_directory_exists("../outside").await;
    assert!(!result.success);
    assert!(result.message().contains("escapes"));

    let big = "x".repeat(2048);
    let result = gateway.create_file("app/big.txt", &big).await;
    assert!(!result.success);
    assert!(result.message().contains("too large"));
}

#[tokio::test]
async fn remote_validate_path() {
    let server = start_test_server().await;
    let gateway = HttpGateway::new(&server.endpoint);

    let validation = gateway.validate_path("src/app", "produtos").await;
    assert!(validation.success, "{:?}", validation.error);
    let paths = validation.paths.unwrap();
    assert_eq!(paths.components_dir, "src/app/produtos/components");
    for dir in paths.dirs() {
        assert!(server.dir.path().join(dir).is_dir(), "{}", dir);
    }
}

#[tokio::test]
async fn wrong_endpoint_is_a_failure_result() {
    let server = start_test_server().await;
    let endpoint = server.endpoint.replace(FILESYSTEM_PATH, "/nope");
    let gateway = HttpGateway::new(endpoint);

    let result = gateway.ensure_directory_exists("app").await;
    assert!(!result.success);
    assert!(result.message().starts_with("HTTP 404"));
}
