use mock_server::MockCms;
use serde_json::json;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("listening on {addr}");

    let cms = MockCms::new().with_collection(
        "posts",
        vec![
            mock_server::document("en-US", json!({"title": "Hello"})),
            mock_server::document("de-DE", json!({"title": "Hallo"})),
        ],
    );
    mock_server::run(listener, cms).await
}
