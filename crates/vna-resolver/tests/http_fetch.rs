use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Router, routing::get};
use vna_manifest::{AssetEntry, AssetType, Manifest};
use vna_resolver::{ResolveError, ResolverConfig};

fn sample_manifest() -> String {
    let mut manifest = Manifest::new("demo");
    manifest.generated_at = "2026-01-01T00:00:00Z".into();
    manifest.assets.insert(
        "se/explosion-02".into(),
        AssetEntry {
            path: "se/explosion-02.mp3".into(),
            ext: "mp3".into(),
            asset_type: AssetType::Audio,
            aliases: vec!["boom".into()],
        },
    );
    manifest.rebuild_alias_map();
    serde_json::to_string(&manifest).expect("encode")
}

async fn serve(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    (addr, server)
}

#[tokio::test]
async fn resolves_over_http_with_a_single_fetch() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let body = sample_manifest();
    let app = Router::new().route(
        "/scenarios/demo/assets/manifest.json",
        get(move || {
            let counter = counter.clone();
            let body = body.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                body
            }
        }),
    );
    let (addr, server) = serve(app).await;

    let config = ResolverConfig::new(format!("http://{addr}/scenarios"));
    let resolver = config.resolver("demo");

    let by_alias = resolver.resolve_id("boom").await.expect("resolve");
    assert_eq!(
        by_alias.as_deref(),
        Some(format!("http://{addr}/scenarios/demo/assets/se/explosion-02.mp3").as_str())
    );
    // Second resolution hits the cache, not the wire.
    resolver.resolve_id("se/explosion-02").await.expect("cached");
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    server.abort();
    let _ = server.await;
}

#[tokio::test]
async fn missing_manifest_surfaces_a_load_error() {
    let app = Router::new();
    let (addr, server) = serve(app).await;

    let config = ResolverConfig::new(format!("http://{addr}/scenarios"));
    let resolver = config.resolver("demo");

    let err = resolver.load_manifest().await.expect_err("404");
    match err {
        ResolveError::Manifest { scenario_id, .. } => assert_eq!(scenario_id, "demo"),
        other => panic!("unexpected error: {other:?}"),
    }

    server.abort();
    let _ = server.await;
}
