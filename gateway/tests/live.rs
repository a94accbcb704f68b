//! End-to-end run of the gateway over real HTTP.
//!
//! Binds a random port, serves the gateway on a background runtime and talks
//! to it with ureq, so the listener, CORS layer and body decoding are all
//! exercised the way a browser or client would.

use std::sync::Arc;

use async_trait::async_trait;
use gateway::GatewayConfig;
use gateway_core::{ApiResponse, RequestContext, RouteError, RouteTable};
use serde_json::{json, Value};

struct Notes;

#[async_trait]
impl RouteTable for Notes {
    async fn dispatch(&self, ctx: RequestContext) -> Result<Option<ApiResponse>, RouteError> {
        match (ctx.method.as_str(), ctx.path.as_str()) {
            ("POST", "/notes") => {
                let title = ctx
                    .body
                    .as_ref()
                    .and_then(|body| body.get("title"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| RouteError::failed("note without title"))?;
                Ok(Some(ApiResponse::new(201, json!({"title": title}))))
            }
            _ => Ok(None),
        }
    }
}

/// Start the gateway on `127.0.0.1:0` and return its base URL.
fn spawn_gateway(config: GatewayConfig) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            gateway::run(listener, Arc::new(config), Arc::new(Notes)).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

fn production() -> GatewayConfig {
    GatewayConfig::from_lookup(|key| match key {
        "NODE_ENV" => Some("production".to_string()),
        "FRONTEND_URL" => Some("https://example.com".to_string()),
        _ => None,
    })
}

#[test]
fn serves_full_surface() {
    let base = spawn_gateway(production());
    let agent = agent();

    // Step 1: health from the trusted frontend.
    let mut resp = agent
        .get(&format!("{base}/health"))
        .header("Origin", "https://example.com")
        .call()
        .expect("HTTP transport error");
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "https://example.com"
    );
    assert_eq!(resp.headers()["access-control-allow-credentials"], "true");
    let body: Value = serde_json::from_str(&resp.body_mut().read_to_string().unwrap()).unwrap();
    assert_eq!(body, json!({"status": "ok", "environment": "production"}));

    // Step 2: a foreign origin is served without CORS headers.
    let resp = agent
        .get(&format!("{base}/health"))
        .header("Origin", "https://evil.com")
        .call()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().get("access-control-allow-origin").is_none());
    assert!(resp.headers().get("access-control-allow-credentials").is_none());

    // Step 3: JSON payload dispatched to the route table.
    let mut resp = agent
        .post(&format!("{base}/api/notes"))
        .content_type("application/json")
        .send(r#"{"title":"Integration test"}"#.as_bytes())
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let body: Value = serde_json::from_str(&resp.body_mut().read_to_string().unwrap()).unwrap();
    assert_eq!(body["title"], "Integration test");

    // Step 4: route table fault becomes the generic envelope.
    let mut resp = agent
        .post(&format!("{base}/api/notes"))
        .content_type("application/json")
        .send(r#"{"body":"no title here"}"#.as_bytes())
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(
        resp.body_mut().read_to_string().unwrap(),
        r#"{"error":"Internal server error"}"#
    );

    // Step 5: malformed JSON is a fault too.
    let mut resp = agent
        .post(&format!("{base}/api/notes"))
        .content_type("application/json")
        .send(r#"{"title":"#.as_bytes())
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    assert_eq!(
        resp.body_mut().read_to_string().unwrap(),
        r#"{"error":"Internal server error"}"#
    );

    // Step 6: unmatched paths inside and outside /api.
    for path in ["/api/unknown", "/unknown"] {
        let mut resp = agent.get(&format!("{base}{path}")).call().unwrap();
        assert_eq!(resp.status().as_u16(), 404, "{path}");
        assert_eq!(
            resp.body_mut().read_to_string().unwrap(),
            r#"{"error":"Route not found"}"#
        );
    }

    // Step 7: preflight.
    let mut resp = agent
        .options(&format!("{base}/api/notes"))
        .header("Origin", "https://example.com")
        .header("Access-Control-Request-Method", "POST")
        .call()
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "https://example.com"
    );
    assert!(resp.body_mut().read_to_string().unwrap().is_empty());
}
