//! Integration tests for the HTTP design studio backend
#![cfg(feature = "designer")]

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use corruptink::designer::{DesignStudio, DesignerConfig, HttpDesignStudio};
use serde_json::json;

/// Start a stub generative backend on an ephemeral port.
fn start_stub<F>(handler: F) -> String
where
    F: Fn(&str) -> (u16, String) + Send + 'static,
{
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr();

    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let (status, body) = handler(request.url());
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });

    format!("http://{}/v1", addr)
}

fn studio_for(endpoint: String) -> HttpDesignStudio {
    HttpDesignStudio::new(DesignerConfig {
        endpoint,
        timeout_ms: 5000,
        ..DesignerConfig::default()
    })
    .expect("Failed to build design studio")
}

#[test]
fn suggests_parsed_ideas_from_the_text_model() {
    let endpoint = start_stub(|url| match url {
        "/v1/ideas" => (
            200,
            json!({
                "text": "Sure!\n1. A phoenix rising from geometric ashes.\n2. A minimal \
                         soundwave of a favorite song.\n3. A compass rose wrapped in waves."
            })
            .to_string(),
        ),
        _ => (404, "Not Found".to_string()),
    });

    let studio = studio_for(endpoint);
    let ideas = studio
        .suggest_ideas("tattoo ideas for a musician")
        .expect("Failed to fetch ideas");

    assert_eq!(ideas.len(), 3);
    assert_eq!(ideas[0], "A phoenix rising from geometric ashes.");
    assert_eq!(ideas[2], "A compass rose wrapped in waves.");
}

#[test]
fn renders_a_design_from_base64_image_bytes() {
    let image_bytes: &[u8] = b"fake-jpeg-bytes";
    let encoded = BASE64.encode(image_bytes);
    let endpoint = start_stub(move |url| match url {
        "/v1/designs" => (
            200,
            json!({
                "generatedImages": [
                    { "image": { "imageBytes": encoded } }
                ]
            })
            .to_string(),
        ),
        _ => (404, "Not Found".to_string()),
    });

    let studio = studio_for(endpoint);
    let artifact = studio
        .render_design("a majestic lion wearing a crown of roses")
        .expect("Failed to render design");

    assert_eq!(artifact.mime(), "image/jpeg");
    assert_eq!(artifact.len(), image_bytes.len());
    assert!(artifact.to_data_url().starts_with("data:image/jpeg;base64,"));
}

#[test]
fn backend_trouble_surfaces_as_a_busy_message() {
    let endpoint = start_stub(|_| (500, "backend exploded".to_string()));
    let studio = studio_for(endpoint);

    let err = studio
        .suggest_ideas("dragons")
        .expect_err("ideas should fail");
    assert!(err.to_string().contains("busy"), "got: {}", err);

    let err = studio
        .render_design("a dragon")
        .expect_err("render should fail");
    assert!(err.to_string().contains("busy"), "got: {}", err);
}

#[test]
fn empty_input_is_rejected_before_any_request() {
    // Endpoint that would fail if contacted; the guard fires first
    let studio = studio_for("http://127.0.0.1:1/v1".to_string());

    let err = studio.suggest_ideas("   ").expect_err("empty concept");
    assert!(err.to_string().contains("topic"));

    let err = studio.render_design("").expect_err("empty description");
    assert!(err.to_string().contains("describe"));
}
