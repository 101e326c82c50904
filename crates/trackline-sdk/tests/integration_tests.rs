//! Integration tests for the Trackline SDK
//!
//! Each test runs the client against a local tiny_http server that records
//! every request and serves canned JSON, so transport behavior (auth
//! header, exact bodies, status translation) is asserted on the wire rather
//! than on internals.

use std::io::Read as _;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::json;
use tiny_http::{Header, Response, Server};
use trackline_domain::{Project, Story, StoryType};
use trackline_sdk::{NewStory, SdkError, TrackerClient};

/// One request as the server saw it
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    url: String,
    body: String,
    token: Option<String>,
}

/// Canned-response HTTP server running on an OS-assigned port
struct TestServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl TestServer {
    /// Spawn a server answering each request via `respond(method, url)`
    fn start<F>(respond: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("failed to bind test server");
        let port = server
            .server_addr()
            .to_ip()
            .expect("tcp listener")
            .port();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                request.as_reader().read_to_string(&mut body).ok();

                let token = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("X-TrackerToken"))
                    .map(|h| h.value.as_str().to_string());

                let method = request.method().as_str().to_string();
                let url = request.url().to_string();
                log.lock().unwrap().push(Recorded {
                    method: method.clone(),
                    url: url.clone(),
                    body,
                    token,
                });

                let (status, payload) = respond(&method, &url);
                let response = Response::from_string(payload)
                    .with_status_code(status)
                    .with_header(
                        Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                request.respond(response).ok();
            }
        });

        TestServer {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    fn client(&self) -> TrackerClient {
        TrackerClient::new("test-token").with_base_url(self.base_url.clone())
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn project_json(id: i64, name: &str) -> serde_json::Value {
    json!({"id": id, "name": name, "point_scale": "0,1,2,3"})
}

fn story_json(project_id: i64, story_id: i64, story_type: &str, estimate: i64) -> serde_json::Value {
    json!({
        "id": story_id,
        "project_id": project_id,
        "name": format!("Story {}", story_id),
        "story_type": story_type,
        "current_state": "unstarted",
        "estimate": estimate
    })
}

/// Build a Story snapshot without going through the network
fn story_fixture(project_id: i64, story_id: i64, story_type: &str, estimate: Option<i64>) -> Story {
    let mut node = json!({
        "id": story_id,
        "project_id": project_id,
        "name": format!("Story {}", story_id),
        "story_type": story_type,
        "current_state": "unstarted"
    });
    if let Some(estimate) = estimate {
        node["estimate"] = json!(estimate);
    }
    Story::from_json(&node).unwrap()
}

#[test]
fn test_projects_listing_and_auth_header() {
    let server = TestServer::start(|_, _| {
        (
            200,
            json!([project_json(1, "Apollo"), project_json(2, "Gemini")]).to_string(),
        )
    });

    let projects = server.client().projects().unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].name, "Apollo");
    assert_eq!(projects[1].project_id, 2);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/projects");
    assert_eq!(requests[0].token.as_deref(), Some("test-token"));
}

#[test]
fn test_load_story_translates_404_to_none() {
    let server = TestServer::start(|_, url| {
        if url.ends_with("/stories/42") {
            (404, json!({"error": "not found"}).to_string())
        } else {
            (500, json!({"error": "boom"}).to_string())
        }
    });

    let client = server.client();
    let project = Project::from_json(&project_json(7, "Apollo")).unwrap();

    // 404 on a single story load is the one error-to-value translation
    assert!(client.load_story(&project, 42).unwrap().is_none());

    // any other status propagates
    match client.load_story(&project, 43) {
        Err(SdkError::Http { status: 500, .. }) => {}
        other => panic!("expected HTTP 500 to propagate, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_update_story_sends_exact_body() {
    let server = TestServer::start(|_, _| (200, "{}".to_string()));

    let client = server.client();
    let story = story_fixture(7, 1001, "feature", None);

    client.assign_estimate(&story, 3).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].url, "/projects/7/stories/1001");
    assert_eq!(requests[0].body, r#"{"estimate":3}"#);
}

#[test]
fn test_start_on_unestimated_story_issues_no_request() {
    let server = TestServer::start(|_, _| (200, "{}".to_string()));

    let client = server.client();
    let story = story_fixture(7, 1001, "feature", Some(-1));

    for result in [
        client.start(&story),
        client.finish(&story),
        client.deliver(&story),
    ] {
        match result {
            Err(SdkError::InvalidState(_)) => {}
            other => panic!("expected InvalidState, got {:?}", other.map(|_| ())),
        }
    }

    assert!(
        server.requests().is_empty(),
        "precondition failures must not reach the network"
    );
}

#[test]
fn test_accept_and_reject_skip_precondition() {
    let server = TestServer::start(|_, _| (200, "{}".to_string()));

    let client = server.client();
    let story = story_fixture(7, 1001, "feature", Some(-1));

    client.accept(&story).unwrap();
    client.reject(&story).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, r#"{"current_state":"accepted"}"#);
    assert_eq!(requests[1].body, r#"{"current_state":"rejected"}"#);
}

#[test]
fn test_unestimated_stories_unions_bugs_and_features() {
    let server = TestServer::start(|_, url| {
        if url.contains("type%3Abug") {
            (200, json!([story_json(7, 1, "bug", -1)]).to_string())
        } else if url.contains("type%3Afeature") {
            (
                200,
                json!([
                    story_json(7, 2, "feature", -1),
                    story_json(7, 3, "feature", 2)
                ])
                .to_string(),
            )
        } else {
            (404, "{}".to_string())
        }
    });

    let client = server.client();
    let project = Project::from_json(&project_json(7, "Apollo")).unwrap();

    let stories = client.unestimated_stories(&project).unwrap();
    let ids: Vec<i64> = stories.iter().map(|s| s.story_id).collect();

    // the open bug and the unestimated feature, as distinct entities;
    // the estimated feature is filtered out client-side
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn test_find_project_for_story_short_circuits() {
    let server = TestServer::start(|_, url| {
        if url == "/projects" {
            (
                200,
                json!([project_json(1, "Apollo"), project_json(2, "Gemini")]).to_string(),
            )
        } else if url == "/projects/1/stories/42" {
            (404, json!({"error": "not found"}).to_string())
        } else if url == "/projects/2/stories/42" {
            (200, story_json(2, 42, "bug", -1).to_string())
        } else {
            (500, json!({"error": "unexpected route"}).to_string())
        }
    });

    let client = server.client();
    let project = client.find_project_for_story(42).unwrap().unwrap();
    assert_eq!(project.name, "Gemini");

    // one projects listing, then one lookup per project up to the hit
    let urls: Vec<String> = server.requests().iter().map(|r| r.url.clone()).collect();
    assert_eq!(
        urls,
        vec![
            "/projects".to_string(),
            "/projects/1/stories/42".to_string(),
            "/projects/2/stories/42".to_string(),
        ]
    );
}

#[test]
fn test_find_story_with_project_index_is_direct() {
    let server = TestServer::start(|_, url| {
        if url == "/projects" {
            (
                200,
                json!([project_json(1, "Apollo"), project_json(2, "Gemini")]).to_string(),
            )
        } else if url == "/projects/2/stories/42" {
            (200, story_json(2, 42, "feature", 3).to_string())
        } else {
            (500, json!({"error": "unexpected route"}).to_string())
        }
    });

    let client = server.client();
    let story = client.find_story(42, Some(1)).unwrap().unwrap();
    assert_eq!(story.story_id, 42);
    assert_eq!(story.project_id, 2);

    // projects listing plus exactly one story lookup, no scan
    assert_eq!(server.requests().len(), 2);
}

#[test]
fn test_create_story_posts_payload() {
    let server = TestServer::start(|_, _| (200, "{}".to_string()));

    let client = server.client();
    let project = Project::from_json(&project_json(7, "Apollo")).unwrap();

    let new_story = NewStory::new("Fix the build")
        .with_story_type(StoryType::Bug);
    client.create_story(&project, &new_story).unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/projects/7/stories");
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&requests[0].body).unwrap(),
        json!({"name": "Fix the build", "story_type": "bug"})
    );
}

#[test]
fn test_stories_filter_reaches_server_escaped() {
    let server = TestServer::start(|_, _| (200, "[]".to_string()));

    let client = server.client();
    let project = Project::from_json(&project_json(7, "Apollo")).unwrap();

    let stories = client.stories(&project, "type:bug state:unstarted").unwrap();
    assert!(stories.is_empty());

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let url = &requests[0].url;
    assert!(url.starts_with("/projects/7/stories?filter="), "url: {}", url);
    assert!(!url.contains(' '), "filter must be escaped: {}", url);
}
