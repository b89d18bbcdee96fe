use kbws_core::workspace::{ListWorkspacesParams, SaveObjectParams};
use kbws_core::{KbwsError, WorkspaceMetadata, WorkspaceService};
use kbws_interaction::{ClientConfig, Credentials, WorkspaceClient, workspace};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A request as it arrived at the local server.
struct CapturedRequest {
    head: String,
    body: Value,
}

/// Serves exactly one HTTP exchange with a canned response.
///
/// Returns the service URL and a handle that yields the captured request.
async fn serve_once(
    status: &'static str,
    response_body: Value,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/services/ws", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut stream).await;

        let payload = response_body.to_string();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{payload}",
            payload.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        captured
    });

    (url, handle)
}

async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let content_length: usize = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|v| v.trim().parse().unwrap())
        .unwrap_or(0);

    while buf.len() < head_end + content_length {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = serde_json::from_slice(&buf[head_end..head_end + content_length]).unwrap();
    CapturedRequest { head, body }
}

fn client(url: &str) -> WorkspaceClient {
    WorkspaceClient::new(ClientConfig::new(url, Credentials::token("tok123"))).unwrap()
}

#[tokio::test]
async fn test_list_workspaces_round_trip_decodes_metadata() {
    let (url, server) = serve_once(
        "200 OK",
        json!({
            "version": "1.1",
            "result": [[
                ["alpha", "jdoe", "2014-03-01T10:00:00+0000", 3, "a", "n", 5]
            ]]
        }),
    )
    .await;

    let records = client(&url)
        .list_workspaces(ListWorkspacesParams::default())
        .await
        .unwrap();

    assert_eq!(
        records,
        vec![WorkspaceMetadata {
            name: "alpha".to_string(),
            owner: "jdoe".to_string(),
            moddate: "2014-03-01T10:00:00+0000".to_string(),
            object_count: 3,
            user_permission: "a".to_string(),
            global_permission: "n".to_string(),
            id: 5,
        }]
    );

    let request = server.await.unwrap();
    assert!(request.head.starts_with("post /services/ws "));
    assert!(request.head.contains("authorization: tok123"));
    assert_eq!(request.body["version"], "1.1");
    assert_eq!(request.body["method"], "Workspace.list_workspaces");
    assert_eq!(request.body["params"], json!([{"excludeGlobal": 1}]));
    assert!(request.body["id"].is_string());
}

#[tokio::test]
async fn test_server_error_envelope_arrives_as_remote_error() {
    let (url, server) = serve_once(
        "500 Internal Server Error",
        json!({
            "version": "1.1",
            "error": {
                "name": "JSONRPCError",
                "code": -32500,
                "message": "boom",
                "error": "tb"
            }
        }),
    )
    .await;

    let err = client(&url)
        .list_workspaces(ListWorkspacesParams::default())
        .await
        .unwrap_err();

    match err {
        KbwsError::Remote {
            name,
            code,
            message,
            detail,
        } => {
            assert_eq!(name, "JSONRPCError");
            assert_eq!(code, -32500);
            assert_eq!(message, "boom");
            assert_eq!(detail.as_deref(), Some("tb"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_save_object_wire_body_is_exactly_the_four_keys() {
    let info = json!(["net", "KBaseNetworks.InteractionSet-1.0", "2014-03-01T10:00:00+0000", 1]);
    let (url, server) =
        serve_once("200 OK", json!({"version": "1.1", "result": [info.clone()]})).await;

    let params = SaveObjectParams {
        workspace: "alpha".to_string(),
        object_type: "KBaseNetworks.InteractionSet-1.0".to_string(),
        id: "net".to_string(),
        data: json!({"id": "net", "interactions": []}),
    };
    let result = client(&url).save_object(params).await.unwrap();

    assert_eq!(result, info);

    let request = server.await.unwrap();
    assert_eq!(request.body["method"], "Workspace.save_object");
    assert_eq!(
        request.body["params"],
        json!([{
            "workspace": "alpha",
            "type": "KBaseNetworks.InteractionSet-1.0",
            "id": "net",
            "data": {"id": "net", "interactions": []},
        }])
    );
}

#[tokio::test]
async fn test_workspace_lookup_over_http_wraps_found_record() {
    let (url, server) = serve_once(
        "200 OK",
        json!({
            "version": "1.1",
            "result": [[
                ["beta", "jdoe", "2014-03-02T10:00:00+0000", 0, "w", "n", 8],
                ["alpha", "jdoe", "2014-03-01T10:00:00+0000", 3, "a", "n", 5]
            ]]
        }),
    )
    .await;

    let ws = workspace(Credentials::token("tok123"), "alpha", false, &url)
        .await
        .unwrap();

    assert_eq!(ws.id(), 5);
    assert_eq!(ws.to_string(), "{Workspace, name: alpha, id: 5}");
    server.await.unwrap();
}
