use std::{
    io::{BufRead, BufReader, Read, Write},
    net::TcpListener,
    thread,
    time::Duration,
};

use kyc_core::{ApplicationPayload, IntakeGateway, SubmissionError};
use kyc_domain::{CampBooking, CampSelection, PersonalInfo};
use kyc_intake::{HttpIntakeClient, OutboxIntake};
use tempfile::tempdir;

fn payload() -> ApplicationPayload {
    ApplicationPayload {
        personal_info: PersonalInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            ..PersonalInfo::default()
        },
        camp_selection: CampSelection {
            selected_camps: vec![CampBooking::with_defaults("doro-nawas", "Doro Nawas")],
        },
        agreed_to_terms: true,
        ..ApplicationPayload::default()
    }
}

/// Serves one canned HTTP response and hands back the request body.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let url = format!("http://{}/api/applications", listener.local_addr().expect("addr"));
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream);
        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header");
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                break;
            }
            if let Some((name, value)) = trimmed.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content length");
                }
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).expect("read body");

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).expect("write response");
        stream.flush().expect("flush");
        String::from_utf8(request_body).expect("utf8 body")
    });
    (url, handle)
}

#[test]
fn http_client_posts_json_and_reads_acceptance() {
    let (url, server) = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"success":true,"applicationId":"abc123"}"#,
    );
    let client = HttpIntakeClient::new(url, Duration::from_secs(5)).expect("client");

    let response = client.submit(&payload()).expect("submit");
    assert_eq!(response.application_id.as_deref(), Some("abc123"));

    let sent: serde_json::Value =
        serde_json::from_str(&server.join().expect("server thread")).expect("json body");
    assert_eq!(sent["personalInfo"]["firstName"], "Jane");
    assert_eq!(sent["campSelection"]["selectedCamps"][0]["campId"], "doro-nawas");
    assert_eq!(sent["agreedToTerms"], true);
}

#[test]
fn http_client_surfaces_rejection_on_conflict() {
    let (url, server) = serve_once(
        "HTTP/1.1 409 Conflict",
        r#"{"success":false,"message":"Duplicate"}"#,
    );
    let client = HttpIntakeClient::new(url, Duration::from_secs(5)).expect("client");

    let response = client.submit(&payload()).expect("submit");
    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("Duplicate"));
    server.join().expect("server thread");
}

#[test]
fn unreachable_endpoint_is_a_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let client = HttpIntakeClient::new(
        format!("http://127.0.0.1:{port}/api/applications"),
        Duration::from_secs(2),
    )
    .expect("client");

    let err = client.submit(&payload()).unwrap_err();
    assert!(matches!(err, SubmissionError::Network(_)));
}

#[test]
fn outbox_writes_one_record_per_application() {
    let dir = tempdir().expect("tempdir");
    let outbox = OutboxIntake::new(dir.path().join("outbox"));

    let first = outbox.submit(&payload()).expect("first submit");
    let second = outbox.submit(&payload()).expect("second submit");
    let first_id = first.application_id.expect("first id");
    assert_ne!(Some(first_id.clone()), second.application_id);
    assert!(outbox.record_path(&first_id).exists());

    let pending = outbox.pending().expect("pending");
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].application, payload());
}

#[test]
fn empty_outbox_has_nothing_pending() {
    let dir = tempdir().expect("tempdir");
    let outbox = OutboxIntake::new(dir.path().join("missing"));
    assert!(outbox.pending().expect("pending").is_empty());
}
