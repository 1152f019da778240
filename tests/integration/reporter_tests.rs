//! Integration tests for the telemetry reporter against the mock service.

use crate::mock_hw::{ENDPOINT, MockHttp, Responder, ServiceSettings};

use roomnode::app::commands::{ActuationCommand, SwitchState};
use roomnode::app::ports::TransportError;
use roomnode::error::ReportError;
use roomnode::sensors::SensorReading;
use roomnode::telemetry::TelemetryReporter;

fn reading(temperature_c: f32, presence: bool) -> SensorReading {
    SensorReading {
        temperature_c,
        presence,
    }
}

#[test]
fn posts_json_to_sensors_data_route() {
    let http = MockHttp::new(Responder::Service(Some(ServiceSettings {
        user_temp: 24,
        light_window_open: false,
    })));
    let mut reporter = TelemetryReporter::new(http.clone(), ENDPOINT);

    let cmd = reporter.report(&reading(24.0, true)).unwrap();

    assert_eq!(cmd, ActuationCommand::new(SwitchState::On, SwitchState::Off));
    let req = &http.requests()[0];
    assert_eq!(req.url, "http://10.0.0.5:8000/sensors_data");
    assert!(
        req.headers
            .iter()
            .any(|(k, v)| k == "Content-Type" && v == "application/json")
    );
    assert_eq!(req.body, br#"{"temperature":24.0,"presence":1}"#);
}

#[test]
fn trailing_slash_on_endpoint_is_not_doubled() {
    let http = MockHttp::new(Responder::Fixed(200, r#"{"fan":"off","light":"off"}"#.into()));
    let mut reporter = TelemetryReporter::new(http.clone(), "http://10.0.0.5:8000/");

    reporter.report(&reading(20.0, false)).unwrap();

    assert_eq!(http.requests()[0].url, "http://10.0.0.5:8000/sensors_data");
}

#[test]
fn only_200_is_success() {
    for status in [201, 204, 301, 400, 404, 422, 500, 503] {
        let http = MockHttp::new(Responder::Fixed(status, r#"{"fan":"on","light":"on"}"#.into()));
        let mut reporter = TelemetryReporter::new(http, ENDPOINT);
        assert_eq!(
            reporter.report(&reading(22.0, true)),
            Err(ReportError::HttpFailure(status)),
            "status {status}"
        );
    }
}

#[test]
fn extra_response_fields_are_ignored() {
    let http = MockHttp::new(Responder::Fixed(
        200,
        r#"{"fan":"off","light":"on","user_temp":25}"#.into(),
    ));
    let mut reporter = TelemetryReporter::new(http, ENDPOINT);

    assert_eq!(
        reporter.report(&reading(22.0, true)),
        Ok(ActuationCommand::new(SwitchState::Off, SwitchState::On))
    );
}

#[test]
fn malformed_bodies_are_decode_failures() {
    for body in [
        "",
        "not json",
        r#"{"fan":"on"}"#,
        r#"{"light":"on"}"#,
        r#"{"fan":"ON","light":"off"}"#,
        r#"{"fan":true,"light":"off"}"#,
        r#"{"fan":"on","light":null}"#,
        r#"["on","off"]"#,
        "[]",
        r#""on""#,
        "1",
        "null",
    ] {
        let http = MockHttp::new(Responder::Fixed(200, body.into()));
        let mut reporter = TelemetryReporter::new(http, ENDPOINT);
        assert_eq!(
            reporter.report(&reading(22.0, true)),
            Err(ReportError::DecodeFailure),
            "body {body:?}"
        );
    }
}

#[test]
fn transport_failure_releases_connection() {
    let http = MockHttp::new(Responder::Unreachable);
    let mut reporter = TelemetryReporter::new(http.clone(), ENDPOINT);

    assert_eq!(
        reporter.report(&reading(22.0, true)),
        Err(ReportError::Transport(TransportError::Io))
    );
    assert_eq!(http.open_connections(), 0);
    assert_eq!(reporter.reports_sent(), 0);
}
