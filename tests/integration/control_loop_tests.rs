//! Integration tests for the full tick: sense → report → actuate.
//!
//! A [`TestNode`] wires the real acquisition, connectivity, reporter and
//! actuation components to the simulated probe, simulated WiFi station and
//! the mock reporting service.

use crate::mock_hw::{
    ActuatorCall, RecordingDelay, RecordingSink, Responder, ServiceSettings, TestNode,
};

use roomnode::app::commands::{ActuationCommand, SwitchState};
use roomnode::app::events::AppEvent;
use roomnode::error::{Error, LinkError, ReportError, SensorError};
use roomnode::scheduler::{ControlLoop, TickOutcome};

const WARM_ROOM: ServiceSettings = ServiceSettings {
    user_temp: 25,
    light_window_open: true,
};

fn run_ticks(node: &mut TestNode, n: usize) -> (Vec<TickOutcome>, RecordingDelay, RecordingSink) {
    let mut lp = ControlLoop::new(&node.config);
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();
    let outcomes = (0..n)
        .map(|_| lp.tick(&mut node.device, &mut delay, &mut sink))
        .collect();
    (outcomes, delay, sink)
}

// ── Online path ───────────────────────────────────────────────

#[test]
fn present_and_warm_turns_fan_and_light_on() {
    let mut node = TestNode::new(25.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.pir.set(true);

    let (outcomes, _, sink) = run_ticks(&mut node, 1);

    assert_eq!(
        outcomes,
        vec![TickOutcome::Applied(ActuationCommand::new(SwitchState::On, SwitchState::On))]
    );
    assert_eq!(
        node.outputs().calls,
        vec![ActuatorCall::Fan(true), ActuatorCall::Light(true)]
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Reading(r) if r.presence && (r.temperature_c - 25.25).abs() < 1e-6)),
        1
    );
}

#[test]
fn nobody_home_keeps_everything_off() {
    let mut node = TestNode::new(30.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.pir.set(false);

    run_ticks(&mut node, 1);

    assert_eq!(node.outputs().fan_on(), Some(false));
    assert_eq!(node.outputs().light_on(), Some(false));
    let body = &node.http.requests()[0].body;
    assert!(std::str::from_utf8(body).unwrap().ends_with(r#""presence":0}"#));
}

#[test]
fn cool_room_with_presence_keeps_fan_off() {
    let mut node = TestNode::new(20.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.pir.set(true);

    run_ticks(&mut node, 1);

    assert_eq!(node.outputs().fan_on(), Some(false));
    assert_eq!(node.outputs().light_on(), Some(true));
}

#[test]
fn online_tick_waits_cycle_then_trailing_delay() {
    let mut node = TestNode::new(21.0, Responder::Service(Some(WARM_ROOM))).boot();

    let (_, delay, _) = run_ticks(&mut node, 2);

    assert_eq!(delay.waits_ms, vec![200, 100, 200, 100]);
}

#[test]
fn every_tick_opens_and_releases_one_connection() {
    let mut node = TestNode::new(21.0, Responder::Service(Some(WARM_ROOM))).boot();

    run_ticks(&mut node, 3);
    node.http.set_responder(Responder::Fixed(500, String::new()));
    run_ticks(&mut node, 2);
    node.http.set_responder(Responder::Unreachable);
    run_ticks(&mut node, 2);

    let state = node.http.state.borrow();
    assert_eq!(state.opened, 7);
    assert_eq!(state.closed, 7);
}

// ── Failure paths leave the outputs alone ─────────────────────

#[test]
fn settings_missing_leaves_outputs_untouched() {
    let mut node = TestNode::new(26.0, Responder::Service(None)).boot();
    node.pir.set(true);

    let (outcomes, delay, sink) = run_ticks(&mut node, 1);

    assert_eq!(outcomes, vec![TickOutcome::ReportFailed(ReportError::HttpFailure(400))]);
    assert!(node.outputs().calls.is_empty());
    assert_eq!(delay.waits_ms, vec![200, 100]);
    assert_eq!(
        sink.count(|e| *e == AppEvent::Fault(Error::Report(ReportError::HttpFailure(400)))),
        1
    );
}

#[test]
fn server_error_after_success_keeps_previous_levels() {
    let mut node = TestNode::new(26.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.pir.set(true);
    run_ticks(&mut node, 1);

    node.http.set_responder(Responder::Fixed(404, r#"{"detail":"Not Found"}"#.into()));
    node.pir.set(false);
    let (outcomes, _, _) = run_ticks(&mut node, 1);

    assert_eq!(outcomes, vec![TickOutcome::ReportFailed(ReportError::HttpFailure(404))]);
    assert_eq!(node.outputs().calls.len(), 2);
    assert_eq!(node.outputs().fan_on(), Some(true));
    assert_eq!(node.outputs().light_on(), Some(true));
}

#[test]
fn partial_command_is_not_applied() {
    let mut node = TestNode::new(26.0, Responder::Fixed(200, r#"{"fan":"on"}"#.into())).boot();

    let (outcomes, _, _) = run_ticks(&mut node, 1);

    assert_eq!(outcomes, vec![TickOutcome::ReportFailed(ReportError::DecodeFailure)]);
    assert!(node.outputs().calls.is_empty());
}

#[test]
fn transport_failure_is_reported_not_fatal() {
    let mut node = TestNode::new(26.0, Responder::Unreachable).boot();

    let (outcomes, _, _) = run_ticks(&mut node, 2);

    assert!(outcomes.iter().all(|o| matches!(o, TickOutcome::ReportFailed(ReportError::Transport(_)))));
    assert!(node.outputs().calls.is_empty());
}

// ── Sensor fault ──────────────────────────────────────────────

#[test]
fn disconnected_probe_skips_report_and_waits_short_delay() {
    let mut node = TestNode::new(21.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.device.sensors.probe_mut().sim_set_connected(false);

    let (outcomes, delay, sink) = run_ticks(&mut node, 3);

    assert!(outcomes.iter().all(|o| *o == TickOutcome::SensorFault(SensorError::Disconnected)));
    assert!(node.http.requests().is_empty());
    assert_eq!(node.pir.samples(), 0, "presence is only sampled after a valid temperature");
    assert_eq!(delay.waits_ms, vec![100, 100, 100]);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Fault(Error::Sensor(_)))), 3);
}

#[test]
fn probe_recovers_on_next_tick() {
    let mut node = TestNode::new(21.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.device.sensors.probe_mut().sim_set_connected(false);
    run_ticks(&mut node, 1);

    node.device.sensors.probe_mut().sim_set_connected(true);
    let (outcomes, _, _) = run_ticks(&mut node, 1);

    assert!(matches!(outcomes[0], TickOutcome::Applied(_)));
    assert_eq!(node.http.requests().len(), 1);
}

#[test]
fn slow_conversion_times_out() {
    let mut node = TestNode::new(21.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.device.sensors.probe_mut().sim_set_busy_polls(u32::MAX);

    let (outcomes, delay, _) = run_ticks(&mut node, 1);

    assert_eq!(outcomes, vec![TickOutcome::SensorFault(SensorError::ConversionTimeout)]);
    // 100 polls of 10 ms, then the sensor retry delay.
    assert_eq!(delay.total_ms(), 1000 + 100);
    assert!(node.http.requests().is_empty());
}

// ── Offline path ──────────────────────────────────────────────

#[test]
fn link_loss_suppresses_sensing_and_reconnects_each_tick() {
    let mut node = TestNode::new(21.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.set_ap_reachable(false);

    let (outcomes, delay, sink) = run_ticks(&mut node, 3);

    assert_eq!(
        outcomes,
        vec![
            TickOutcome::Offline { attempt: 1 },
            TickOutcome::Offline { attempt: 2 },
            TickOutcome::Offline { attempt: 3 },
        ]
    );
    assert_eq!(delay.waits_ms, vec![1000, 100, 1000, 100, 1000, 100]);
    assert!(node.http.requests().is_empty());
    assert!(node.outputs().calls.is_empty());
    assert_eq!(node.pir.samples(), 0);
    assert_eq!(sink.count(|e| *e == AppEvent::LinkDown), 1);
    assert_eq!(
        sink.count(|e| *e == AppEvent::Fault(Error::Link(LinkError::Unavailable))),
        3
    );
}

#[test]
fn link_restored_after_reconnect_resumes_reporting() {
    let mut node = TestNode::new(26.0, Responder::Service(Some(WARM_ROOM))).boot();
    node.pir.set(true);
    node.set_ap_reachable(false);
    let mut lp = ControlLoop::new(&node.config);
    let mut delay = RecordingDelay::default();
    let mut sink = RecordingSink::default();

    assert_eq!(
        lp.tick(&mut node.device, &mut delay, &mut sink),
        TickOutcome::Offline { attempt: 1 }
    );

    node.set_ap_reachable(true);
    // Still down until the next reconnect request lands.
    assert_eq!(
        lp.tick(&mut node.device, &mut delay, &mut sink),
        TickOutcome::Offline { attempt: 2 }
    );
    assert!(matches!(
        lp.tick(&mut node.device, &mut delay, &mut sink),
        TickOutcome::Applied(_)
    ));

    assert_eq!(sink.count(|e| *e == AppEvent::LinkDown), 1);
    assert_eq!(sink.count(|e| *e == AppEvent::LinkUp), 1);
    assert_eq!(node.http.requests().len(), 1);
    assert_eq!(lp.tick_count(), 3);
}
