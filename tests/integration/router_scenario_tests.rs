//! End-to-end scenarios: request URI → CommandRouter → VehicleService →
//! recorded actuator calls.

use crate::mock_hw::{
    make_vehicle, make_vehicle_with, ActuatorCall, LogSink, MockService, MockTicker,
};

use wificar::app::state::{DriveDirection, HeadlightMode, SteeringPosition};
use wificar::router::{CommandRouter, Method, Reply, Request};

fn get(svc: &mut MockService, sink: &mut LogSink, uri: &str) -> Reply {
    CommandRouter::respond(&Request::parse(Method::Get, uri), svc, sink)
}

#[test]
fn boot_asserts_safe_outputs() {
    let (svc, _, sink) = make_vehicle();
    let hw = svc.actuators();
    assert_eq!(hw.drive_lines(), Some(DriveDirection::Stopped));
    assert_eq!(hw.motor_duty(), Some(0));
    assert_eq!(hw.steering_pulse(), Some(1500));
    assert!(!hw.headlights());
    assert!(!hw.reverse_light());
    assert_eq!(sink.events.len(), 1);
}

#[test]
fn forward_then_speed_change_applies_immediately() {
    let (mut svc, _, mut sink) = make_vehicle();

    let r = get(&mut svc, &mut sink, "/forward");
    assert_eq!((r.status, r.body.as_str()), (200, "forward"));

    let r = get(&mut svc, &mut sink, "/changeSpeed?speed=120");
    assert_eq!(r.status, 200);
    assert_eq!(r.body, "speed limited to 120");

    assert_eq!(svc.actuators().motor_duty(), Some(120));
    assert_eq!(svc.state().drive_direction, DriveDirection::Forward);
    assert_eq!(svc.actuators().drive_lines(), Some(DriveDirection::Forward));
}

#[test]
fn speed_change_while_stopped_waits_for_next_drive() {
    let (mut svc, _, mut sink) = make_vehicle();
    get(&mut svc, &mut sink, "/changeSpeed?speed=80");
    assert_eq!(svc.actuators().motor_duty(), Some(0));
    get(&mut svc, &mut sink, "/back");
    assert_eq!(svc.actuators().motor_duty(), Some(80));
}

#[test]
fn oversized_speed_clamps_to_max() {
    let (mut svc, _, mut sink) = make_vehicle();
    let r = get(&mut svc, &mut sink, "/changeSpeed?speed=999");
    assert_eq!(r.body, "speed limited to 255");
    assert_eq!(svc.state().speed, 255);
}

#[test]
fn malformed_or_missing_speed_reads_as_zero() {
    let (mut svc, _, mut sink) = make_vehicle();
    get(&mut svc, &mut sink, "/changeSpeed?speed=200");
    get(&mut svc, &mut sink, "/changeSpeed?speed=fast");
    assert_eq!(svc.state().speed, 0);

    get(&mut svc, &mut sink, "/changeSpeed?speed=200");
    get(&mut svc, &mut sink, "/changeSpeed");
    assert_eq!(svc.state().speed, 0);

    get(&mut svc, &mut sink, "/changeSpeed?speed=-40");
    assert_eq!(svc.state().speed, 0);
}

#[test]
fn reverse_light_follows_reverse_drive() {
    let (mut svc, _, mut sink) = make_vehicle();

    get(&mut svc, &mut sink, "/back");
    assert!(svc.actuators().reverse_light());
    assert!(svc.state().reverse_light_on);

    let r = get(&mut svc, &mut sink, "/driveStop");
    assert_eq!(r.body, "driveStop");
    assert!(!svc.actuators().reverse_light());
    assert!(!svc.state().reverse_light_on);
    assert_eq!(svc.actuators().motor_duty(), Some(0));
}

#[test]
fn drive_stop_twice_is_idempotent() {
    let (mut svc, _, mut sink) = make_vehicle();
    get(&mut svc, &mut sink, "/changeSpeed?speed=60");
    get(&mut svc, &mut sink, "/forward");
    get(&mut svc, &mut sink, "/driveStop");
    let once = svc.state();
    get(&mut svc, &mut sink, "/driveStop");
    assert_eq!(svc.state(), once);
    assert_eq!(once.speed, 60);
}

#[test]
fn steering_commands_use_fixed_pulses() {
    let (mut svc, _, mut sink) = make_vehicle();

    assert_eq!(get(&mut svc, &mut sink, "/left").body, "left");
    assert_eq!(svc.actuators().steering_pulse(), Some(1000));
    assert_eq!(svc.state().steering, SteeringPosition::Left);

    assert_eq!(get(&mut svc, &mut sink, "/right").body, "right");
    assert_eq!(svc.actuators().steering_pulse(), Some(2000));

    assert_eq!(get(&mut svc, &mut sink, "/steerStop").body, "steerStop");
    assert_eq!(svc.actuators().steering_pulse(), Some(1500));
    assert_eq!(svc.state().steering, SteeringPosition::Center);
}

#[test]
fn manual_headlights() {
    let (mut svc, _, mut sink) = make_vehicle();

    assert_eq!(get(&mut svc, &mut sink, "/LightsOn").body, "headlights on");
    assert!(svc.actuators().headlights());
    assert_eq!(svc.state().headlight_mode, HeadlightMode::On);

    assert_eq!(get(&mut svc, &mut sink, "/LightsOff").body, "headlights off");
    assert!(!svc.actuators().headlights());
    assert_eq!(svc.state().headlight_mode, HeadlightMode::Off);
}

#[test]
fn lights_auto_attaches_ticker_once() {
    let (mut svc, _, mut sink) = make_vehicle();
    assert_eq!(get(&mut svc, &mut sink, "/LightsAuto").body, "headlights automatic");
    get(&mut svc, &mut sink, "/LightsAuto");
    assert_eq!(svc.ticker().attaches, 1);
    assert_eq!(svc.ticker().interval_ms, Some(1000));

    get(&mut svc, &mut sink, "/LightsOn");
    get(&mut svc, &mut sink, "/LightsOff");
    assert_eq!(svc.ticker().detaches, 1);
}

#[test]
fn lights_auto_with_dead_timer_keeps_manual_mode() {
    let (mut svc, sensor, mut sink) = make_vehicle_with(MockTicker {
        fail_attach: true,
        ..Default::default()
    });
    get(&mut svc, &mut sink, "/LightsOn");
    let events_before = sink.events.len();

    let r = get(&mut svc, &mut sink, "/LightsAuto");
    assert_eq!(r.status, 200);
    assert!(r.body.starts_with("headlights unchanged"), "{}", r.body);
    assert_eq!(svc.state().headlight_mode, HeadlightMode::On);
    assert!(!svc.light_automation_enabled());
    assert_eq!(sink.events.len(), events_before);

    sensor.set(0);
    assert_eq!(svc.on_light_tick(&mut sink), None);
    assert!(svc.actuators().headlights());

    let status = get(&mut svc, &mut sink, "/status");
    let v: serde_json::Value = serde_json::from_str(&status.body).unwrap();
    assert_eq!(v["light_automation"], false);
    assert_eq!(v["state"]["headlight_mode"], "On");
}

#[test]
fn unknown_path_reports_diagnostics_without_actuation() {
    let (mut svc, _, mut sink) = make_vehicle();
    let calls_before = svc.actuators().calls.len();
    let state_before = svc.state();

    let r = get(&mut svc, &mut sink, "/foo?x=1");

    assert_eq!(r.status, 404);
    assert!(r.body.contains("/foo"));
    assert!(r.body.contains("GET"));
    assert!(r.body.contains("x: 1"));
    assert_eq!(svc.actuators().calls.len(), calls_before);
    assert_eq!(svc.state(), state_before);
    assert_eq!(svc.commands_handled(), 0);
}

#[test]
fn post_is_accepted_and_reported() {
    let (mut svc, _, mut sink) = make_vehicle();
    let r = CommandRouter::respond(&Request::parse(Method::Post, "/forward"), &mut svc, &mut sink);
    assert_eq!(r.body, "forward");

    let r = CommandRouter::respond(&Request::parse(Method::Post, "/nope"), &mut svc, &mut sink);
    assert!(r.body.contains("Method: POST"));
}

#[test]
fn root_serves_control_page() {
    let (mut svc, _, mut sink) = make_vehicle();
    let r = get(&mut svc, &mut sink, "/");
    assert_eq!(r.status, 200);
    assert_eq!(r.content_type, "text/html");
    assert!(r.body.contains("WifiCar"));
    assert!(svc.actuators().calls.iter().all(|c| !matches!(c, ActuatorCall::MotorDuty(d) if *d > 0)));
}

#[test]
fn status_reports_state_as_json() {
    let (mut svc, _, mut sink) = make_vehicle();
    get(&mut svc, &mut sink, "/changeSpeed?speed=42");
    get(&mut svc, &mut sink, "/back");

    let r = get(&mut svc, &mut sink, "/status");
    assert_eq!(r.status, 200);
    assert_eq!(r.content_type, "application/json");

    let v: serde_json::Value = serde_json::from_str(&r.body).unwrap();
    assert_eq!(v["state"]["speed"], 42);
    assert_eq!(v["state"]["drive_direction"], "Reverse");
    assert_eq!(v["state"]["reverse_light_on"], true);
    assert_eq!(v["light_automation"], false);
}
