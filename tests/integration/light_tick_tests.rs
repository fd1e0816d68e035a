//! Automatic headlight behaviour: periodic ticks, threshold crossings and
//! the tick-after-disable race.

use std::sync::{Arc, Mutex};
use std::thread;

use crate::mock_hw::{make_vehicle, LogSink};

use wificar::app::commands::VehicleCommand;
use wificar::app::events::VehicleEvent;
use wificar::app::state::HeadlightMode;
use wificar::events::{Event, EventQueue};

#[test]
fn auto_mode_toggles_output_across_threshold() {
    let (mut svc, sensor, mut sink) = make_vehicle();
    svc.handle_command(VehicleCommand::Headlights(HeadlightMode::Auto), &mut sink);

    for (sample, expect_on) in [(1200, false), (3600, true), (3499, false), (3500, true), (200, false)] {
        sensor.set(sample);
        assert_eq!(svc.on_light_tick(&mut sink), Some(expect_on), "sample {}", sample);
        assert_eq!(svc.actuators().headlights(), expect_on, "sample {}", sample);
        assert_eq!(svc.state().headlight_mode, HeadlightMode::Auto);
    }
    assert_eq!(svc.light_ticks(), 5);
    assert!(sink
        .events
        .contains(&VehicleEvent::HeadlightDecision { sample: 3600, on: true }));
}

#[test]
fn ticks_outside_auto_do_nothing() {
    let (mut svc, sensor, mut sink) = make_vehicle();
    sensor.set(4095);
    let writes = svc.actuators().headlight_writes();
    assert_eq!(svc.on_light_tick(&mut sink), None);
    assert_eq!(svc.actuators().headlight_writes(), writes);
}

#[test]
fn queued_tick_after_lights_off_is_discarded() {
    let (mut svc, sensor, mut sink) = make_vehicle();
    let queue = EventQueue::new();

    svc.handle_command(VehicleCommand::Headlights(HeadlightMode::Auto), &mut sink);
    sensor.set(4000);

    // Timer fires, but LightsOff wins the lock before the main loop drains.
    assert!(queue.push(Event::LightSampleTick));
    svc.handle_command(VehicleCommand::Headlights(HeadlightMode::Off), &mut sink);

    queue.drain(|Event::LightSampleTick| {
        assert_eq!(svc.on_light_tick(&mut sink), None);
    });
    assert!(!svc.actuators().headlights());
    assert_eq!(svc.state().headlight_mode, HeadlightMode::Off);
}

#[test]
fn concurrent_ticks_never_reassert_after_off() {
    let (svc, sensor, _) = make_vehicle();
    let svc = Arc::new(Mutex::new(svc));
    let queue = Arc::new(EventQueue::new());
    sensor.set(4095);

    svc.lock()
        .unwrap()
        .handle_command(VehicleCommand::Headlights(HeadlightMode::Auto), &mut LogSink::default());

    let producer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            for _ in 0..200 {
                while !queue.push(Event::LightSampleTick) {
                    thread::yield_now();
                }
            }
        })
    };

    let consumer = {
        let svc = Arc::clone(&svc);
        let queue = Arc::clone(&queue);
        thread::spawn(move || {
            let mut sink = LogSink::default();
            for _ in 0..2_000 {
                let mut guard = svc.lock().unwrap();
                queue.drain(|_| {
                    guard.on_light_tick(&mut sink);
                });
                drop(guard);
                thread::yield_now();
            }
        })
    };

    thread::sleep(std::time::Duration::from_millis(2));
    svc.lock()
        .unwrap()
        .handle_command(VehicleCommand::Headlights(HeadlightMode::Off), &mut LogSink::default());

    producer.join().unwrap();
    consumer.join().unwrap();

    let mut guard = svc.lock().unwrap();
    queue.drain(|_| {
        assert_eq!(guard.on_light_tick(&mut LogSink::default()), None);
    });
    assert!(!guard.actuators().headlights(), "LightsOff must stick");
    assert!(!guard.light_automation_enabled());
}
