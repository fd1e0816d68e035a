//! Command router: maps inbound request paths onto vehicle commands.
//!
//! **Transport-decoupled**: the router does not know about the HTTP server.
//! The transport adapter builds a [`Request`] from the method and raw URI,
//! hands it to [`CommandRouter::respond`] together with the locked
//! [`VehicleService`], and writes the returned [`Reply`] back out.
//!
//! ```text
//!  /forward ─┐
//!  /left    ─┼─▶ COMMAND_TABLE ──▶ VehicleCommand ──▶ VehicleService
//!  /...     ─┘         │
//!                      └── miss ──▶ 404 diagnostic (no actuation)
//! ```

use core::fmt::Write as _;

use log::{info, warn};
use serde::Serialize;

use crate::app::commands::VehicleCommand;
use crate::app::governor::SpeedGovernor;
use crate::app::ports::{ActuatorPort, EventSink, LightSensorPort, TickerPort};
use crate::app::service::VehicleService;
use crate::app::state::{ActuatorState, HeadlightMode};

/// Control page served at `/`.
pub const INDEX_HTML: &str = include_str!("../assets/index.html");

// ───────────────────────────────────────────────────────────────
// Request / Reply
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Other,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed inbound request: path plus decoded query parameters in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Request {
    /// Split a raw URI (`/path?a=1&b=two`) into path and decoded parameters.
    pub fn parse(method: Method, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((p, q)) => (p, q),
            None => (uri, ""),
        };
        let path = if path.is_empty() { "/" } else { path };

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(pair), String::new()),
            })
            .collect();

        Self {
            method,
            path: decode_component(path),
            params,
        }
    }

    /// First value supplied for `name`, if any.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport-neutral response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }

    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "text/html",
            body: body.into(),
        }
    }

    pub fn json(body: String) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Route table
// ───────────────────────────────────────────────────────────────

/// Builds the command for a matched path.  Only `/changeSpeed` reads
/// a parameter.
type CommandBuilder = fn(&Request) -> VehicleCommand;

const COMMAND_TABLE: &[(&str, CommandBuilder)] = &[
    ("/forward", forward),
    ("/back", back),
    ("/driveStop", drive_stop),
    ("/left", left),
    ("/right", right),
    ("/steerStop", steer_stop),
    ("/LightsOn", lights_on),
    ("/LightsOff", lights_off),
    ("/LightsAuto", lights_auto),
    ("/changeSpeed", change_speed),
];

fn forward(_: &Request) -> VehicleCommand {
    VehicleCommand::DriveForward
}

fn back(_: &Request) -> VehicleCommand {
    VehicleCommand::DriveReverse
}

fn drive_stop(_: &Request) -> VehicleCommand {
    VehicleCommand::DriveStop
}

fn left(_: &Request) -> VehicleCommand {
    VehicleCommand::SteerLeft
}

fn right(_: &Request) -> VehicleCommand {
    VehicleCommand::SteerRight
}

fn steer_stop(_: &Request) -> VehicleCommand {
    VehicleCommand::SteerCenter
}

fn lights_on(_: &Request) -> VehicleCommand {
    VehicleCommand::Headlights(HeadlightMode::On)
}

fn lights_off(_: &Request) -> VehicleCommand {
    VehicleCommand::Headlights(HeadlightMode::Off)
}

fn lights_auto(_: &Request) -> VehicleCommand {
    VehicleCommand::Headlights(HeadlightMode::Auto)
}

fn change_speed(req: &Request) -> VehicleCommand {
    // A missing parameter reads as empty text, which governs to 0.
    VehicleCommand::SetSpeed(SpeedGovernor::requested(req.param("speed").unwrap_or("")))
}

/// Outcome of matching a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, the control page.
    Index,
    /// `/status`, a JSON snapshot of the actuator state.
    Status,
    Command(VehicleCommand),
    NotFound,
}

/// Read-only view returned by `/status`.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub state: ActuatorState,
    pub headlights_lit: bool,
    pub light_automation: bool,
}

pub struct CommandRouter;

impl CommandRouter {
    /// Match a request against the static route table.
    pub fn route(req: &Request) -> Route {
        match req.path.as_str() {
            "/" => Route::Index,
            "/status" => Route::Status,
            path => COMMAND_TABLE
                .iter()
                .find(|(p, _)| *p == path)
                .map_or(Route::NotFound, |(_, build)| Route::Command(build(req))),
        }
    }

    /// Route and execute a request against the service.
    ///
    /// The caller must hold exclusive access to `svc` for the whole call.
    pub fn respond<A, S, T>(
        req: &Request,
        svc: &mut VehicleService<A, S, T>,
        sink: &mut impl EventSink,
    ) -> Reply
    where
        A: ActuatorPort,
        S: LightSensorPort,
        T: TickerPort,
    {
        match Self::route(req) {
            Route::Index => Reply::html(INDEX_HTML),
            Route::Status => Self::status(svc),
            Route::Command(cmd) => {
                info!("{} {} -> {:?}", req.method, req.path, cmd);
                Reply::text(200, svc.handle_command(cmd, sink))
            }
            Route::NotFound => Self::not_found(req),
        }
    }

    /// Diagnostic 404 listing the path, method and every parameter.
    pub fn not_found(req: &Request) -> Reply {
        warn!("unrouted request: {} {}", req.method, req.path);

        let mut body = String::from("File Not Found\n\n");
        let _ = write!(
            body,
            "URI: {}\nMethod: {}\nArguments: {}\n",
            req.path,
            req.method,
            req.params.len()
        );
        for (name, value) in &req.params {
            let _ = writeln!(body, " {}: {}", name, value);
        }
        Reply::text(404, body)
    }

    fn status<A, S, T>(svc: &VehicleService<A, S, T>) -> Reply
    where
        A: ActuatorPort,
        S: LightSensorPort,
        T: TickerPort,
    {
        let report = StatusReport {
            state: svc.state(),
            headlights_lit: svc.headlights_lit(),
            light_automation: svc.light_automation_enabled(),
        };
        match serde_json::to_string(&report) {
            Ok(json) => Reply::json(json),
            Err(e) => Reply::text(500, format!("status encode failed: {}", e)),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Query decoding
// ───────────────────────────────────────────────────────────────

/// Decode `+` and `%XX` escapes.  Malformed escapes are kept literally.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
