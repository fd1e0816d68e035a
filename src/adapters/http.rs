//! HTTP transport: ESP-IDF HTTP server in front of the [`crate::router::CommandRouter`].
//!
//! One wildcard handler per method forwards every request path to the
//! router while holding the service lock, so each command runs to
//! completion before the next command or light tick.  Routing itself lives
//! in [`crate::router`] and is host-tested there.

#[cfg(target_os = "espidf")]
pub use server::start;

#[cfg(target_os = "espidf")]
mod server {
    use std::sync::{Arc, Mutex};

    use esp_idf_svc::http::server::{Configuration, EspHttpServer};
    use esp_idf_svc::http::Method as HttpMethod;
    use esp_idf_svc::io::Write;
    use log::{error, info};

    use crate::adapters::log_sink::LogEventSink;
    use crate::app::ports::{ActuatorPort, LightSensorPort, TickerPort};
    use crate::app::service::VehicleService;
    use crate::error::ConnectivityError;
    use crate::router::{CommandRouter, Method, Reply, Request};

    fn method_of(m: HttpMethod) -> Method {
        match m {
            HttpMethod::Get => Method::Get,
            HttpMethod::Post => Method::Post,
            HttpMethod::Put => Method::Put,
            HttpMethod::Delete => Method::Delete,
            _ => Method::Other,
        }
    }

    /// Start the server and register the command routes.
    ///
    /// The returned server must be kept alive; dropping it stops serving.
    pub fn start<A, S, T>(
        service: Arc<Mutex<VehicleService<A, S, T>>>,
        port: u16,
    ) -> Result<EspHttpServer<'static>, ConnectivityError>
    where
        A: ActuatorPort + Send + 'static,
        S: LightSensorPort + Send + 'static,
        T: TickerPort + Send + 'static,
    {
        let config = Configuration {
            http_port: port,
            uri_match_wildcard: true,
            ..Default::default()
        };
        let mut server =
            EspHttpServer::new(&config).map_err(|_| ConnectivityError::HttpServerFailed)?;

        for method in [HttpMethod::Get, HttpMethod::Post] {
            let service = Arc::clone(&service);
            server
                .fn_handler("/*", method, move |req| -> anyhow::Result<()> {
                    let request = Request::parse(method_of(req.method()), req.uri());
                    let reply: Reply = match service.lock() {
                        Ok(mut svc) => {
                            CommandRouter::respond(&request, &mut svc, &mut LogEventSink::new())
                        }
                        Err(_) => {
                            error!("http: service lock poisoned");
                            Reply::text(500, "service unavailable")
                        }
                    };
                    let mut resp = req.into_response(
                        reply.status,
                        None,
                        &[("Content-Type", reply.content_type)],
                    )?;
                    resp.write_all(reply.body.as_bytes())?;
                    Ok(())
                })
                .map_err(|_| ConnectivityError::HttpServerFailed)?;
        }

        info!("http: serving on port {}", port);
        Ok(server)
    }
}
