//! WiFi station-mode adapter.
//!
//! Joins the access point whose credentials were baked in at build time
//! (`WIFI_SSID` / `WIFI_PASSWORD`) and blocks startup until the link is up.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all other targets**: only the credential checks and the retry policy,
//!   which are pure and host-tested.
//!
//! ## Retry policy
//!
//! A fixed delay between attempts (400 ms by default) and no attempt limit:
//! the vehicle is useless without its link, so it keeps trying.  A bound can
//! be set for bench tooling, in which case the loop gives up with
//! [`ConnectivityError::RetriesExhausted`].

use log::{info, warn};

use crate::config::VehicleConfig;
pub use crate::error::ConnectivityError;

// ───────────────────────────────────────────────────────────────
// Credentials
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub ssid: heapless::String<32>,
    pub password: heapless::String<64>,
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

impl Credentials {
    /// Validate and copy.  SSID must be 1-32 printable ASCII bytes; the
    /// password must be empty (open network) or 8-64 bytes.
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
            return Err(ConnectivityError::MissingCredentials);
        }
        if !password.is_empty() && (password.len() < 8 || password.len() > 64) {
            return Err(ConnectivityError::MissingCredentials);
        }
        Ok(Self {
            ssid: heapless::String::try_from(ssid)
                .map_err(|_| ConnectivityError::MissingCredentials)?,
            password: heapless::String::try_from(password)
                .map_err(|_| ConnectivityError::MissingCredentials)?,
        })
    }

    /// Credentials from the build environment.
    pub fn from_build_env() -> Result<Self, ConnectivityError> {
        let ssid = option_env!("WIFI_SSID").ok_or(ConnectivityError::MissingCredentials)?;
        Self::new(ssid, option_env!("WIFI_PASSWORD").unwrap_or(""))
    }

    pub fn is_open(&self) -> bool {
        self.password.is_empty()
    }
}

// ───────────────────────────────────────────────────────────────
// Retry policy
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay_ms: u32,
    /// `None` = retry forever.
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    pub fn from_config(config: &VehicleConfig) -> Self {
        Self {
            delay_ms: config.wifi_retry_delay_ms,
            max_attempts: config.wifi_max_attempts,
        }
    }

    /// Whether another attempt is allowed after `attempts` have failed.
    pub fn allows(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&VehicleConfig::default())
    }
}

/// Run `attempt` until it succeeds, sleeping `policy.delay_ms` between
/// failures.  Returns the number of attempts it took.
///
/// `attempt` gets the 1-based attempt number.
pub fn connect_with_retry<F, S>(
    policy: &RetryPolicy,
    mut attempt: F,
    mut sleep_ms: S,
) -> Result<u32, ConnectivityError>
where
    F: FnMut(u32) -> Result<(), ConnectivityError>,
    S: FnMut(u32),
{
    let mut tries: u32 = 0;
    loop {
        tries = tries.saturating_add(1);
        match attempt(tries) {
            Ok(()) => {
                info!("wifi: connected after {} attempt(s)", tries);
                return Ok(tries);
            }
            Err(e) => {
                if !policy.allows(tries) {
                    warn!("wifi: giving up after {} attempts ({})", tries, e);
                    return Err(ConnectivityError::RetriesExhausted { attempts: tries });
                }
                warn!("wifi: attempt {} failed ({}), retrying in {}ms", tries, e, policy.delay_ms);
                sleep_ms(policy.delay_ms);
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF station
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use station::connect_station;

#[cfg(target_os = "espidf")]
mod station {
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::hal::modem::Modem;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{info, warn};

    use super::{connect_with_retry, ConnectivityError, Credentials, RetryPolicy};

    /// Bring the station up and block until it has an IP address.
    ///
    /// The returned driver must be kept alive for the link to stay up.
    pub fn connect_station(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
        creds: &Credentials,
        hostname: &str,
        policy: &RetryPolicy,
    ) -> Result<BlockingWifi<EspWifi<'static>>, ConnectivityError> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), Some(nvs))
            .map_err(|_| ConnectivityError::WifiSetupFailed)?;
        let mut wifi =
            BlockingWifi::wrap(esp_wifi, sysloop).map_err(|_| ConnectivityError::WifiSetupFailed)?;

        if let Err(e) = wifi.wifi_mut().sta_netif_mut().set_hostname(hostname) {
            warn!("wifi: hostname '{}' not applied: {:?}", hostname, e);
        }

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: creds.ssid.clone(),
            password: creds.password.clone(),
            auth_method: if creds.is_open() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            ..Default::default()
        }))
        .map_err(|_| ConnectivityError::WifiSetupFailed)?;

        wifi.start().map_err(|_| ConnectivityError::WifiSetupFailed)?;
        info!("wifi: connecting to '{}'", creds.ssid);

        connect_with_retry(
            policy,
            |_| {
                wifi.connect().map_err(|_| ConnectivityError::WifiConnectFailed)?;
                wifi.wait_netif_up().map_err(|_| ConnectivityError::WifiConnectFailed)
            },
            |ms| esp_idf_svc::hal::delay::FreeRtos::delay_ms(ms),
        )?;

        if let Ok(ip) = wifi.wifi().sta_netif().get_ip_info() {
            info!("wifi: up, ip={}", ip.ip);
        }
        Ok(wifi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ssid() {
        assert_eq!(Credentials::new("", "password1"), Err(ConnectivityError::MissingCredentials));
    }

    #[test]
    fn rejects_short_password() {
        assert!(Credentials::new("garage", "short").is_err());
    }

    #[test]
    fn accepts_open_network() {
        let c = Credentials::new("garage", "").unwrap();
        assert!(c.is_open());
    }

    #[test]
    fn accepts_valid_wpa2() {
        let c = Credentials::new("garage", "correcthorse").unwrap();
        assert_eq!(c.ssid.as_str(), "garage");
        assert!(!c.is_open());
    }

    #[test]
    fn default_policy_is_unbounded_400ms() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_ms, 400);
        assert_eq!(p.max_attempts, None);
        assert!(p.allows(u32::MAX - 1));
    }

    #[test]
    fn unbounded_retry_keeps_going_until_success() {
        let mut slept = Vec::new();
        let tries = connect_with_retry(
            &RetryPolicy::default(),
            |n| if n < 5 { Err(ConnectivityError::WifiConnectFailed) } else { Ok(()) },
            |ms| slept.push(ms),
        );
        assert_eq!(tries, Ok(5));
        assert_eq!(slept, vec![400; 4]);
    }

    #[test]
    fn bounded_retry_gives_up() {
        let policy = RetryPolicy { delay_ms: 10, max_attempts: Some(3) };
        let mut calls = 0;
        let mut sleeps = 0;
        let r = connect_with_retry(
            &policy,
            |_| {
                calls += 1;
                Err(ConnectivityError::WifiConnectFailed)
            },
            |_| sleeps += 1,
        );
        assert_eq!(r, Err(ConnectivityError::RetriesExhausted { attempts: 3 }));
        assert_eq!(calls, 3);
        assert_eq!(sleeps, 2);
    }

    #[test]
    fn first_try_success_never_sleeps() {
        let r = connect_with_retry(&RetryPolicy::default(), |_| Ok(()), |_| panic!("slept"));
        assert_eq!(r, Ok(1));
    }
}
