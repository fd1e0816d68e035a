//! One-shot hardware peripheral initialization.
//!
//! Configures the LDR ADC channel, the digital outputs (H-bridge direction
//! lines, lamps, built-in LED) and two LEDC timers/channels (motor enable,
//! steering servo) using raw ESP-IDF sys calls. Called once from `main()`
//! before the service starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::ActuatorError;
#[cfg(target_os = "espidf")]
use crate::error::SensorError;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed(rc) => write!(f, "LEDC timer/channel config failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

pub const LEDC_CH_MOTOR: u32 = 0;
pub const LEDC_CH_SERVO: u32 = 1;

/// ADC1 channel wired to the photoresistor divider (GPIO 35).
pub const ADC1_CH_LDR: u32 = pins::LDR_ADC1_CHANNEL;

#[cfg(target_os = "espidf")]
fn check(rc: esp_err_t) -> Result<(), i32> {
    if rc == ESP_OK as esp_err_t { Ok(()) } else { Err(rc) }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before any task shares the peripherals.
    unsafe {
        init_adc()?;
        init_gpio_outputs()?;
        init_ledc()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: ADC1_HANDLE is written once in `init_adc()` before the service
/// exists; afterwards it is only read, under the service lock.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    check(unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) })
        .map_err(HwInitError::AdcInitFailed)?;

    // 12 dB attenuation covers the full 0-3.3 V divider swing; 12-bit counts.
    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    check(unsafe { adc_oneshot_config_channel(adc1_handle(), ADC1_CH_LDR, &chan_cfg) })
        .map_err(HwInitError::AdcInitFailed)?;

    info!("hw_init: ADC1 configured (CH{}=LDR)", ADC1_CH_LDR);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, SensorError> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract; caller holds the service lock.
    check(unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) })
        .map_err(SensorError::AdcReadFailed)?;
    Ok(raw.clamp(0, 4095) as u16)
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [
        pins::MOTOR_IN3_GPIO,
        pins::MOTOR_IN4_GPIO,
        pins::HEADLIGHTS_GPIO,
        pins::REVERSE_LIGHTS_GPIO,
        pins::LED_BUILTIN_GPIO,
    ];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        check(unsafe { gpio_config(&cfg) }).map_err(HwInitError::GpioConfigFailed)?;
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured (IN3, IN4, headlights, reverse, LED)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    // SAFETY: pin was configured as an output in init_gpio_outputs().
    check(unsafe { gpio_set_level(pin, u32::from(high)) }).map_err(ActuatorError::GpioWriteFailed)
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<(), ActuatorError> {
    Ok(())
}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: motor enable (1 kHz, 8-bit, duty == speed)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: pins::MOTOR_PWM_RESOLUTION_BITS,
        freq_hz: pins::MOTOR_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&timer0) }).map_err(HwInitError::LedcInitFailed)?;

    // Timer 1: steering servo (50 Hz, 14-bit)
    let timer1 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_1,
        duty_resolution: pins::SERVO_PWM_RESOLUTION_BITS,
        freq_hz: pins::SERVO_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    check(unsafe { ledc_timer_config(&timer1) }).map_err(HwInitError::LedcInitFailed)?;

    check(unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_MOTOR,
            timer_sel: ledc_timer_t_LEDC_TIMER_0,
            gpio_num: pins::MOTOR_ENB_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    })
    .map_err(HwInitError::LedcInitFailed)?;

    check(unsafe {
        ledc_channel_config(&ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel: LEDC_CH_SERVO,
            timer_sel: ledc_timer_t_LEDC_TIMER_1,
            gpio_num: pins::SERVO_GPIO,
            duty: 0,
            hpoint: 0,
            ..Default::default()
        })
    })
    .map_err(HwInitError::LedcInitFailed)?;

    info!("hw_init: LEDC configured (motor=CH0@1kHz, servo=CH1@50Hz)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u32) -> Result<(), ActuatorError> {
    // SAFETY: channel was configured in init_ledc(); writes happen under
    // the service lock.
    unsafe {
        check(ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty))
            .map_err(ActuatorError::PwmWriteFailed)?;
        check(ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel))
            .map_err(ActuatorError::PwmWriteFailed)
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u32) -> Result<(), ActuatorError> {
    Ok(())
}
