//! GPIO / peripheral pin assignments for the WifiCar ESP32 board.
//!
//! Single source of truth. Every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Drive motor (L298N H-bridge, channel B)
// ---------------------------------------------------------------------------

/// Digital output: IN3.  HIGH with IN4 LOW = forward.
pub const MOTOR_IN3_GPIO: i32 = 14;
/// Digital output: IN4.  HIGH with IN3 LOW = reverse.
pub const MOTOR_IN4_GPIO: i32 = 12;
/// LEDC PWM channel output to ENB (motor speed).
pub const MOTOR_ENB_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Steering servo
// ---------------------------------------------------------------------------

/// LEDC PWM output to the steering servo signal line.
pub const SERVO_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// Lighting
// ---------------------------------------------------------------------------

/// Digital output: headlight circuit (active HIGH).
pub const HEADLIGHTS_GPIO: i32 = 32;
/// Digital output: reverse light circuit (active HIGH).
pub const REVERSE_LIGHTS_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// Ambient light sensor (LDR voltage divider)
// ---------------------------------------------------------------------------

/// Photoresistor divider; GPIO 35 is ADC1 channel 7 on the ESP32.
pub const LDR_ADC_GPIO: i32 = 35;
/// ADC1 channel for [`LDR_ADC_GPIO`].
pub const LDR_ADC1_CHANNEL: u32 = 7;

// ---------------------------------------------------------------------------
// On-board indicator
// ---------------------------------------------------------------------------

/// Built-in LED, driven HIGH once the station link is up.
pub const LED_BUILTIN_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC resolution for the motor channel.  8 bits gives 0 – 255 duty = speed.
pub const MOTOR_PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the drive motor.
pub const MOTOR_PWM_FREQ_HZ: u32 = 1_000;
/// LEDC resolution for the servo channel (fine pulse-width steps at 50 Hz).
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
/// Standard hobby-servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
