//! Servo angle folding
//!
//! Hobby servos cover 0-180°. A joint angle past 180° is mirrored back into
//! that range (270° drives the servo to 90°).

use mimic_protocol::MAX_ANGLE_DEG;

use crate::config::MAX_SERVO_DEG;

/// Map a joint angle (0-360) onto a servo angle (0-180)
///
/// Angles beyond 360 are refused.
pub fn fold_to_servo(angle_deg: u16) -> Option<u8> {
    let half = MAX_SERVO_DEG as u16;
    match angle_deg {
        a if a <= half => Some(a as u8),
        a if a <= MAX_ANGLE_DEG => Some((MAX_ANGLE_DEG - a) as u8),
        _ => None,
    }
}
