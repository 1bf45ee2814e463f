//! Lock key construction.

/// Key prefix shared by every seat lock.
pub const SEAT_LOCK_PREFIX: &str = "seat_lock";

/// Lock key for one seat: `seat_lock:concert:<id>:zone:<id>:seat:<id>`.
pub fn seat_lock_key(concert_id: &str, zone_id: &str, seat_id: &str) -> String {
    format!("{SEAT_LOCK_PREFIX}:concert:{concert_id}:zone:{zone_id}:seat:{seat_id}")
}
