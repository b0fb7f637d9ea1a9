/// Daily cadence carries no timezone; the step is a raw multiple of
/// 86 400 epoch seconds.
pub(super) fn next_start(from_seconds: i64, interval: u32) -> i64 {
    from_seconds + i64::from(interval) * 86_400
}
