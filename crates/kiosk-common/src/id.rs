use rand::Rng;

/// Upper bound (exclusive) for request ids.
pub const REQUEST_ID_RANGE: u32 = 10_000_000;

/// Generate a correlation id for an inbound request.
///
/// Ids are random in `0..REQUEST_ID_RANGE` and are *not* guaranteed unique;
/// they only need to correlate the responses of one request with reasonable
/// probability. The content view echoes whatever id it was given.
pub fn new_request_id() -> u32 {
    rand::thread_rng().gen_range(0..REQUEST_ID_RANGE)
}
