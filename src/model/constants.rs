// Model constants
//
// K_FACTOR is shared by the live settle path and both replays. The two paths
// must produce bit-identical ratings, so there is exactly one definition.
pub const K_FACTOR: f64 = 32.0;
pub const DEFAULT_RATING: i32 = 1000;
