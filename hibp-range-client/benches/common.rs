use hibp_range_client::digest::HEX_CHARS;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALL_CHARS: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generates a specified number of random passwords with uniform distribution.
/// Uses a fixed seed for reproducible benchmark results.
pub fn generate_random_passwords(count: usize) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            let length = rng.gen_range(8..=64);
            (0..length)
                .map(|_| ALL_CHARS[rng.gen_range(0..ALL_CHARS.len())] as char)
                .collect()
        })
        .collect()
}

/// Builds a range response body of `lines` random suffixes, roughly a quarter
/// of them zero-count padding entries, the way a padded response looks.
pub fn generate_range_body(lines: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut body = String::with_capacity(lines * 45);
    for _ in 0..lines {
        for _ in 0..35 {
            body.push(HEX_CHARS[rng.gen_range(0..HEX_CHARS.len())] as char);
        }
        let count: u32 = if rng.gen_bool(0.25) { 0 } else { rng.gen_range(1..100_000) };
        body.push(':');
        body.push_str(&count.to_string());
        body.push_str("\r\n");
    }
    body
}
