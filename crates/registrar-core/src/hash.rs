use xxhash_rust::xxh64::Xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    if value == 0 {
        return "0".repeat(11);
    }
    let mut result = Vec::with_capacity(11);
    while value > 0 {
        let idx = (value % 62) as usize;
        result.push(BASE62_CHARS[idx]);
        value /= 62;
    }
    while result.len() < 11 {
        result.push(b'0');
    }
    result.reverse();
    result.into_iter().map(char::from).collect()
}

/// Order-independent checksum over a set of primary-key tuples.
///
/// checksum = base62(xxhash64(sorted lines of `v1|v2|...\n`))
///
/// Values must already be normalized (see [`crate::types::key_text`]); the
/// same tuples in any order give the same checksum.
pub fn checksum_keys<I>(keys: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut lines: Vec<String> = keys.into_iter().map(|k| k.join("|")).collect();
    lines.sort_unstable();
    let mut hasher = Xxh64::new(0);
    for line in &lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    base62_encode(hasher.digest())
}
