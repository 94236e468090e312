use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use super::ProcessRecord;

/// Per-invocation sequence mixed into the entropy suffix so ids generated
/// within the same clock tick still differ.
static SEQ: AtomicU64 = AtomicU64::new(0);

const SUFFIX_LEN: usize = 5;
const BASE: u64 = 36;

/// Generate an opaque record id: base-36 unix milliseconds plus a short
/// base-36 entropy suffix, re-drawn until it collides with no existing id.
pub fn generate(existing: &BTreeMap<String, ProcessRecord>) -> String {
    loop {
        let id = candidate();
        if !existing.contains_key(&id) {
            return id;
        }
    }
}

fn candidate() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let entropy = (now.subsec_nanos() as u64 ^ seq.wrapping_mul(0x9e37_79b9)) % BASE.pow(SUFFIX_LEN as u32);

    format!(
        "{}{:0>width$}",
        to_base36(now.as_millis() as u64),
        to_base36(entropy),
        width = SUFFIX_LEN
    )
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % BASE) as usize] as char);
        n /= BASE;
    }
    out.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let empty = BTreeMap::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(generate(&empty)));
        }
    }
}
