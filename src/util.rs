//! Small helpers shared across the converter: base-36 ids, build-id
//! generation, and color formatting.

/// Format a number in lowercase base 36 (`0-9a-z`), the digit set used for
/// sequential resource ids.
pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

/// Simple PRNG for build-id generation (not cryptographically secure, but
/// fine for identifiers).
struct Lcg(u64);

impl Lcg {
    fn from_time() -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(12345);
        Lcg(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.0 >> 33
    }

    /// Uniform-ish value in `0..bound`.
    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

/// Generate a fresh build identifier.
///
/// The first 8 characters become the package id; the remainder is the suffix
/// appended to every generated element and resource id. Reusing a build id
/// across conversions of the same source keeps all ids stable.
pub fn gen_build_id() -> String {
    let mut rng = Lcg::from_time();

    let magic = to_base36(rng.below(36));

    let s1 = format!("0000{}", to_base36(rng.below(1_679_616))); // 36^4
    let s2 = format!("000{}", to_base36(rng.below(46_656))); // 36^3

    let mut count: u64 = 0;
    for i in 0..4 {
        let c = rng.below(26);
        count += 26u64.pow(i) * (c + 10);
    }
    count += rng.below(1_000_000) + rng.below(222_640);

    format!(
        "{}{}{}{}",
        magic,
        &s1[s1.len() - 4..],
        &s2[s2.len() - 3..],
        to_base36(count)
    )
}

/// Format an RGBA color as an HTML hex string (`#rrggbb`, or `#aarrggbb`
/// when `including_alpha` is set).
pub fn html_color(rgba: [u8; 4], including_alpha: bool) -> String {
    let [r, g, b, a] = rgba;
    if including_alpha {
        format!("#{a:02x}{r:02x}{g:02x}{b:02x}")
    } else {
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(9), "9");
        assert_eq!(to_base36(10), "a");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36 + 1), "101");
    }

    #[test]
    fn test_build_id_shape() {
        let id = gen_build_id();
        // magic char + 4 + 3 + base36 tail; always long enough to split into
        // an 8-char package id plus a non-empty item-id suffix.
        assert!(id.len() > 8, "build id too short: {id}");
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_html_color() {
        assert_eq!(html_color([255, 0, 128, 255], false), "#ff0080");
        assert_eq!(html_color([1, 2, 3, 4], true), "#04010203");
    }
}
