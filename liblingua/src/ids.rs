//! Synthetic identifiers for groups, messages and calls
//!
//! Ids are `<prefix>-<unix millis>-<9 base36 chars>`. They only need to be
//! unique in practice within one local state tree.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh id with the given prefix
pub fn generate(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    format!("{}-{}-{}", prefix, millis, random_suffix())
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_shape() {
        let id = generate("msg");
        let parts: Vec<&str> = id.splitn(3, '-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "msg");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_ids_generated_in_same_millisecond_differ() {
        let ids: HashSet<String> = (0..1000).map(|_| generate("call")).collect();
        assert_eq!(ids.len(), 1000);
    }
}
