//! Kit access codes.
//!
//! A kit code is three groups of four lowercase hex digits joined by dashes,
//! e.g. `3f9a-00c1-be42`: six random bytes from a CSPRNG.

use rand::Rng;

pub const KIT_CODE_LEN: usize = 14;

/// Generate a kit code from the thread-local CSPRNG.
pub fn generate_kit_code() -> String {
    generate_kit_code_with(&mut rand::rng())
}

pub fn generate_kit_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    let groups: [u16; 3] = rng.random();
    format!("{:04x}-{:04x}-{:04x}", groups[0], groups[1], groups[2])
}

/// True for `xxxx-xxxx-xxxx` with lowercase hex groups.
pub fn is_valid_kit_code(code: &str) -> bool {
    code.len() == KIT_CODE_LEN
        && code.split('-').count() == 3
        && code.split('-').all(|group| {
            group.len() == 4
                && group
                    .bytes()
                    .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn generated_codes_are_well_formed() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..200 {
            let code = generate_kit_code_with(&mut rng);
            assert!(is_valid_kit_code(&code), "bad code {code}");
        }
    }

    #[test]
    fn generate_kit_code_produces_different_results() {
        assert_ne!(generate_kit_code(), generate_kit_code());
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in [
            "",
            "abcd-ef01-234",
            "ABCD-EF01-2345",
            "abcd-ef01-23456",
            "abcdef01-2345",
            "abcd_ef01_2345",
            "abcd-ef01-23g5",
            "abcd-ef01-2345-",
        ] {
            assert!(!is_valid_kit_code(bad), "accepted {bad}");
        }
        assert!(is_valid_kit_code("abcd-ef01-2345"));
    }
}
