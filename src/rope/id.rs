//! Rope identity generation.
//!
//! Ids are not checked for uniqueness here; the store's primary key
//! rejects a collision and the caller sees `RopeError::IdCollision`.

use rand::Rng;

use super::types::RopeId;

/// Length of a generated rope id
pub const ROPE_ID_LENGTH: usize = 10;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a fresh rope id from uppercase letters and digits
pub fn generate_rope_id() -> RopeId {
    generate_rope_id_with(&mut rand::thread_rng())
}

/// Generate a rope id from the given RNG
pub fn generate_rope_id_with<R: Rng + ?Sized>(rng: &mut R) -> RopeId {
    let code: String = (0..ROPE_ID_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    RopeId::from_generated(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_id_shape() {
        for _ in 0..100 {
            let id = generate_rope_id();
            assert_eq!(id.as_str().len(), ROPE_ID_LENGTH);
            assert!(id
                .as_str()
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_ids_differ() {
        assert_ne!(generate_rope_id(), generate_rope_id());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = generate_rope_id_with(&mut StdRng::seed_from_u64(7));
        let b = generate_rope_id_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
