use secp256k1::{rand::rngs::OsRng, Secp256k1};

pub type PublicKey = secp256k1::PublicKey;
pub type SecretKey = secp256k1::SecretKey;

pub type AccountKeypair = (SecretKey, PublicKey);

pub fn generate_account_keypair() -> AccountKeypair {
    let secp = Secp256k1::new();
    secp.generate_keypair(&mut OsRng)
}

/// Deterministic keypair derived from `seed`, handy for fixtures that need
/// stable identities across runs.
pub fn generate_mock_account_keypair(seed: &[u8]) -> AccountKeypair {
    type H = secp256k1::hashes::sha256::Hash;

    let secp = Secp256k1::new();
    let secret_key = SecretKey::from_hashed_data::<H>(seed);
    let public_key = PublicKey::from_secret_key(&secp, &secret_key);
    (secret_key, public_key)
}
