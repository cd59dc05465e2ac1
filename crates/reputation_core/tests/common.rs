use primitives::{generate_account_keypair, generate_mock_account_keypair, Address};

pub fn named_address(name: &str) -> Address {
    let (_, pk) = generate_mock_account_keypair(name.as_bytes());
    Address::new(pk)
}

pub fn _generate_random_address() -> Address {
    let (_, pk) = generate_account_keypair();
    Address::new(pk)
}
