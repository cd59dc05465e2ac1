use clap::Parser;
use primitives::{generate_account_keypair, Address};

use crate::result::Result;

#[derive(Debug, Parser)]
pub struct KeygenCmd {
    /// Also print the public key the address was derived from
    #[clap(long)]
    show_public_key: bool,
}

/// Prints a random address. Key custody is left to the caller's wallet, the
/// secret key is discarded.
pub fn exec(args: KeygenCmd) -> Result<()> {
    let (_, public_key) = generate_account_keypair();

    println!("Address: {}", Address::new(public_key));

    if args.show_public_key {
        println!("PublicKey: {public_key}");
    }

    Ok(())
}
