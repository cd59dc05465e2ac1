use clap::Parser;
use ledger_config::LedgerConfig;
use ledgerdb::LedgerDb;
use primitives::Address;
use reputation_core::MAX_RATING;
use serde::Serialize;

use crate::result::Result;

#[derive(Debug, Parser)]
pub struct RateOpts {
    /// Account being rated
    #[clap(value_parser)]
    pub target: Address,

    /// Rating between 1 and 5
    #[clap(value_parser)]
    pub rating: u128,

    /// Account submitting the rating
    #[clap(long = "as", value_parser, value_name = "RATER")]
    pub rater: Address,
}

#[derive(Debug, Parser)]
pub struct AddressOpts {
    #[clap(value_parser)]
    pub address: Address,
}

#[derive(Debug, Parser)]
pub struct CheckOpts {
    #[clap(value_parser)]
    pub rater: Address,

    #[clap(value_parser)]
    pub target: Address,
}

fn open(config: &LedgerConfig) -> Result<LedgerDb> {
    Ok(LedgerDb::new(config.ledger_db_config())?)
}

// queries don't need the write lock held by a concurrent `rate`
fn open_for_queries(config: &LedgerConfig) -> Result<LedgerDb> {
    Ok(LedgerDb::new(config.read_only_db_config())?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn rate(config: &LedgerConfig, opts: RateOpts) -> Result<()> {
    let mut db = open(config)?;

    let receipt = db.submit_rating(&opts.rater, &opts.target, opts.rating)?;

    print_json(&receipt)
}

pub fn reputation(config: &LedgerConfig, opts: AddressOpts) -> Result<()> {
    let db = open_for_queries(config)?;

    println!("{}/{MAX_RATING}", db.get_reputation(&opts.address));

    Ok(())
}

#[derive(Serialize)]
struct DetailsOutput {
    total_score: u128,
    rating_count: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    average: Option<String>,
}

pub fn details(config: &LedgerConfig, opts: AddressOpts) -> Result<()> {
    let db = open_for_queries(config)?;

    let details = db.get_reputation_details(&opts.address);
    let average = db
        .get_average_rating(&opts.address)
        .map(|average| format!("{average:.2}"));

    print_json(&DetailsOutput {
        total_score: details.total_score,
        rating_count: details.rating_count,
        average,
    })
}

pub fn check(config: &LedgerConfig, opts: CheckOpts) -> Result<()> {
    let db = open_for_queries(config)?;

    println!("{}", db.has_rated(&opts.rater, &opts.target));

    Ok(())
}

pub fn stats(config: &LedgerConfig) -> Result<()> {
    let db = open_for_queries(config)?;

    print_json(&db.get_contract_stats())
}

pub fn dump(config: &LedgerConfig) -> Result<()> {
    let db = open_for_queries(config)?;

    println!("{db}");

    Ok(())
}
