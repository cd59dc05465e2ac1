fn main() -> anyhow::Result<()> {
    cli::run()?;

    Ok(())
}
