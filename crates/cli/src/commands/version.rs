use crate::errors::CliError;
use std::io::Write;

pub fn execute(out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "monoplan {}", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
