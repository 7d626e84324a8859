//! Legend command implementation.

use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the legend command.
pub fn execute_legend(ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_legend(ctx.resolver.dataset().legend())?);
    Ok(())
}
