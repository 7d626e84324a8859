//! List command implementation.

use crate::cli::ListArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the list command.
pub fn execute_list(args: ListArgs, ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    let dataset = ctx.resolver.dataset();
    let substances = match args.search.as_deref() {
        Some(query) => dataset.search(query),
        None => dataset.substances().iter().collect(),
    };

    println!("{}", formatter.format_substances(&substances)?);
    Ok(())
}
