//! Summary command implementation.

use crate::cli::SummaryArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the summary command.
pub async fn execute_summary(args: SummaryArgs, ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    ctx.require_substance(&args.first)?;
    if let Some(second) = &args.second {
        ctx.require_substance(second)?;
    }

    let narrator = ctx.narrator()?;
    let narrative = narrator.summarize(&args.first, args.second.as_deref()).await?;
    println!("{}", formatter.format_narrative(&narrative)?);
    Ok(())
}
