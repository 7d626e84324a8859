//! Check command implementation.

use crate::cli::CheckArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    ctx.require_substance(&args.first)?;
    ctx.require_substance(&args.second)?;

    if args.explain {
        let narrator = ctx.narrator()?;
        let result = narrator.explain_pair(&args.first, &args.second).await?;
        println!("{}", formatter.format_check(&result.check, result.narrative.as_ref())?);
    } else {
        let check = ctx.resolver.check(&args.first, &args.second)?;
        println!("{}", formatter.format_check(&check, None)?);
    }

    Ok(())
}
