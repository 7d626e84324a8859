//! Rules command implementation.

use crate::cli::RulesArgs;
use crate::context::AppContext;
use crate::error::Result;
use crate::output::Formatter;
use entheogen_dataset::InteractionDataset;
use entheogen_domain::{PairEvidence, PairKey, RiskClassification, RiskCode};

/// Execute the rules command.
pub fn execute_rules(args: RulesArgs, ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    if let Some(id) = &args.substance {
        ctx.require_substance(id)?;
    }

    let rules = select_rules(ctx.resolver.dataset(), &args)?;
    println!("{}", formatter.format_rules(&rules)?);
    Ok(())
}

/// Rules matching the filters, most severe first.
fn select_rules<'a>(
    dataset: &'a InteractionDataset,
    args: &RulesArgs,
) -> Result<Vec<(&'a PairKey, &'a PairEvidence, &'a RiskClassification)>> {
    let code = args.code.as_deref().map(RiskCode::new);

    let mut rules = Vec::new();
    for (key, evidence) in dataset.rules() {
        if code.as_ref().is_some_and(|c| *c != evidence.code) {
            continue;
        }
        if let Some(id) = &args.substance {
            let (a, b) = key.parts();
            if a != id.as_str() && b != id.as_str() {
                continue;
            }
        }
        rules.push((key, evidence, dataset.classification(&evidence.code)?));
    }

    rules.sort_by(|x, y| y.2.severity.cmp(&x.2.severity).then_with(|| x.0.cmp(y.0)));
    Ok(rules)
}
