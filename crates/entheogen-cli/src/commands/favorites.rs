//! Favorites command implementation.

use crate::cli::{FavoritesAction, FavoritesArgs};
use crate::context::AppContext;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use entheogen_domain::{Favorites, FavoritesStore, ToggleOutcome};
use entheogen_resolver::Resolver;
use entheogen_store::JsonFileStore;
use std::io::{self, Write};

/// Execute the favorites command.
pub fn execute_favorites(args: FavoritesArgs, ctx: &AppContext, formatter: &Formatter) -> Result<()> {
    let store = ctx.favorites_store()?;

    match args.action {
        FavoritesAction::List => list_favorites(&store, formatter),
        FavoritesAction::Add { first, second } => {
            ctx.require_substance(&first)?;
            ctx.require_substance(&second)?;
            add_favorite(&store, &ctx.resolver, &first, &second, formatter)
        }
        FavoritesAction::Remove { first, second } => {
            remove_favorite(&store, &first, &second, formatter)
        }
        FavoritesAction::Clear { yes } => {
            if !yes {
                let count = store.load().len();
                print!("About to remove {} saved pair(s). Continue? [y/N] ", count);
                io::stdout().flush()?;

                let mut response = String::new();
                io::stdin().read_line(&mut response)?;

                if !response.trim().eq_ignore_ascii_case("y") {
                    println!("{}", formatter.info("Operation cancelled"));
                    return Ok(());
                }
            }
            clear_favorites(&store, formatter)
        }
    }
}

/// List saved pairs.
fn list_favorites(store: &JsonFileStore, formatter: &Formatter) -> Result<()> {
    let favorites = Favorites::from_entries(store.load());
    println!("{}", formatter.format_favorites(favorites.entries())?);
    Ok(())
}

/// Save a pair with its current classification.
fn add_favorite(
    store: &JsonFileStore,
    resolver: &Resolver,
    first: &str,
    second: &str,
    formatter: &Formatter,
) -> Result<()> {
    let mut favorites = Favorites::from_entries(store.load());
    if favorites.contains(first, second) {
        println!(
            "{}",
            formatter.info(&format!("{} + {} is already saved", first, second))
        );
        return Ok(());
    }

    let code = resolver.resolve(first, second).code;
    match favorites.toggle(first, second, code.clone()) {
        ToggleOutcome::Added => {
            store.save(favorites.entries())?;
            println!(
                "{}",
                formatter.success(&format!("Saved {} + {} ({})", first, second, code))
            );
            Ok(())
        }
        ToggleOutcome::Rejected => Err(CliError::NotPermitted(
            "A substance paired with itself cannot be saved".to_string(),
        )),
        ToggleOutcome::Removed => Ok(()),
    }
}

/// Remove a saved pair.
fn remove_favorite(store: &JsonFileStore, first: &str, second: &str, formatter: &Formatter) -> Result<()> {
    let mut favorites = Favorites::from_entries(store.load());

    if favorites.remove(first, second) {
        store.save(favorites.entries())?;
        println!(
            "{}",
            formatter.success(&format!("Removed {} + {}", first, second))
        );
    } else {
        println!(
            "{}",
            formatter.warning(&format!("{} + {} is not saved", first, second))
        );
    }
    Ok(())
}

/// Remove all saved pairs.
fn clear_favorites(store: &JsonFileStore, formatter: &Formatter) -> Result<()> {
    store.save(&[])?;
    println!("{}", formatter.success("Cleared saved pairs"));
    Ok(())
}
