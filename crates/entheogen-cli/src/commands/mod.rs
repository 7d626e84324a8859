//! Command implementations.

pub mod check;
pub mod favorites;
pub mod legend;
pub mod list;
pub mod rules;
pub mod summary;
pub mod variant;

pub use self::check::execute_check;
pub use self::favorites::execute_favorites;
pub use self::legend::execute_legend;
pub use self::list::execute_list;
pub use self::rules::execute_rules;
pub use self::summary::execute_summary;
pub use self::variant::execute_variant;
