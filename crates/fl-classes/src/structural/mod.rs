//! Cycle-aware structural algorithms: equality, ordering and rendering.
//!
//! All three dispatch through the Setoid and Ord classes (or the `toString`
//! entries of the method table), so custom types take part by providing the
//! corresponding capabilities. Nested comparisons re-enter these functions,
//! which is where cycles are detected.

mod equals;
mod ord;
mod show;

pub use equals::equals;
pub use ord::{gt, gte, lt, lte, max, min};
pub use show::to_string;

use fl_value::Value;

/// Returns true if `x` and `y` have the same runtime type name.
#[must_use]
pub fn same_type(x: &Value, y: &Value) -> bool {
    x.type_name() == y.type_name()
}
