// -
// Key path tokens

/// Segment separating the database name from the rule category in a key path:
/// `/<namespace>/<database>/rules/<rule_type>/<item_type>[/<item_name>]`
pub const RULES_NODE: &str = "rules";

pub(crate) const PATH_SEPARATOR: char = '/';

// -
// Metric label values

pub(crate) const OUTCOME_APPLIED: &str = "applied";
pub(crate) const OUTCOME_IGNORED: &str = "ignored";
pub(crate) const OUTCOME_DROPPED: &str = "dropped";
