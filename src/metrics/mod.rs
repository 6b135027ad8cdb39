use lazy_static::lazy_static;
use prometheus::register_int_counter_vec;
use prometheus::IntCounterVec;


lazy_static! {
    pub static ref RULE_CHANGED_EVENTS: IntCounterVec = register_int_counter_vec!(
        "rule_changed_events_total",
        "Rule change notifications handled, by outcome",
        &["outcome"]
    )
    .expect("metric can not be created");

    pub static ref RULE_CHANGES_APPLIED: IntCounterVec = register_int_counter_vec!(
        "rule_changes_applied_total",
        "Domain events applied to live rule state",
        &["rule_type", "action"]
    )
    .expect("metric can not be created");
}
