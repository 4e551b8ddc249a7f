// crates/flow-terminal/src/components/mod.rs

pub mod filter_dialog;
pub mod flow_table;
pub mod help;
pub mod status_bar;
