//! Cross-module integration tests exercising `submit()` end to end.

mod submit_flows;
