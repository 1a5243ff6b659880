// The keyword-to-trends pipeline.
//
// analyze holds the sequential, throttled query loop; runner wires loading,
// filtering, analysis and output together for the two entry modes.

pub mod analyze;
pub mod runner;
