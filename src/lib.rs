// Library exports for the binary and integration tests
pub mod aggregator;
pub mod analysis;
pub mod dialect;
pub mod logging;
pub mod parser;
pub mod renderer;
pub mod report;
pub mod timefmt;
pub mod window;
