pub mod aggregation;
pub mod source;
pub mod telemetry;
pub mod window;

#[cfg(test)]
mod testing;
