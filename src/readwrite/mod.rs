/// Read queries files in the six recognized formats.
pub mod queries;

/// Write result rows and outlier statistics.
pub mod results;
