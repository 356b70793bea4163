pub mod faults;
pub mod grades;
pub mod scores;
pub mod thresholds;
pub mod window;
