pub mod report;

pub use report::{mask_secret, print_report, render_report};
