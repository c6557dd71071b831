//! Scan scheduling (spec component 4.7) and hacking dispatch (spec
//! component 4.8).

pub mod hacking;
pub mod scheduler;

pub use hacking::{dispatch_hacking, HackAssignment};
pub use scheduler::{schedule, Assignment};
