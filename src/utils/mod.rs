pub mod checks;
pub mod constants;

pub use checks::is_exec_file;
pub use constants::*;
