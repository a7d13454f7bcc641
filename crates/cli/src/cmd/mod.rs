mod release;

pub use release::{ReleaseArgs, cmd_release};
