pub mod window;

pub use window::{BarWindower, WindowConfig};
