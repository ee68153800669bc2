pub mod blinker;
pub mod button;
pub mod debounce;
pub mod led;
pub mod serial_console;

pub use blinker::BlinkSequencer;
pub use button::{ActiveLevel, Button};
pub use debounce::{DebounceState, PressDetector};
pub use led::Led;
pub use serial_console::SerialConsole;
