pub mod overlay;
pub mod terminal;

pub use overlay::{Marker, Overlay, Rgb, TextLine};
pub use terminal::TerminalDisplay;

use anyhow::Result;

/// Key code that ends the session
pub const KEY_ESC: u8 = 27;

/// Window title shown above the feed
pub const DEFAULT_WINDOW_TITLE: &str = "Emotion Detection";

/// Draws the overlay and waits for the next frame
///
/// Returns the key pressed during the wait, if the display has a keyboard.
/// The wait doubles as the frame-rate throttle.
pub trait Display {
    fn show(&mut self, overlay: &Overlay) -> Result<Option<u8>>;
}
