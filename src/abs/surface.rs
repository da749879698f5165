//! The drawable target and its event channel.

/// Keys the render loop asks about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
}

/// Events delivered by [`Surface::poll_events`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The drawable area changed size.
    Resized { width: i32, height: i32 },
    /// The window manager asked the window to close.
    CloseRequested,
}

/// A window-like drawable with a current GL context.
pub trait Surface {
    /// Current drawable size in pixels.
    fn size(&self) -> (i32, i32);

    fn should_close(&self) -> bool;

    fn set_should_close(&mut self, value: bool);

    /// Whether `key` is currently held down.
    fn is_key_pressed(&self, key: Key) -> bool;

    /// Presents the back buffer.
    fn swap_buffers(&mut self);

    /// Drains pending window events.
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
}
