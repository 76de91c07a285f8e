//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) with the tick driver.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌────────────────────────────────────────────────┐
//  │  Winit Event Loop                              │
//  │   ↓                                            │
//  │  InputProcessor                                │
//  │   ├─ buttons / wheel → PointerFlags            │
//  │   └─ physical position → logical (u16, u16)    │
//  │   ↓                                            │
//  │  InputBuffer (OR edges, keep last position)    │
//  │   ↓                                            │
//  │  RedrawRequested                               │
//  │   ├─ flush → bounded channel (try_send)        │
//  │   └─ on_frame() → EventCollector → TickDriver  │
//  └────────────────────────────────────────────────┘
// ```
//
// Frame Boundary: RedrawRequested
//    → All buffered pointer input sent as one sample
//    → `on_frame` decides whether a logic tick is due
//    → Empty buffers NOT sent
//
// The channel is bounded. A full or disconnected channel drops the sample
// with a warning rather than blocking the event loop.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Sender, TrySendError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent, TickControl};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

//=== WindowSettings ======================================================

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSettings {
    pub title: String,
    pub size: (u32, u32),
}

//=== Platform ============================================================

/// Window owner and pointer input aggregator.
///
/// Runs on the main thread (Winit requirement on macOS/iOS). After each
/// flush it calls `on_frame`, which runs at most one logic tick and tells
/// the platform whether to keep going.
pub(crate) struct Platform<F>
where
    F: FnMut() -> TickControl,
{
    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,

    settings: WindowSettings,

    buffer: InputBuffer,

    /// Channel to the event collector.
    event_sender: Sender<PlatformEvent>,

    input_processor: InputProcessor,

    on_frame: F,
}

impl<F> Platform<F>
where
    F: FnMut() -> TickControl,
{
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet; that happens lazily in `resumed()`.
    pub fn new(event_sender: Sender<PlatformEvent>, settings: WindowSettings, on_frame: F) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            settings,
            buffer: InputBuffer::new(),
            event_sender,
            input_processor: InputProcessor::new(),
            on_frame,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes or `on_frame`
    /// asks to exit.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;

        event_loop
            .run_app(&mut self)
            .map_err(|e| PlatformError::EventLoopExecution(e.to_string()))
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends the buffered sample, dropping it if the channel is full or gone.
    fn flush_input_buffer(&mut self) {
        let Some(sample) = self.buffer.drain() else {
            return;
        };

        trace!(target: "platform::input", "Flushing {:?}", sample);

        match self.event_sender.try_send(PlatformEvent::Pointer(sample)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(target: "platform::input", "Channel full, dropping {:?}", sample);
            }
            Err(TrySendError::Disconnected(_)) => {
                warn!(target: "platform::input", "Channel disconnected, dropping {:?}", sample);
            }
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.buffer.clear();
        let _ = self.event_sender.try_send(PlatformEvent::WindowClosed);
        event_loop.exit();
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl<F> ApplicationHandler for Platform<F>
where
    F: FnMut() -> TickControl,
{
    /// Creates the window if it doesn't exist yet (may repeat on mobile).
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.settings.size;
        let attrs = WindowAttributes::default()
            .with_title(self.settings.title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.input_processor.set_scale_factor(window.scale_factor());
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.close(event_loop);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.close(event_loop);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!(target: "platform", "Scale factor changed: {}", scale_factor);
                self.input_processor.set_scale_factor(scale_factor);
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = self.input_processor.process_cursor_move(position);
                self.buffer.set_position(x, y);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                match self.input_processor.process_mouse_button(button, state) {
                    Some(flags) => self.buffer.push_flags(flags),
                    None => trace!(target: "platform::input", "Unmapped button ignored"),
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(flags) = self.input_processor.process_wheel(delta) {
                    self.buffer.push_flags(flags);
                }
            }

            WindowEvent::RedrawRequested => {
                self.flush_input_buffer();

                if (self.on_frame)() == TickControl::Exit {
                    info!(target: "platform", "Core requested shutdown");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
