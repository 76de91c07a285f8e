//=========================================================================
// Adventure Engine
//
// Main entry point: wires the winit platform to the tick driver.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(services)──>  Engine  ──run()──>  [Runtime]
//         │                                  │
//         ├─ with_tps()                      ├─ init(|driver| ...)
//         ├─ with_channel_capacity()         └─ runs platform on the
//         ├─ with_window_title()                main thread, ticking the
//         ├─ with_window_size()                 driver from the frame
//         └─ with_pointer_config()              callback
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{EventCollector, TickControl};
use crate::core::pointer::PointerConfig;
use crate::core::{GameServices, TickDriver};
use crate::platform::{Platform, WindowSettings};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 12.5 (logic ticks per second)
/// - **Channel capacity**: 128 samples
/// - **Window**: "Adventure", 640x480
/// - **Pointer**: [`PointerConfig::default`]
///
/// # Examples
///
/// ```no_run
/// # use adventure_core::EngineBuilder;
/// # use adventure_core::core::GameServices;
/// # fn services() -> GameServices { unimplemented!() }
/// EngineBuilder::new()
///     .with_tps(25.0)
///     .with_window_title("Museum")
///     .build(services())
///     .init(|driver| driver.with_pointer(|pointer, ctx| pointer.enable(ctx)))
///     .run();
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
    pointer: PointerConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 12.5,
            channel_capacity: 128,
            window: WindowSettings {
                title: "Adventure".to_string(),
                size: (640, 480),
            },
            pointer: PointerConfig::default(),
        }
    }

    /// Sets the target logic ticks per second.
    ///
    /// The driver ticks at most once per rendered frame, so rates above
    /// the display refresh rate are capped by it.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → driver communication.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.window.size = (width, height);
        self
    }

    pub fn with_pointer_config(mut self, config: PointerConfig) -> Self {
        self.pointer = config;
        self
    }

    /// Consumes the builder and creates the driver around `services`.
    pub fn build(self, services: GameServices) -> Engine {
        info!(
            "Building engine (TPS: {}, channel: {}, window: {:?})",
            self.tps, self.channel_capacity, self.window
        );

        Engine {
            driver: TickDriver::new(self.pointer, services),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
            window: self.window,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Adventure engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   └─► Platform (Winit event loop)
///         ├─► InputBuffer ──try_send──► bounded channel
///         └─► frame callback
///               └─► EventCollector ─► TickDriver::tick (≤ 1 per frame)
/// ```
pub struct Engine {
    driver: TickDriver,
    tps: f64,
    channel_capacity: usize,
    window: WindowSettings,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Gives the game access to the driver before the first tick (initial
    /// mouse status, pointer sprite, pending events).
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut TickDriver),
    {
        info!("Initializing engine");
        init_fn(&mut self.driver);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs the platform event loop and blocks until the application exits.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → driver channel
    /// 2. Runs the platform event loop on this thread
    /// 3. Each frame: drain the channel, tick the driver when due
    /// 4. Exits on window close or on the first tick error (logged)
    pub fn run(self) {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let (tx, rx) = bounded(self.channel_capacity);
        let mut collector = EventCollector::new(rx);
        let mut driver = self.driver;
        let mut pacer = TickPacer::new(self.tps, Instant::now());

        let on_frame = move || {
            if !pacer.is_due(Instant::now()) {
                return TickControl::Continue;
            }

            if collector.collect_frame() == TickControl::Exit {
                info!("Platform closed, stopping ticks");
                return TickControl::Exit;
            }

            match driver.tick(collector.sample()) {
                Ok(()) => TickControl::Continue,
                Err(e) => {
                    error!("Tick {} failed: {}", driver.ticks(), e);
                    TickControl::Exit
                }
            }
        };

        let platform = Platform::new(tx, self.window, on_frame);
        info!("Platform initialized, entering event loop");

        if let Err(e) = platform.run() {
            error!("Platform error: {}", e);
        }

        info!("Engine shutdown complete");
    }
}

//=== TickPacer ===========================================================

/// Decides on which frames a logic tick is due.
///
/// Missed ticks are not caught up: after a stall the schedule restarts
/// from the current frame.
struct TickPacer {
    period: Duration,
    next: Instant,
}

impl TickPacer {
    fn new(tps: f64, start: Instant) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / tps),
            next: start,
        }
    }

    fn is_due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
