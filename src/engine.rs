use anyhow::Result;
use log::info;

use crate::config::Config;
use crate::event::Button;
use crate::frame::Frontend;
use crate::platform::Platform;
use crate::renderer::Renderer;
use crate::vertex::Triangle;

/// Owns everything created at startup. The renderer is declared first so its
/// GL objects are released while the context is still alive.
pub struct Engine {
    renderer: Renderer,
    platform: Platform,
}

impl Engine {
    pub fn new(config: &Config) -> Result<Self> {
        let platform = Platform::init(&config.window)?;
        let renderer = Renderer::new(config.clear_color)?;

        Ok(Self { renderer, platform })
    }

    pub fn shutdown(mut self, delay_ms: u32) {
        info!("System is shutting down");
        self.platform.delay(delay_ms);
    }
}

impl Frontend for Engine {
    fn poll_button(&mut self) -> Option<Button> {
        self.platform.poll_button()
    }

    fn draw(&mut self, triangle: &Triangle) {
        self.renderer.draw(triangle);
    }

    fn present(&mut self) {
        self.platform.swap();
        self.renderer.clear();
    }
}
