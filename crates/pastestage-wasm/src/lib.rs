//! Pastestage WASM - WebAssembly bindings for Pastestage
//!
//! This crate exposes the pastestage-core transform engine to
//! JavaScript/TypeScript through a raster-backed staging session.
//!
//! # Module Structure
//!
//! - `session` - `JsStagingSession`, the paste / transform / accept API
//! - `host` - in-memory document layers and overlay
//! - `logger` - `log` output routed to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsStagingSession } from '@pastestage/wasm';
//!
//! await init();
//!
//! const session = new JsStagingSession(canvas.width, canvas.height);
//! await session.paste(new Uint8Array(await blob.arrayBuffer()));
//! // ...pointer events...
//! session.accept();
//! ctx.putImageData(new ImageData(
//!   new Uint8ClampedArray(session.layer_pixels('mask')), canvas.width), 0, 0);
//! ```

use wasm_bindgen::prelude::*;

mod host;
mod logger;
mod session;

pub use logger::set_log_level;
pub use session::{JsPlacement, JsStagingSession};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(log::Level::Info);
    log::debug!("pastestage {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
