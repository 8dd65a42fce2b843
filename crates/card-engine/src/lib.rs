//! Ranking card compositor.
//!
//! Turns a winner name, two character portraits and a rank into a finished
//! rounded-corner card, and lays finished cards out on a fixed 8-slot sheet.
//! Everything here works on in-memory rasters; loading and saving files is
//! left to the caller.

pub mod card;
pub mod compose;
pub mod config;
pub mod gradient;
pub mod resize;
pub mod rotate;
pub mod shapes;
pub mod sheet;
pub mod text;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use card::{CardAssets, PortraitPlacement, compose_card};
pub use config::RenderConfig;
pub use resize::{fit_portrait, resize_with_opacity};
pub use sheet::{SHEET_SLOTS, SheetLayout, assemble_sheet};
pub use text::{FontHandle, FontSet};

/// Errors raised by the compositor.
#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Invalid card dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Sheet takes 1 to {max} cards, got {0}", max = SHEET_SLOTS)]
    SheetSlots(usize),
}
