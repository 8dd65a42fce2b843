//! Composite sheet: eight finished cards on one 1920x1080 canvas.
//!
//! The layout is a fixed template, not a grid: card 1 large on the left,
//! cards 2-4 in a row beside it, cards 5-8 smaller in a row below those.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::CardError;
use crate::compose;
use crate::resize::resize_with_opacity;

/// Number of card slots on a sheet.
pub const SHEET_SLOTS: usize = 8;

/// Where one card lands on the sheet and at what size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSlot {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Constants of the sheet template.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub width: u32,
    pub height: u32,
    pub logo_opacity: f32,
    /// Card 1 size is sheet size divided by these.
    pub lead_divisors: (f64, f64),
    /// Cards 2-4 size is card 1 size divided by these.
    pub middle_divisors: (f64, f64),
    /// Cards 5-8 size is cards 2-4 size divided by these.
    pub bottom_divisors: (f64, f64),
    /// Gap between card 1 and the first middle card.
    pub middle_gap_x: i32,
    /// Middle row starts this much above card 1's top.
    pub middle_lift: i32,
    /// Horizontal gap between middle cards.
    pub middle_spacing: i32,
    /// Gap between card 1 and the first bottom card.
    pub bottom_gap_x: i32,
    /// Horizontal gap between bottom cards.
    pub bottom_spacing: i32,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            logo_opacity: 0.8,
            lead_divisors: (2.6, 2.2),
            middle_divisors: (2.0, 1.5),
            bottom_divisors: (1.5, 1.3),
            middle_gap_x: 5,
            middle_lift: 20,
            middle_spacing: 15,
            bottom_gap_x: 50,
            bottom_spacing: 20,
        }
    }
}

fn divide(value: u32, divisor: f64) -> u32 {
    ((f64::from(value) / divisor) as u32).max(1)
}

impl SheetLayout {
    /// Slot for every card, in rank order.
    pub fn slots(&self) -> [SheetSlot; SHEET_SLOTS] {
        let lead_w = divide(self.width, self.lead_divisors.0);
        let lead_h = divide(self.height, self.lead_divisors.1);
        let mid_w = divide(lead_w, self.middle_divisors.0);
        let mid_h = divide(lead_h, self.middle_divisors.1);
        let low_w = divide(mid_w, self.bottom_divisors.0);
        let low_h = divide(mid_h, self.bottom_divisors.1);

        let lead_y = (self.height as i32 - lead_h as i32).div_euclid(2);
        let mid_y = lead_y - self.middle_lift;
        let low_y = mid_y + mid_h as i32;

        let mut slots = [SheetSlot {
            x: 0,
            y: lead_y,
            width: lead_w,
            height: lead_h,
        }; SHEET_SLOTS];

        let mut x = lead_w as i32 + self.middle_gap_x;
        for slot in &mut slots[1..4] {
            *slot = SheetSlot {
                x,
                y: mid_y,
                width: mid_w,
                height: mid_h,
            };
            x += mid_w as i32 + self.middle_spacing;
        }

        let mut x = lead_w as i32 + self.bottom_gap_x;
        for slot in &mut slots[4..] {
            *slot = SheetSlot {
                x,
                y: low_y,
                width: low_w,
                height: low_h,
            };
            x += low_w as i32 + self.bottom_spacing;
        }

        slots
    }
}

/// Lay out up to eight cards, in rank order, over a faded logo.
///
/// Cards are resized to their slot and pasted as-is, replacing whatever is
/// under them. Slots without a card stay empty.
pub fn assemble_sheet(
    cards: &[DynamicImage],
    logo: &DynamicImage,
    layout: &SheetLayout,
) -> Result<RgbaImage, CardError> {
    if cards.is_empty() || cards.len() > SHEET_SLOTS {
        return Err(CardError::SheetSlots(cards.len()));
    }

    let mut sheet = RgbaImage::from_pixel(layout.width, layout.height, Rgba([0, 0, 0, 0]));

    let watermark = resize_with_opacity(logo, layout.width / 2, layout.logo_opacity);
    let logo_y = (layout.height as i32 - watermark.height() as i32).div_euclid(2);
    compose::paste_alpha(&mut sheet, &watermark, 0, logo_y);

    for (rank, (card, slot)) in cards.iter().zip(layout.slots()).enumerate() {
        let resized = card
            .resize_exact(slot.width, slot.height, FilterType::Lanczos3)
            .to_rgba8();
        debug!(rank = rank + 1, ?slot, "Placing card on sheet");
        compose::paste(&mut sheet, &resized, slot.x, slot.y, None);
    }

    Ok(sheet)
}
