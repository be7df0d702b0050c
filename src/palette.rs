//! The sixteen-color gradient the renderer paints escape counts
//! with.  The entries are the default gradient of Ultra Fractal,
//! deep blue rising through the sands and falling back; counts past
//! the table's length wrap around, which is what gives the outside
//! of the set its banded look.

/// Packs a color into 0xAARRGGBB form with the alpha forced opaque.
pub fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    0xFF00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

const GRADIENT: [(u8, u8, u8); 16] = [
    (2, 3, 105),
    (35, 34, 113),
    (68, 66, 122),
    (101, 98, 131),
    (134, 129, 140),
    (167, 161, 149),
    (200, 193, 157),
    (233, 225, 166),
    (240, 231, 159),
    (221, 213, 137),
    (201, 195, 114),
    (182, 176, 92),
    (163, 158, 69),
    (143, 139, 47),
    (124, 121, 24),
    (105, 103, 2),
];

/// Turns escape counts into packed colors.  Counts that cleared the
/// escape circle before the budget ran out index the gradient modulo
/// its length; everything else is interior and painted black.
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    colors: [u32; 16],
    interior: u32,
}

impl Default for Palette {
    fn default() -> Palette {
        let mut colors = [0 as u32; 16];
        for (slot, &(r, g, b)) in colors.iter_mut().zip(GRADIENT.iter()) {
            *slot = pack_argb(r, g, b);
        }
        Palette {
            colors,
            interior: pack_argb(0, 0, 0),
        }
    }
}

impl Palette {
    /// The color of points that never escape.
    pub fn interior(&self) -> u32 {
        self.interior
    }

    /// The color for an escape count measured against the iteration
    /// budget `limit`.  A count that reached the budget never
    /// escaped, and a count of zero cannot come out of the kernel, so
    /// both paint the interior.
    pub fn color_for(&self, count: usize, limit: usize) -> u32 {
        if count > 0 && count < limit {
            self.colors[count % self.colors.len()]
        } else {
            self.interior
        }
    }
}
