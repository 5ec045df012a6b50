use crate::camera::DrawCommand;
use crate::wall::Orientation;

/// Width and height of the procedural wall texture, in texels.
pub const TEXTURE_SIZE: usize = 64;

const BRICK_W: usize = 32;
const BRICK_H: usize = 16;
const MORTAR: usize = 2;

#[inline]
pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // 0RGB, the layout softbuffer expects
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
}

pub const CEILING: u32 = 0x0032_3246;
pub const FLOOR: u32 = 0x0028_2828;

/// Rasterizes one frame of wall columns into `buf` (`width * height`,
/// row-major). Commands for columns outside the buffer are ignored.
pub fn render_frame(buf: &mut [u32], width: usize, height: usize, commands: &[DrawCommand]) {
    debug_assert_eq!(buf.len(), width * height);

    let mid = height / 2;
    let (sky, ground) = buf.split_at_mut(mid * width);
    sky.fill(CEILING);
    ground.fill(FLOOR);

    for cmd in commands.iter().filter(|c| c.column < width) {
        draw_column(buf, width, height, cmd);
    }
}

fn draw_column(buf: &mut [u32], width: usize, height: usize, cmd: &DrawCommand) {
    let span = cmd.bottom - cmd.top;
    if span.is_nan() || span <= 0.0 {
        return;
    }

    // Clamp to screen
    let y0 = cmd.top.max(0.0).floor() as usize;
    let y1 = (cmd.bottom.min(height as f64).ceil() as usize).min(height);

    let u = texel_index(cmd.texture_offset);
    let mut idx = y0 * width + cmd.column;
    for y in y0..y1 {
        let v = texel_index((y as f64 + 0.5 - cmd.top) / span);
        buf[idx] = shade(texel(u, v), cmd.orientation);
        idx += width;
    }
}

#[inline]
fn texel_index(t: f64) -> usize {
    ((t * TEXTURE_SIZE as f64) as usize).min(TEXTURE_SIZE - 1)
}

/// Brick pattern; every other course is offset by half a brick.
fn texel(u: usize, v: usize) -> u32 {
    let course = v / BRICK_H;
    let shifted = if course % 2 == 0 { u } else { u + BRICK_W / 2 };
    let mortar = v % BRICK_H < MORTAR || shifted % BRICK_W < MORTAR;
    if mortar {
        pack_rgb(190, 185, 170)
    } else {
        pack_rgb(160, 64, 48)
    }
}

/// Vertical faces are drawn at half brightness so corners read clearly.
#[inline]
fn shade(color: u32, orientation: Orientation) -> u32 {
    match orientation {
        Orientation::Horizontal => color,
        Orientation::Vertical => (color >> 1) & 0x007F_7F7F,
    }
}
