// crates/quicktrim-media/src/helpers/frame.rs

use ffmpeg_the_third as ffmpeg;

/// Copy the visible RGBA pixels of plane 0, dropping the per-row stride padding
/// swscale adds for alignment.
pub fn packed_rgba(frame: &ffmpeg::util::frame::video::Video, width: u32, height: u32) -> Vec<u8> {
    let stride    = frame.stride(0);
    let raw       = frame.data(0);
    let row_bytes = width as usize * 4;
    let mut data  = Vec::with_capacity(row_bytes * height as usize);
    for row in 0..height as usize {
        let start = row * stride;
        data.extend_from_slice(&raw[start..start + row_bytes]);
    }
    data
}

/// Output size for a preview: at most `max_width` wide, aspect preserved,
/// both sides even and at least 2.
pub fn preview_size(src_w: u32, src_h: u32, max_width: u32) -> (u32, u32) {
    let src_w = src_w.max(2);
    let src_h = src_h.max(2);
    let out_w = src_w.min(max_width.max(2)) & !1;
    let out_h = ((out_w as f64 * src_h as f64 / src_w as f64).round() as u32).max(2) & !1;
    (out_w.max(2), out_h.max(2))
}
