// crates/quicktrim-ui/src/helpers/format.rs
//
// UI-layer string utilities. Time formatting lives in
// quicktrim_core::helpers::time.

/// Truncates `text` to fit within `max_px` using a per-character width
/// heuristic (≈ 6.5 px/char at the list font size). Appends "…" when
/// truncated. Avoids egui font measurement, which needs `&mut Fonts`.
pub fn fit_label(text: &str, max_px: f32) -> String {
    const AVG_CHAR_PX: f32 = 6.5;
    const ELLIPSIS: &str = "…";
    let max_chars = (max_px / AVG_CHAR_PX).max(0.0) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let keep = max_chars.saturating_sub(1);
    text.chars().take(keep).collect::<String>() + ELLIPSIS
}
