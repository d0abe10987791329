use egui::FontId;

use super::surface::Surface;

const ELLIPSIS: &str = "…";

/// Break `text` into lines using greedy word wrap. `width_for_line(n)` gives
/// the available width for the n-th line, which lets callers flow text
/// around a floated image. Words wider than a line are split by character.
pub fn wrap_lines<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    font: &FontId,
    width_for_line: impl Fn(usize) -> f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        let max = width_for_line(lines.len());
        if surface.text_width(&candidate, font) <= max {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        // Word alone may still be too wide for a fresh line.
        for ch in word.chars() {
            let max = width_for_line(lines.len());
            let mut next = current.clone();
            next.push(ch);
            if !current.is_empty() && surface.text_width(&next, font) > max {
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            } else {
                current = next;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Clip `text` to one line of at most `max_width`, ending in an ellipsis when
/// shortened.
pub fn ellipsize<S: Surface + ?Sized>(
    surface: &mut S,
    text: &str,
    font: &FontId,
    max_width: f32,
) -> String {
    if surface.text_width(text, font) <= max_width {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let (mut lo, mut hi) = (0usize, chars.len());
    // Largest prefix that fits together with the ellipsis.
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let candidate: String = chars[..mid].iter().collect::<String>() + ELLIPSIS;
        if surface.text_width(&candidate, font) <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    if lo == 0 {
        return ELLIPSIS.to_string();
    }
    let prefix: String = chars[..lo].iter().collect();
    prefix.trim_end().to_string() + ELLIPSIS
}
