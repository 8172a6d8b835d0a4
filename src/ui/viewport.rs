//! Scroll range of the image viewport.

use crate::state::PanOffset;

/// Largest offset along one axis: how far content longer than the viewport can scroll.
fn max_offset(content: u32, viewport: f32) -> i32 {
    (content as f32 - viewport).max(0.0).floor() as i32
}

/// Limits `pan` to the range a scrollbar of the given viewport would allow.
pub fn clamp_to_viewport(pan: PanOffset, content: (u32, u32), viewport: (f32, f32)) -> PanOffset {
    PanOffset {
        x: pan.x.clamp(0, max_offset(content.0, viewport.0)),
        y: pan.y.clamp(0, max_offset(content.1, viewport.1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_content_cannot_scroll() {
        let pan = clamp_to_viewport(PanOffset { x: 50, y: -50 }, (100, 100), (400.0, 300.0));
        assert_eq!(pan, PanOffset::default());
    }

    #[test]
    fn large_content_scrolls_up_to_its_overhang() {
        let viewport = (400.0, 300.0);
        let content = (1000, 500);

        let inside = clamp_to_viewport(PanOffset { x: 150, y: 100 }, content, viewport);
        assert_eq!(inside, PanOffset { x: 150, y: 100 });

        let beyond = clamp_to_viewport(PanOffset { x: 5000, y: 5000 }, content, viewport);
        assert_eq!(beyond, PanOffset { x: 600, y: 200 });

        let before = clamp_to_viewport(PanOffset { x: -50, y: -1 }, content, viewport);
        assert_eq!(before, PanOffset::default());
    }
}
