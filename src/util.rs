use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a `Rect` of the given size centered within `area`.  If `area` is
/// too small, the result is shrunk to fit.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [rect] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(rect);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Rect::new(0, 0, 80, 24), Size::new(40, 10), Rect::new(20, 7, 40, 10))]
    #[case(Rect::new(0, 0, 34, 10), Size::new(34, 10), Rect::new(0, 0, 34, 10))]
    #[case(Rect::new(5, 3, 20, 10), Size::new(10, 4), Rect::new(10, 6, 10, 4))]
    #[case(Rect::new(0, 0, 20, 10), Size::new(30, 12), Rect::new(0, 0, 20, 10))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }
}
