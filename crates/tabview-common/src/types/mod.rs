mod core;

pub use self::core::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_translated_moves_origin_only() {
        let r = Rect::new(0, 570, 800, 30);
        let moved = r.translated(0, 48);
        assert_eq!(moved, Rect::new(0, 618, 800, 30));
    }

    #[test]
    fn rect_empty_when_degenerate() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(10, 10, 0, 5).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::new(0, 0, 1920, 1080);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn point_default_is_origin() {
        assert_eq!(Point::default(), Point::new(0, 0));
    }

    #[test]
    fn frame_id_display() {
        assert_eq!(FrameId(42).to_string(), "frame-42");
        assert_eq!(FrameId::MAIN.to_string(), "frame-0");
    }

    #[test]
    fn frame_id_ordering() {
        use std::collections::BTreeSet;
        let mut set = BTreeSet::new();
        set.insert(FrameId(2));
        set.insert(FrameId(1));
        set.insert(FrameId(2));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![FrameId(1), FrameId(2)]);
    }
}
