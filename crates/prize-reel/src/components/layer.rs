/// Render layer: controls draw order for entities.
///
/// Layers are drawn back-to-front: Background first, Indicators last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    /// Reel strips and their symbols.
    #[default]
    Reels = 1,
    /// Edge fades masking strip entry and exit.
    Overlay = 2,
    /// Selection outlines around the centre symbol.
    Indicators = 3,
}

impl RenderLayer {
    pub const COUNT: usize = 4;

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Background),
            1 => Some(Self::Reels),
            2 => Some(Self::Overlay),
            3 => Some(Self::Indicators),
            _ => None,
        }
    }

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Background < RenderLayer::Reels);
        assert!(RenderLayer::Reels < RenderLayer::Overlay);
        assert!(RenderLayer::Overlay < RenderLayer::Indicators);
    }

    #[test]
    fn u8_conversion_matches_discriminants() {
        for val in 0..RenderLayer::COUNT as u8 {
            assert_eq!(RenderLayer::from_u8(val).unwrap().as_u8(), val);
        }
        assert!(RenderLayer::from_u8(4).is_none());
    }
}
