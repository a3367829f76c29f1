/// Print sizes at 300dpi. Layouts only ever see the canvas dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PosterSize {
    #[default]
    A4,
    A3,
    A2,
}

impl PosterSize {
    pub const ALL: [PosterSize; 3] = [PosterSize::A4, PosterSize::A3, PosterSize::A2];

    /// Unknown keys fall back to A4.
    pub fn from_key(key: &str) -> Self {
        match key.to_ascii_lowercase().as_str() {
            "a3" => PosterSize::A3,
            "a2" => PosterSize::A2,
            "a4" => PosterSize::A4,
            other => {
                log::warn!("unknown poster size `{other}`, using A4");
                PosterSize::A4
            }
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            PosterSize::A4 => "a4",
            PosterSize::A3 => "a3",
            PosterSize::A2 => "a2",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PosterSize::A4 => "A4",
            PosterSize::A3 => "A3",
            PosterSize::A2 => "A2",
        }
    }

    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PosterSize::A4 => (2480, 3508),
            PosterSize::A3 => (3508, 4961),
            PosterSize::A2 => (4961, 7016),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_share_the_paper_ratio() {
        for size in PosterSize::ALL {
            let (w, h) = size.dimensions();
            let ratio = h as f64 / w as f64;
            assert!((ratio - 2f64.sqrt()).abs() < 1e-3, "{}: {ratio}", size.name());
        }
    }

    #[test]
    fn keys_round_trip_and_fall_back() {
        for size in PosterSize::ALL {
            assert_eq!(PosterSize::from_key(size.key()), size);
        }
        assert_eq!(PosterSize::from_key("A3"), PosterSize::A3);
        assert_eq!(PosterSize::from_key("letter"), PosterSize::A4);
    }
}
