//! Portrait locations in the sprite collab layout.

use crate::data::Emotion;

pub const DEFAULT_PORTRAIT_BASE: &str =
    "https://raw.githubusercontent.com/keldaanCommunity/SpriteCollab/master/portrait";

const SHINY_SUFFIX: &str = "0000/0001";

/// Relative portrait path, e.g. `0025/0001/0000/0001/Happy.png`.
pub fn portrait_path(index: &str, shiny: bool, emotion: Emotion) -> String {
    let mut path = index.replace('-', "/");
    if shiny {
        path.push('/');
        path.push_str(SHINY_SUFFIX);
    }
    path.push('/');
    path.push_str(emotion.file_name());
    path.push_str(".png");
    path
}

/// Full portrait location under `base`, which is a URL or a local directory.
pub fn portrait_src(base: &str, index: &str, shiny: bool, emotion: Emotion) -> String {
    let base = base.trim_end_matches('/');
    let path = portrait_path(index, shiny, emotion);
    if base.is_empty() {
        path
    } else {
        format!("{base}/{path}")
    }
}

pub fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_index_becomes_nested_directory() {
        assert_eq!(
            portrait_path("0025-0001", false, Emotion::Normal),
            "0025/0001/Normal.png"
        );
    }

    #[test]
    fn shiny_portraits_use_the_shiny_subfolder() {
        assert_eq!(
            portrait_path("0025", true, Emotion::TearyEyed),
            "0025/0000/0001/Teary-Eyed.png"
        );
    }

    #[test]
    fn src_joins_base_once() {
        assert_eq!(
            portrait_src("/tmp/portraits/", "0150", false, Emotion::Angry),
            "/tmp/portraits/0150/Angry.png"
        );
        assert_eq!(
            portrait_src("", "0150", false, Emotion::Angry),
            "0150/Angry.png"
        );
        assert!(is_remote(&portrait_src(
            DEFAULT_PORTRAIT_BASE,
            "0150",
            false,
            Emotion::Normal
        )));
    }
}
