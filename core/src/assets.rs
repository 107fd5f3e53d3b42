use std::borrow::Cow;

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

pub const DRIVER_FILENAME: &str = "driver.py";
pub const EXAMPLE_CONFIG_FILENAME: &str = "pycoach.toml";
pub const BUILTIN_PROBLEMS_FILENAME: &str = "problems.json";

/// Returns the UTF-8 contents of an embedded asset.
///
/// Panics if `name` is not embedded; every caller passes one of the constants above.
pub(crate) fn text(name: &str) -> Cow<'static, str> {
    let file = Asset::get(name).unwrap_or_else(|| panic!("Missing embedded asset '{}'", name));
    match file.data {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn all_assets_are_embedded() {
        for name in [
            DRIVER_FILENAME,
            EXAMPLE_CONFIG_FILENAME,
            BUILTIN_PROBLEMS_FILENAME,
        ] {
            assert!(!text(name).is_empty(), "{} is empty", name);
        }
    }
}
