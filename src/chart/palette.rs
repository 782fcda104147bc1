//! Series color palettes.
//!
//! Each family is a list of palettes indexed by color count: entry `n - 1`
//! holds the `n` colors used when `n` series (or slices) are drawn.

use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};

/// Dark blue family: primary palette for every chart type.
pub const DARKBLUE: [&[&str]; 6] = [
    &["#1c3742"],
    &["#1c3742", "#77878e"],
    &["#1c3742", "#697b82", "#b4bdc1"],
    &["#1c3742", "#495f68", "#77878e", "#a4afb3"],
    &["#1c3742", "#495f68", "#77878e", "#a4afb3", "#d2d7d9"],
    &["#1c3742", "#495f68", "#6e7f86", "#929fa5", "#b5bfc2", "#dbdfe1"],
];

/// Orange family: line series of combined charts, first scatter point.
pub const ORANGE: [&[&str]; 4] = [
    &["#e63b09"],
    &["#e63b09", "#f29d84"],
    &["#e63b09", "#ef7e5d", "#f7beae"],
    &["#e63b09", "#ec6c47", "#f29d84", "#f9cec1"],
];

/// Which palette family a builder draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseColor {
    Darkblue,
    Orange,
}

impl BaseColor {
    fn name(self) -> &'static str {
        match self {
            BaseColor::Darkblue => "darkblue",
            BaseColor::Orange => "orange",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palettes {
    pub darkblue: Vec<Vec<String>>,
    pub orange: Vec<Vec<String>>,
}

impl Default for Palettes {
    fn default() -> Self {
        fn owned(family: &[&[&str]]) -> Vec<Vec<String>> {
            family
                .iter()
                .map(|p| p.iter().map(|c| c.to_string()).collect())
                .collect()
        }
        Self {
            darkblue: owned(&DARKBLUE),
            orange: owned(&ORANGE),
        }
    }
}

impl Palettes {
    fn family(&self, base: BaseColor) -> &[Vec<String>] {
        match base {
            BaseColor::Darkblue => &self.darkblue,
            BaseColor::Orange => &self.orange,
        }
    }

    /// The `count`-color palette of a family, trimmed to exactly `count` colors.
    ///
    /// Fails when the family has no entry for `count`, or when that entry
    /// (e.g. a short override from a config file) holds fewer colors.
    pub fn pick(&self, base: BaseColor, count: usize) -> Result<&[String]> {
        let family = self.family(base);
        let palette = count
            .checked_sub(1)
            .and_then(|i| family.get(i))
            .ok_or(ChartError::PaletteExhausted {
                palette: base.name(),
                requested: count,
                available: family.len(),
            })?;
        if palette.len() < count {
            return Err(ChartError::PaletteExhausted {
                palette: base.name(),
                requested: count,
                available: palette.len(),
            });
        }
        Ok(&palette[..count])
    }

    /// Colors for one point per row of a scatter/bubble chart.
    ///
    /// Fewer than five points use the dark blue palette of that size. From five
    /// points on, the first point is orange and the rest take the dark blue
    /// palette sized for `count - 1`.
    pub fn scatter_colors(&self, count: usize) -> Result<Vec<String>> {
        if count < 5 {
            return Ok(self.pick(BaseColor::Darkblue, count)?.to_vec());
        }
        let lead = self
            .pick(BaseColor::Orange, 1)?
            .first()
            .cloned()
            .ok_or(ChartError::PaletteExhausted {
                palette: "orange",
                requested: 1,
                available: 0,
            })?;
        let mut colors = vec![lead];
        colors.extend_from_slice(self.pick(BaseColor::Darkblue, count - 1)?);
        Ok(colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_by_count() {
        let p = Palettes::default();
        assert_eq!(p.pick(BaseColor::Darkblue, 2).unwrap(), &["#1c3742", "#77878e"]);
        assert_eq!(p.pick(BaseColor::Orange, 4).unwrap().len(), 4);
    }

    #[test]
    fn exhausted_palette_is_an_error() {
        let p = Palettes::default();
        assert_eq!(
            p.pick(BaseColor::Orange, 5).unwrap_err(),
            ChartError::PaletteExhausted { palette: "orange", requested: 5, available: 4 }
        );
        assert!(p.pick(BaseColor::Darkblue, 0).is_err());
    }

    #[test]
    fn short_override_entry_is_an_error() {
        let mut p = Palettes::default();
        p.darkblue[1] = vec!["#000000".into()];
        assert_eq!(
            p.pick(BaseColor::Darkblue, 2).unwrap_err(),
            ChartError::PaletteExhausted { palette: "darkblue", requested: 2, available: 1 }
        );
        assert!(p.scatter_colors(2).is_err());
        assert_eq!(p.pick(BaseColor::Darkblue, 1).unwrap(), &["#1c3742"]);
    }

    #[test]
    fn scatter_blends_orange_from_five_points() {
        let p = Palettes::default();
        assert_eq!(p.scatter_colors(3).unwrap(), DARKBLUE[2].to_vec());
        let blended = p.scatter_colors(7).unwrap();
        assert_eq!(blended.len(), 7);
        assert_eq!(blended[0], "#e63b09");
        assert_eq!(&blended[1..], DARKBLUE[5]);
    }
}
