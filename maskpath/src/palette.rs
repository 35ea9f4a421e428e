//! Palette markers used by the mask images.
//!
//! Masks are painted with a handful of colours. [`MarkerPalette`] reduces an
//! image to an 8-bit palette where each colour ends up as a fixed index; any
//! non-zero index is walkable, the colour only carries a hint such as "start"
//! or "landmark".

use std::fmt::Display;

use image::{imageops::ColorMap, Rgb};
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Point};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Marker {
    Black,
    White,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Marker {
    pub const ALL: [Marker; 8] = [
        Marker::Black,
        Marker::White,
        Marker::Red,
        Marker::Green,
        Marker::Yellow,
        Marker::Blue,
        Marker::Magenta,
        Marker::Cyan,
    ];

    /// The marker painted with palette index `value`, if it is one of ours.
    pub fn from_value(value: u8) -> Option<Marker> {
        Marker::ALL.into_iter().find(|m| m.value() == value)
    }

    /// Palette index of the colour
    pub fn value(self) -> u8 {
        match self {
            Marker::Black => 0,
            Marker::White => 225,
            Marker::Red => 15,
            Marker::Green => 40,
            Marker::Yellow => 45,
            Marker::Blue => 190,
            Marker::Magenta => 195,
            Marker::Cyan => 220,
        }
    }

    pub fn rgb(self) -> Rgb<u8> {
        Rgb(match self {
            Marker::Black => [0, 0, 0],
            Marker::White => [255, 255, 255],
            Marker::Red => [255, 0, 0],
            Marker::Green => [0, 255, 0],
            Marker::Yellow => [255, 255, 0],
            Marker::Blue => [0, 0, 255],
            Marker::Magenta => [255, 0, 255],
            Marker::Cyan => [0, 255, 255],
        })
    }

    /// The marker whose colour is closest to `color`.
    pub fn nearest(color: &Rgb<u8>) -> Marker {
        let distance = |m: &Marker| {
            m.rgb()
                .0
                .iter()
                .zip(color.0)
                .map(|(&a, b)| (a as i32 - b as i32).pow(2))
                .sum::<i32>()
        };
        Marker::ALL
            .into_iter()
            .min_by_key(distance)
            .unwrap_or(Marker::Black)
    }

    /// Compact code for dumps, 0 for black through 7 for cyan.
    pub fn code(self) -> u8 {
        match self {
            Marker::Black => 0,
            Marker::White => 1,
            Marker::Red => 2,
            Marker::Green => 3,
            Marker::Yellow => 4,
            Marker::Blue => 5,
            Marker::Magenta => 6,
            Marker::Cyan => 7,
        }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Snaps every colour to the nearest marker and indexes it with the marker's
/// palette value, for use with [`image::imageops::index_colors`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkerPalette;

impl ColorMap for MarkerPalette {
    type Color = Rgb<u8>;

    fn index_of(&self, color: &Rgb<u8>) -> usize {
        Marker::nearest(color).value() as usize
    }

    fn map_color(&self, color: &mut Rgb<u8>) {
        *color = Marker::nearest(color).rgb();
    }
}

impl Grid {
    pub fn marker(&self, point: Point) -> Option<Marker> {
        self.get(point).and_then(Marker::from_value)
    }

    /// Copy of the grid with every known palette colour replaced by its
    /// compact code. Unknown values become 0.
    pub fn control_codes(&self) -> Grid {
        let mut codes = self.clone();
        for (point, value) in self.iter() {
            codes.set(point, Marker::from_value(value).map_or(0, Marker::code));
        }
        codes
    }

    /// All cells painted with `marker`, row by row.
    pub fn find_markers(&self, marker: Marker) -> impl Iterator<Item = Point> + '_ {
        self.iter()
            .filter(move |&(_, v)| v == marker.value())
            .map(|(p, _)| p)
    }

    /// Values of the grid as zero-padded three digit columns, one row per line.
    pub fn to_table(&self) -> String {
        let mut out = String::new();
        for (point, value) in self.iter() {
            if point.col > 0 {
                out.push(' ');
            }
            out.push_str(&format!("{:03}", value));
            if point.col + 1 == self.columns() {
                out.push('\n');
            }
        }
        out
    }
}
