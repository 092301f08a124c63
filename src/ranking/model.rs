use std::collections::HashMap;

/// Opaque sRGB color, 8 bits per channel.
///
/// Deserializes from `"#rrggbb"`, `"#rrggbbaa"` or an `[r, g, b]` / `[r, g, b, a]` byte array and
/// serializes back to a hex string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha (straight, not premultiplied).
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if !s.is_ascii() {
            return Err(format!("invalid hex color \"{s}\""));
        }

        fn byte(pair: &str) -> Result<u8, String> {
            u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
        }

        match s.len() {
            6 => Ok(Self::rgb(byte(&s[0..2])?, byte(&s[2..4])?, byte(&s[4..6])?)),
            8 => Ok(Self {
                r: byte(&s[0..2])?,
                g: byte(&s[2..4])?,
                b: byte(&s[4..6])?,
                a: byte(&s[6..8])?,
            }),
            _ => Err("hex color must be #RRGGBB or #RRGGBBAA".to_owned()),
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Deterministic palette color for an identity without an explicit color.
    pub fn for_id(id: &str) -> Self {
        const PALETTE: [Color; 8] = [
            Color::rgb(0x4e, 0x79, 0xa7),
            Color::rgb(0xf2, 0x8e, 0x2b),
            Color::rgb(0xe1, 0x57, 0x59),
            Color::rgb(0x76, 0xb7, 0xb2),
            Color::rgb(0x59, 0xa1, 0x4f),
            Color::rgb(0xed, 0xc9, 0x48),
            Color::rgb(0xb0, 0x7a, 0xa1),
            Color::rgb(0xff, 0x9d, 0xa7),
        ];
        let h = crate::foundation::math::hash64(0, id.as_bytes());
        PALETTE[(h % PALETTE.len() as u64) as usize]
    }
}

impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match <Repr as serde::Deserialize>::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Self {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                }),
                _ => Err(serde::de::Error::custom(
                    "color array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// One ranked item of a data frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Datum {
    /// Stable identity across frames.
    pub id: String,
    /// Ranked value.
    pub value: f64,
    /// Display name. Defaults to the id.
    #[serde(default)]
    pub name: Option<String>,
    /// Bar color. Derived from the id when absent.
    #[serde(default)]
    pub color: Option<Color>,
}

impl Datum {
    /// Datum with only an id and a value.
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
            name: None,
            color: None,
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Bar color.
    pub fn display_color(&self) -> Color {
        self.color.unwrap_or_else(|| Color::for_id(&self.id))
    }
}

/// Snapshot of all items at one point of the race (a week, a season...).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataFrame {
    /// Label of the snapshot.
    pub key: String,
    /// Items, in any order.
    pub data: Vec<Datum>,
}

/// Which end of the ranking is shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankDirection {
    /// The `top_k` largest values.
    #[default]
    Forward,
    /// The `top_k` smallest values (the tail of the descending ranking).
    Reverse,
}

/// Sort `data` by value, descending.
///
/// Equal values keep the order given by `previous` (id to previous rank), then input order.
/// Non-finite values sort last.
pub fn rank_items<'a>(data: &'a [Datum], previous: Option<&HashMap<&str, usize>>) -> Vec<&'a Datum> {
    let mut order: Vec<(usize, &Datum)> = data.iter().enumerate().collect();
    order.sort_by(|(ia, a), (ib, b)| {
        let key = |d: &Datum| if d.value.is_finite() { d.value } else { f64::NEG_INFINITY };
        let finite = |d: &Datum| d.value.is_finite();
        finite(b)
            .cmp(&finite(a))
            .then_with(|| key(b).total_cmp(&key(a)))
            .then_with(|| {
                let prev_rank = |d: &Datum| {
                    previous
                        .and_then(|p| p.get(d.id.as_str()).copied())
                        .unwrap_or(usize::MAX)
                };
                prev_rank(a).cmp(&prev_rank(b))
            })
            .then_with(|| ia.cmp(ib))
    });
    order.into_iter().map(|(_, d)| d).collect()
}

/// `id → rank` for a ranked list.
pub fn rank_lookup<'a>(ranked: &[&'a Datum]) -> HashMap<&'a str, usize> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, d)| (d.id.as_str(), i))
        .collect()
}

/// Visible slice of a ranked list and where it starts in the full ranking.
pub fn rank_window<'a, 'b>(
    ranked: &'b [&'a Datum],
    top_k: usize,
    direction: RankDirection,
) -> (usize, &'b [&'a Datum]) {
    let k = top_k.min(ranked.len());
    let start = match direction {
        RankDirection::Forward => 0,
        RankDirection::Reverse => ranked.len() - k,
    };
    (start, &ranked[start..start + k])
}

#[cfg(test)]
#[path = "../../tests/unit/ranking/model.rs"]
mod tests;
