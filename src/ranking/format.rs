const TIERS: [(f64, &str, i32); 4] = [(1e3, "K", 3), (1e6, "M", 6), (1e9, "B", 9), (1e12, "T", 12)];

/// Most fraction digits a formatter prints. Larger requests are clamped.
pub const MAX_DECIMALS: u32 = 15;

/// Compact currency-style number formatting: `$1.50B`, `-$12.00K`, `$950.00`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompactFormat {
    /// Text placed before the digits (after a minus sign).
    pub prefix: String,
    /// Fixed number of fraction digits, at most [`MAX_DECIMALS`].
    pub decimals: u32,
}

impl Default for CompactFormat {
    fn default() -> Self {
        Self {
            prefix: "$".to_owned(),
            decimals: 2,
        }
    }
}

impl CompactFormat {
    /// Formatter with the given prefix and precision.
    pub fn new(prefix: impl Into<String>, decimals: u32) -> Self {
        Self {
            prefix: prefix.into(),
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    fn precision(&self) -> u32 {
        self.decimals.min(MAX_DECIMALS)
    }

    /// Format with a K/M/B/T suffix at fixed precision. Non-finite values format as zero.
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let decimals = self.precision() as usize;
        let (mantissa, suffix) = self.split(value.abs());
        let digits = format!("{mantissa:.decimals$}");
        let negative = value < 0.0 && digits.bytes().any(|b| matches!(b, b'1'..=b'9'));
        format!(
            "{}{}{digits}{suffix}",
            if negative { "-" } else { "" },
            self.prefix
        )
    }

    /// Like [`CompactFormat::format`] with trailing fraction zeros dropped (`$1.5B`, `$2K`).
    pub fn format_tick(&self, value: f64) -> String {
        let full = self.format(value);
        let (body, suffix) = match full.char_indices().last() {
            Some((i, c)) if c.is_ascii_alphabetic() => full.split_at(i),
            _ => (full.as_str(), ""),
        };
        if !body.contains('.') {
            return full;
        }
        let trimmed = body.trim_end_matches('0').trim_end_matches('.');
        format!("{trimmed}{suffix}")
    }

    /// Inverse of [`CompactFormat::format`] (and [`CompactFormat::format_tick`]).
    ///
    /// The digits are scaled by an exact power of ten, so `parse(format(v))` is the value `format`
    /// displayed. Returns `None` for text this formatter could not have produced.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        let (negative, rest) = match text.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, text),
        };
        let rest = rest.strip_prefix(self.prefix.as_str())?;

        let (digits, exp) = match rest.chars().last()? {
            c if c.is_ascii_alphabetic() => {
                let upper = c.to_ascii_uppercase().to_string();
                let (_, _, exp) = TIERS.iter().find(|(_, s, _)| *s == upper)?;
                (&rest[..rest.len() - 1], *exp)
            }
            _ => (rest, 0),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() || !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut n: u128 = 0;
        for b in int_part.bytes().chain(frac_part.bytes()) {
            n = n.checked_mul(10)?.checked_add(u128::from(b - b'0'))?;
        }
        let shift = exp - i32::try_from(frac_part.len()).ok()?;
        let magnitude = if shift >= 0 {
            (n.checked_mul(10u128.checked_pow(shift.unsigned_abs())?)?) as f64
        } else {
            n as f64 / 10f64.powi(-shift)
        };
        Some(if negative { -magnitude } else { magnitude })
    }

    fn split(&self, abs: f64) -> (f64, &'static str) {
        let decimals = self.precision() as i32;
        let round = |m: f64| {
            let p = 10f64.powi(decimals);
            (m * p).round() / p
        };

        let mut tier = TIERS.iter().rposition(|(t, _, _)| abs >= *t);
        loop {
            let (divisor, suffix) = match tier {
                Some(i) => (TIERS[i].0, TIERS[i].1),
                None => (1.0, ""),
            };
            let mantissa = abs / divisor;
            let next = tier.map_or(0, |i| i + 1);
            if round(mantissa) >= 1000.0 && next < TIERS.len() {
                tier = Some(next);
                continue;
            }
            return (mantissa, suffix);
        }
    }
}

/// English ordinal: `1st`, `2nd`, `3rd`, `4th`, `11th`, `22nd`...
pub fn ordinal(n: u64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
#[path = "../../tests/unit/ranking/format.rs"]
mod tests;
