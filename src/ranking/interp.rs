use std::collections::HashMap;

use crate::{
    foundation::core::Canvas,
    foundation::math::{clamp01, lerp},
    ranking::format::{CompactFormat, ordinal},
    ranking::model::{Color, Datum, RankDirection, rank_items, rank_lookup, rank_window},
    ranking::scale::{BandScale, LinearScale},
};

/// Which rank number a moving bar displays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankLabelPolicy {
    /// The slot nearest to the bar's current position, re-rounded every frame.
    #[default]
    NearestSlot,
    /// The rank the bar is heading to for the whole transition.
    FinalRank,
}

/// Plot area margins, in pixels from the canvas edges.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RaceLayout {
    /// Space for names left of the bars.
    pub margin_left: f64,
    /// Space for value labels right of the longest bar.
    pub margin_right: f64,
    /// Space for the title and axis above the first slot.
    pub margin_top: f64,
    /// Space below the last slot.
    pub margin_bottom: f64,
    /// Approximate number of value-axis ticks.
    pub tick_count: usize,
}

impl Default for RaceLayout {
    fn default() -> Self {
        Self {
            margin_left: 180.0,
            margin_right: 80.0,
            margin_top: 120.0,
            margin_bottom: 60.0,
            tick_count: 5,
        }
    }
}

impl RaceLayout {
    /// Pixel span of the value axis (bar lengths).
    pub fn value_range(&self, canvas: Canvas) -> (f64, f64) {
        let x0 = self.margin_left;
        let x1 = f64::from(canvas.width) - self.margin_right;
        (x0, x1.max(x0))
    }

    /// Pixel span of the rank axis (slots).
    pub fn slot_range(&self, canvas: Canvas) -> (f64, f64) {
        let y0 = self.margin_top;
        let y1 = f64::from(canvas.height) - self.margin_bottom;
        (y0, y1.max(y0))
    }
}

/// Everything that shapes a race frame apart from the data.
#[derive(Clone, Debug, PartialEq)]
pub struct RaceParams {
    /// Visible slots.
    pub top_k: usize,
    /// Head or tail of the ranking.
    pub direction: RankDirection,
    /// Gap between bands.
    pub bar_gap_px: f64,
    /// Shortest drawn bar.
    pub min_bar_length_px: f64,
    /// Lower bound of the value-axis maximum.
    pub value_floor: f64,
    /// Rank label policy.
    pub rank_label_policy: RankLabelPolicy,
    /// Value label formatting.
    pub format: CompactFormat,
    /// Plot area.
    pub layout: RaceLayout,
}

impl Default for RaceParams {
    fn default() -> Self {
        Self {
            top_k: 10,
            direction: RankDirection::Forward,
            bar_gap_px: 4.0,
            min_bar_length_px: 0.0,
            value_floor: 10.0,
            rank_label_policy: RankLabelPolicy::NearestSlot,
            format: CompactFormat::default(),
            layout: RaceLayout::default(),
        }
    }
}

/// How a bar relates to the two visible windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarPhase {
    /// Visible in both frames.
    Steady,
    /// Only visible in the target frame.
    Entering,
    /// Only visible in the source frame.
    Exiting,
}

/// One bar as drawn at the current progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarState {
    /// Datum identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Fill color.
    pub color: Color,
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Bar length.
    pub width: f64,
    /// Band thickness.
    pub height: f64,
    /// Vertical center.
    pub y_center: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Interpolated raw value.
    pub value: f64,
    /// Formatted `value`.
    pub label_text: String,
    /// Slot shown as rank, 0-based within the window.
    pub rank_index: Option<usize>,
    /// Rank number text (`1st`, `2nd`...).
    pub rank_label: Option<String>,
    /// Steady, entering or exiting.
    pub phase: BarPhase,
}

/// A value-axis grid line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisTick {
    /// Domain value.
    pub value: f64,
    /// Pixel position on the value axis.
    pub x: f64,
    /// Formatted value.
    pub label: String,
}

/// All bars and axis ticks of one race frame.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RaceFrame {
    /// Bars ordered top to bottom.
    pub bars: Vec<BarState>,
    /// Value-axis ticks.
    pub axis: Vec<AxisTick>,
    /// Interpolated value-axis maximum.
    pub domain_max: f64,
}

struct Side<'a> {
    start: usize,
    window: &'a [&'a Datum],
    slot_of: HashMap<&'a str, usize>,
    all: HashMap<&'a str, &'a Datum>,
    scale: LinearScale,
}

impl<'a> Side<'a> {
    fn new(
        ranked: &'a [&'a Datum],
        params: &RaceParams,
        value_range: (f64, f64),
    ) -> Self {
        let (start, window) = rank_window(ranked, params.top_k, params.direction);
        let max = window
            .iter()
            .map(|d| d.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        let floor = if params.value_floor.is_finite() { params.value_floor } else { 0.0 };
        let scale = LinearScale::new((0.0, max.max(floor)), value_range).nice(params.layout.tick_count);
        Self {
            start,
            window,
            slot_of: rank_lookup(window),
            all: ranked.iter().map(|d| (d.id.as_str(), *d)).collect(),
            scale,
        }
    }

    fn bar_length(&self, value: f64) -> f64 {
        self.scale.apply(value.max(0.0)) - self.scale.range.0
    }
}

/// Interpolate between the rankings of `from` and `to` at eased `progress`.
///
/// At progress 0 every visible bar sits exactly on its `from` slot with its `from` length, and at
/// progress 1 exactly on its `to` slot. Bars entering the window come from the exit slot (one past
/// the bottom for [`RankDirection::Forward`], one above the top for `Reverse`) fading in; bars
/// leaving travel there fading out.
pub fn interpolate_race(
    from: &[Datum],
    to: &[Datum],
    progress: f64,
    params: &RaceParams,
    canvas: Canvas,
) -> RaceFrame {
    let p = clamp01(progress);
    let value_range = params.layout.value_range(canvas);

    let from_ranked = rank_items(from, None);
    let from_ranks = rank_lookup(&from_ranked);
    let to_ranked = rank_items(to, Some(&from_ranks));

    let src = Side::new(&from_ranked, params, value_range);
    let dst = Side::new(&to_ranked, params, value_range);
    if src.window.is_empty() && dst.window.is_empty() {
        return RaceFrame::default();
    }

    let band = BandScale::new(params.layout.slot_range(canvas), params.top_k, params.bar_gap_px);
    let exit_slot = match params.direction {
        RankDirection::Forward => params.top_k as f64,
        RankDirection::Reverse => -1.0,
    };

    let ids = dst
        .window
        .iter()
        .chain(src.window.iter().filter(|d| !dst.slot_of.contains_key(d.id.as_str())))
        .map(|d| d.id.as_str());

    let mut bars: Vec<BarState> = ids
        .map(|id| {
            let from_pos = src.slot_of.get(id).copied();
            let to_pos = dst.slot_of.get(id).copied();
            let from_d = src.all.get(id).copied();
            let to_d = dst.all.get(id).copied();

            let phase = match (from_pos, to_pos) {
                (Some(_), Some(_)) => BarPhase::Steady,
                (None, _) => BarPhase::Entering,
                (Some(_), None) => BarPhase::Exiting,
            };
            let opacity = match phase {
                BarPhase::Steady => 1.0,
                BarPhase::Entering => p,
                BarPhase::Exiting => 1.0 - p,
            };

            let finite = |d: Option<&Datum>| d.map(|d| d.value).filter(|v| v.is_finite());
            let raw_from = finite(from_d).or(finite(to_d)).unwrap_or(0.0);
            let raw_to = finite(to_d).or(finite(from_d)).unwrap_or(0.0);

            let from_slot = from_pos.map_or(exit_slot, |s| s as f64);
            let to_slot = to_pos.map_or(exit_slot, |s| s as f64);
            let y_center = lerp(band.center(from_slot), band.center(to_slot), p);
            let height = band.bandwidth();

            let width = lerp(src.bar_length(raw_from), dst.bar_length(raw_to), p)
                .max(params.min_bar_length_px);
            let value = lerp(raw_from, raw_to, p);

            let (rank_index, rank_start) = match params.rank_label_policy {
                RankLabelPolicy::NearestSlot => {
                    let (side, pos) = if p >= 0.5 { (&dst, to_pos) } else { (&src, from_pos) };
                    // half-way ties round toward the slot of the side being labelled
                    let toward = if p >= 0.5 { to_slot } else { from_slot };
                    let at = lerp(from_slot, to_slot, p);
                    let slot = if (at - at.floor() - 0.5).abs() < 1e-9 {
                        if toward > at { at.ceil() } else { at.floor() }
                    } else {
                        at.round()
                    };
                    let idx = (slot >= 0.0 && (slot as usize) < side.window.len())
                        .then_some(slot as usize)
                        .filter(|_| pos.is_some());
                    (idx, side.start)
                }
                RankLabelPolicy::FinalRank => match (to_pos, from_pos) {
                    (Some(t), _) => (Some(t), dst.start),
                    (None, f) => (f, src.start),
                },
            };

            let shown = to_d.or(from_d);
            BarState {
                id: id.to_owned(),
                name: shown.map_or(id, Datum::display_name).to_owned(),
                color: shown.map_or_else(|| Color::for_id(id), Datum::display_color),
                x: value_range.0,
                y: y_center - height / 2.0,
                width,
                height,
                y_center,
                opacity,
                value,
                label_text: params.format.format(value),
                rank_index,
                rank_label: rank_index.map(|i| ordinal((rank_start + i + 1) as u64)),
                phase,
            }
        })
        .collect();

    bars.sort_by(|a, b| a.y_center.total_cmp(&b.y_center).then_with(|| a.id.cmp(&b.id)));

    let domain_max = lerp(src.scale.domain.1, dst.scale.domain.1, p);
    let axis_scale = LinearScale::new((0.0, domain_max), value_range);
    let axis = axis_scale
        .ticks(params.layout.tick_count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            x: axis_scale.apply(value),
            label: params.format.format_tick(value),
        })
        .collect();

    RaceFrame {
        bars,
        axis,
        domain_max,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ranking/interp.rs"]
mod tests;
