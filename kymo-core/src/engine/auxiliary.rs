//! Auxiliary channel derivation
//!
//! Auxiliary outputs are pure binary steps driven by paired On/Off tags.
//! Unlike hardwired claims, an edge latches: it holds its level from its
//! start until a later edge replaces it or the block ends. Durations never
//! bound auxiliary coverage. State does not carry across blocks; every
//! block starts its auxiliary channels low.

use crate::waveform::Waveform;

/// A latching switch point on an auxiliary channel. Slice order is
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub at_ms: f64,
    pub level: f64,
}

impl Edge {
    pub const fn new(at_ms: f64, level: f64) -> Self {
        Edge { at_ms, level }
    }
}

/// Level at `t_ms`: the edge with the greatest start not after `t_ms`
/// decides, later-declared edges winning start ties. No edge yet is low.
fn level_at(edges: &[Edge], t_ms: f64) -> f64 {
    let mut winner: Option<&Edge> = None;
    for edge in edges {
        if edge.at_ms <= t_ms && winner.map_or(true, |w| edge.at_ms >= w.at_ms) {
            winner = Some(edge);
        }
    }
    winner.map_or(0.0, |w| w.level)
}

/// Resolve one auxiliary channel's edges over one cycle `[0, end_ms]` into
/// its minimal binary waveform.
///
/// An On without a matching Off stays high to the end of the cycle; a
/// channel without edges is the single entry `(0, 0)`.
pub fn resolve_edges(edges: &[Edge], end_ms: f64) -> Waveform {
    let mut ts = Vec::with_capacity(edges.len() + 2);
    ts.push(0.0);
    ts.push(end_ms);
    for edge in edges {
        ts.push(edge.at_ms);
    }
    ts.sort_by(f64::total_cmp);
    ts.dedup();

    let mut wave = Waveform::new();
    for t in ts {
        wave.push_step(t, level_at(edges, t));
    }
    wave
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_edges_is_constant_low() {
        let wave = resolve_edges(&[], 600.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0)]);
    }

    #[test]
    fn paired_edges_pulse_the_channel() {
        // "Power Supply 1 On"@50 and "... Off"@280 inside a 300 ms cycle.
        let edges = [Edge::new(50.0, 1.0), Edge::new(280.0, 0.0)];
        let wave = resolve_edges(&edges, 300.0);
        assert_eq!(
            wave.to_pairs(),
            vec![(0.0, 0.0), (50.0, 1.0), (280.0, 0.0)]
        );
    }

    #[test]
    fn unmatched_on_holds_high_to_cycle_end() {
        let edges = [Edge::new(120.0, 1.0)];
        let wave = resolve_edges(&edges, 500.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0), (120.0, 1.0)]);
        assert_eq!(wave.level_at(499.0), 1.0);
    }

    #[test]
    fn on_at_origin_starts_high() {
        let edges = [Edge::new(0.0, 1.0), Edge::new(200.0, 0.0)];
        let wave = resolve_edges(&edges, 300.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 1.0), (200.0, 0.0)]);
    }

    #[test]
    fn same_instant_edges_resolve_to_later_declared() {
        let edges = [Edge::new(100.0, 1.0), Edge::new(100.0, 0.0)];
        let wave = resolve_edges(&edges, 300.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0)]);

        let reversed = [Edge::new(100.0, 0.0), Edge::new(100.0, 1.0)];
        let wave = resolve_edges(&reversed, 300.0);
        assert_eq!(wave.to_pairs(), vec![(0.0, 0.0), (100.0, 1.0)]);
    }
}
