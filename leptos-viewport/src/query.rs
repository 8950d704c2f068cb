use crate::breakpoints::{Breakpoint, BreakpointTable};

/// Offset subtracted from an exclusive upper bound when rendering a CSS
/// `max-width`, so that `Down(Sm)` and `Up(Sm)` never match the same width.
const MAX_WIDTH_STEP: f64 = 0.05;

/// Anything that can decide a viewport width against a breakpoint table.
pub trait Classify {
    fn classify(&self, width: f64, table: &BreakpointTable) -> bool;
}

/// A width condition over named breakpoints.
///
/// Tiers partition the whole width axis the same way
/// [`BreakpointTable::tier_for`] does: `xs` covers every width below `sm`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaQuery {
    /// `width >= table[b]`
    Up(Breakpoint),
    /// `width < table[b]`
    Down(Breakpoint),
    /// `table[start] <= width < table[end]`
    Between(Breakpoint, Breakpoint),
    /// Exactly the tier `b`, i.e. `tier_for(width) == b`.
    Only(Breakpoint),
    /// Any tier except `b`.
    Not(Breakpoint),
}

/// `min <= width < end`, inverted when `negated`. Both `to_css` and
/// `classify` are derived from this.
#[derive(Clone, Copy, Debug, PartialEq)]
struct WidthRange {
    min: Option<f64>,
    end: Option<f64>,
    negated: bool,
}

impl WidthRange {
    fn contains(&self, width: f64) -> bool {
        let inside = self.min.map_or(true, |min| width >= min)
            && self.end.map_or(true, |end| width < end);
        inside != self.negated
    }

    fn to_css(self) -> String {
        let mut parts = Vec::with_capacity(2);
        if let Some(min) = self.min {
            parts.push(format!("(min-width:{}px)", px(min)));
        }
        if let Some(end) = self.end {
            parts.push(format!("(max-width:{}px)", px(end - MAX_WIDTH_STEP)));
        }
        let condition = parts.join(" and ");
        if self.negated {
            format!("not all and {condition}")
        } else {
            condition
        }
    }
}

impl MediaQuery {
    /// Narrower than `sm`.
    pub const MOBILE: MediaQuery = MediaQuery::Down(Breakpoint::Sm);
    /// At least `md`.
    pub const WIDE_SCREEN: MediaQuery = MediaQuery::Up(Breakpoint::Md);

    fn range(&self, table: &BreakpointTable) -> WidthRange {
        let bounds = |min: Option<Breakpoint>, end: Option<Breakpoint>| WidthRange {
            min: min.map(|bp| table.value(bp)),
            end: end.map(|bp| table.value(bp)),
            negated: false,
        };

        match *self {
            MediaQuery::Up(bp) => bounds(Some(bp), None),
            MediaQuery::Down(bp) => bounds(None, Some(bp)),
            MediaQuery::Between(start, end) => bounds(Some(start), Some(end)),
            MediaQuery::Only(bp) => bounds((!bp.is_first()).then_some(bp), bp.next()),
            MediaQuery::Not(bp) => {
                let only = MediaQuery::Only(bp).range(table);
                match (only.min, only.end) {
                    // a one-sided range complements to the other side
                    (None, end) => WidthRange {
                        min: end,
                        end: None,
                        negated: false,
                    },
                    (min, None) => WidthRange {
                        min: None,
                        end: min,
                        negated: false,
                    },
                    _ => WidthRange {
                        negated: true,
                        ..only
                    },
                }
            }
        }
    }

    /// Render as a media condition accepted by `window.matchMedia`.
    pub fn to_css(&self, table: &BreakpointTable) -> String {
        self.range(table).to_css()
    }
}

impl Classify for MediaQuery {
    fn classify(&self, width: f64, table: &BreakpointTable) -> bool {
        self.range(table).contains(width)
    }
}

impl<F> Classify for F
where
    F: Fn(f64, &BreakpointTable) -> bool,
{
    fn classify(&self, width: f64, table: &BreakpointTable) -> bool {
        self(width, table)
    }
}

// Two decimals at most, without trailing zeros.
fn px(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_table() -> BreakpointTable {
        BreakpointTable::new(0.0, 600.0, 900.0, 1200.0, 1536.0).unwrap()
    }

    #[test]
    fn mobile_and_wide_scenario() {
        let table = scenario_table();
        let cases = [
            (599.0, true, false),
            (600.0, false, false),
            (900.0, false, true),
        ];
        for (width, mobile, wide) in cases {
            assert_eq!(MediaQuery::MOBILE.classify(width, &table), mobile, "{width}");
            assert_eq!(MediaQuery::WIDE_SCREEN.classify(width, &table), wide, "{width}");
        }
    }

    #[test]
    fn mobile_is_strictly_below_sm() {
        let table = BreakpointTable::default();
        let sm = table.value(Breakpoint::Sm);
        let md = table.value(Breakpoint::Md);
        for width in (0..2000).map(|w| w as f64 * 0.75) {
            assert_eq!(MediaQuery::MOBILE.classify(width, &table), width < sm);
            assert_eq!(MediaQuery::WIDE_SCREEN.classify(width, &table), width >= md);
        }
    }

    #[test]
    fn classify_is_idempotent() {
        let table = BreakpointTable::default();
        let first = MediaQuery::MOBILE.classify(599.5, &table);
        for _ in 0..10 {
            assert_eq!(MediaQuery::MOBILE.classify(599.5, &table), first);
        }
    }

    #[test]
    fn only_and_not() {
        let table = BreakpointTable::default();
        assert!(MediaQuery::Only(Breakpoint::Sm).classify(600.0, &table));
        assert!(!MediaQuery::Only(Breakpoint::Sm).classify(900.0, &table));
        assert!(MediaQuery::Only(Breakpoint::Xl).classify(5000.0, &table));

        assert!(MediaQuery::Not(Breakpoint::Sm).classify(599.0, &table));
        assert!(!MediaQuery::Not(Breakpoint::Sm).classify(700.0, &table));
        assert!(MediaQuery::Not(Breakpoint::Xs).classify(600.0, &table));
        assert!(!MediaQuery::Not(Breakpoint::Xl).classify(1536.0, &table));
    }

    #[test]
    fn between_is_half_open() {
        let table = BreakpointTable::default();
        let query = MediaQuery::Between(Breakpoint::Sm, Breakpoint::Lg);
        assert!(!query.classify(599.0, &table));
        assert!(query.classify(600.0, &table));
        assert!(query.classify(1199.0, &table));
        assert!(!query.classify(1200.0, &table));
    }

    #[test]
    fn css_rendering() {
        let table = BreakpointTable::default();
        assert_eq!(MediaQuery::MOBILE.to_css(&table), "(max-width:599.95px)");
        assert_eq!(MediaQuery::WIDE_SCREEN.to_css(&table), "(min-width:900px)");
        assert_eq!(
            MediaQuery::Between(Breakpoint::Sm, Breakpoint::Lg).to_css(&table),
            "(min-width:600px) and (max-width:1199.95px)"
        );
        assert_eq!(
            MediaQuery::Only(Breakpoint::Md).to_css(&table),
            "(min-width:900px) and (max-width:1199.95px)"
        );
        assert_eq!(
            MediaQuery::Only(Breakpoint::Xl).to_css(&table),
            "(min-width:1536px)"
        );
        assert_eq!(
            MediaQuery::Not(Breakpoint::Sm).to_css(&table),
            "not all and (min-width:600px) and (max-width:899.95px)"
        );
        assert_eq!(
            MediaQuery::Not(Breakpoint::Xs).to_css(&table),
            "(min-width:600px)"
        );
        assert_eq!(
            MediaQuery::Not(Breakpoint::Xl).to_css(&table),
            "(max-width:1535.95px)"
        );
    }

    #[test]
    fn closures_classify() {
        let table = BreakpointTable::default();
        let tablet = |width: f64, table: &BreakpointTable| {
            MediaQuery::Only(Breakpoint::Sm).classify(width, table)
        };
        assert!(tablet.classify(700.0, &table));
        assert!(!tablet.classify(300.0, &table));
    }

    fn offset_table() -> BreakpointTable {
        BreakpointTable::new(100.0, 600.0, 900.0, 1200.0, 1536.0).unwrap()
    }

    fn all_queries() -> Vec<MediaQuery> {
        use strum::IntoEnumIterator;

        let mut queries = Vec::new();
        for bp in Breakpoint::iter() {
            queries.extend([
                MediaQuery::Up(bp),
                MediaQuery::Down(bp),
                MediaQuery::Only(bp),
                MediaQuery::Not(bp),
            ]);
            for end in Breakpoint::iter().filter(|end| *end > bp) {
                queries.push(MediaQuery::Between(bp, end));
            }
        }
        queries
    }

    // Evaluates the rendered text the way `matchMedia` would.
    fn css_matches(css: &str, width: f64) -> bool {
        let (negated, condition) = match css.strip_prefix("not all and ") {
            Some(rest) => (true, rest),
            None => (false, css),
        };
        let inside = condition.split(" and ").all(|feature| {
            let feature = feature.trim_start_matches('(').trim_end_matches("px)");
            if let Some(min) = feature.strip_prefix("min-width:") {
                width >= min.parse::<f64>().unwrap()
            } else if let Some(max) = feature.strip_prefix("max-width:") {
                width <= max.parse::<f64>().unwrap()
            } else {
                panic!("unexpected media feature {feature}")
            }
        });
        inside != negated
    }

    #[test]
    fn classify_agrees_with_rendered_css() {
        for table in [BreakpointTable::default(), offset_table()] {
            for query in all_queries() {
                let css = query.to_css(&table);
                for width in (0..4000).map(|w| w as f64 * 0.5) {
                    assert_eq!(
                        query.classify(width, &table),
                        css_matches(&css, width),
                        "{query:?} `{css}` at {width}"
                    );
                }
            }
        }
    }

    #[test]
    fn only_agrees_with_tier_for() {
        use strum::IntoEnumIterator;

        let table = offset_table();
        for width in [0.0, 50.0, 99.5, 100.0, 599.5, 600.0, 1000.0, 1536.0, 3000.0] {
            let tier = table.tier_for(width);
            for bp in Breakpoint::iter() {
                assert_eq!(MediaQuery::Only(bp).classify(width, &table), bp == tier, "{bp} {width}");
                assert_eq!(MediaQuery::Not(bp).classify(width, &table), bp != tier, "{bp} {width}");
            }
        }
    }

    #[test]
    fn xs_covers_widths_below_its_threshold() {
        let table = offset_table();
        assert!(MediaQuery::Only(Breakpoint::Xs).classify(50.0, &table));
        assert!(!MediaQuery::Not(Breakpoint::Xs).classify(50.0, &table));
        assert_eq!(
            MediaQuery::Only(Breakpoint::Xs).to_css(&table),
            "(max-width:599.95px)"
        );
        assert_eq!(
            MediaQuery::Not(Breakpoint::Xs).to_css(&table),
            "(min-width:600px)"
        );
    }

    #[test]
    fn query_from_config() {
        let query: MediaQuery = serde_json::from_str(r#"{"between":["sm","lg"]}"#).unwrap();
        assert_eq!(query, MediaQuery::Between(Breakpoint::Sm, Breakpoint::Lg));

        let queries: Vec<MediaQuery> =
            serde_json::from_str(r#"[{"down":"sm"},{"up":"md"},{"not":"xl"}]"#).unwrap();
        assert_eq!(
            queries,
            vec![
                MediaQuery::MOBILE,
                MediaQuery::WIDE_SCREEN,
                MediaQuery::Not(Breakpoint::Xl)
            ]
        );
        assert_eq!(
            serde_json::to_string(&MediaQuery::Only(Breakpoint::Md)).unwrap(),
            r#"{"only":"md"}"#
        );
        assert!(serde_json::from_str::<MediaQuery>(r#"{"down":"xxl"}"#).is_err());
    }
}
