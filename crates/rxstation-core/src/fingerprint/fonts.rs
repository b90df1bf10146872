//! Installed-font detection by text width probing.

use super::environment::{Environment, ProbeError, ProbeResult};

pub const PROBE_TEXT: &str = "mmmmmmmmmmlli";
pub const PROBE_SIZE: &str = "72px";
pub const BASELINE_FAMILIES: [&str; 3] = ["monospace", "sans-serif", "serif"];

/// Candidates whose width differs from at least one generic baseline.
///
/// Baselines that cannot be measured are skipped. When none can be
/// measured the whole probe is reported as failed.
pub fn detect_fonts<E: Environment + ?Sized>(
    env: &E,
    candidates: &[String],
) -> ProbeResult<Vec<String>> {
    let baselines: Vec<(&str, f64)> = BASELINE_FAMILIES
        .iter()
        .filter_map(|family| {
            env.measure_text(PROBE_TEXT, &format!("{} {}", PROBE_SIZE, family))
                .ok()
                .map(|width| (*family, width))
        })
        .collect();

    if baselines.is_empty() {
        return Err(ProbeError::Unsupported);
    }

    let detected = candidates
        .iter()
        .filter(|font| {
            baselines.iter().any(|(family, base_width)| {
                env.measure_text(PROBE_TEXT, &format!("{} '{}', {}", PROBE_SIZE, font, family))
                    .is_ok_and(|width| (width - base_width).abs() > f64::EPSILON)
            })
        })
        .cloned()
        .collect();

    Ok(detected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Widths(HashMap<String, f64>);

    impl Environment for Widths {
        fn measure_text(&self, text: &str, font: &str) -> ProbeResult<f64> {
            assert_eq!(text, PROBE_TEXT);
            self.0.get(font).copied().ok_or(ProbeError::Unsupported)
        }
    }

    fn widths(entries: &[(&str, f64)]) -> Widths {
        Widths(entries.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn test_font_detected_when_any_baseline_differs() {
        let env = widths(&[
            ("72px monospace", 500.0),
            ("72px sans-serif", 420.0),
            ("72px serif", 410.0),
            ("72px 'Arial', monospace", 420.0),
            ("72px 'Arial', sans-serif", 420.0),
            ("72px 'Arial', serif", 420.0),
            ("72px 'Missing', monospace", 500.0),
            ("72px 'Missing', sans-serif", 420.0),
            ("72px 'Missing', serif", 410.0),
        ]);
        let candidates = vec!["Arial".to_string(), "Missing".to_string()];

        assert_eq!(detect_fonts(&env, &candidates).unwrap(), vec!["Arial".to_string()]);
    }

    #[test]
    fn test_unmeasurable_baselines_skipped() {
        let env = widths(&[("72px serif", 410.0), ("72px 'Georgia', serif", 433.5)]);
        let candidates = vec!["Georgia".to_string(), "Impact".to_string()];

        assert_eq!(detect_fonts(&env, &candidates).unwrap(), vec!["Georgia".to_string()]);
    }

    #[test]
    fn test_no_baseline_is_unsupported() {
        let env = widths(&[]);
        assert_eq!(detect_fonts(&env, &["Arial".to_string()]), Err(ProbeError::Unsupported));
    }
}
