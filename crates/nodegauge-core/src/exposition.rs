//! Prometheus text exposition (format version 0.0.4), gauges only.
//!
//! Each gauge renders as a three-line record:
//!
//! ```text
//! # HELP <name> <help>
//! # TYPE <name> gauge
//! <name> <value>
//! ```

use std::fmt::Write;

use crate::registry::GaugeSample;

/// Media type served with every scrape response.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Format a sample value so any IEEE-754 parser reads it back.
///
/// Finite values use the shortest round-trip decimal form (`10`, `0.25`).
/// Non-finite values use the exposition spellings `NaN`, `+Inf`, `-Inf`.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        let s = if v.is_sign_positive() { "+Inf" } else { "-Inf" };
        s.to_string()
    } else {
        format!("{v}")
    }
}

/// Escape help text: backslash and newline are the only special characters.
pub fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Append one gauge record to `out`.
pub fn write_gauge(out: &mut String, name: &str, help: &str, value: f64) {
    if help.is_empty() {
        let _ = writeln!(out, "# HELP {name}");
    } else {
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
    }
    let _ = writeln!(out, "# TYPE {name} gauge");
    let _ = writeln!(out, "{} {}", name, format_value(value));
}

/// Render a list of samples in order.
pub fn render_samples(samples: &[GaugeSample]) -> String {
    let mut out = String::new();
    for s in samples {
        write_gauge(&mut out, &s.name, &s.help, s.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_values_have_no_fraction() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(10.0), "10");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn fractional_values_round_trip() {
        for v in [0.1, 15.5, -0.25, 1.0 / 3.0, 1e-7, 12345.678] {
            let s = format_value(v);
            assert_eq!(s.parse::<f64>().ok(), Some(v), "value {s}");
        }
    }

    #[test]
    fn non_finite_spellings() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn help_is_escaped() {
        assert_eq!(escape_help("a\\b\nc"), "a\\\\b\\nc");
        assert_eq!(escape_help("plain \"quotes\" stay"), "plain \"quotes\" stay");
    }

    #[test]
    fn record_layout() {
        let mut out = String::new();
        write_gauge(&mut out, "cpu_total", "Current cpu used capacity of node.", 10.0);
        assert_eq!(
            out,
            "# HELP cpu_total Current cpu used capacity of node.\n\
             # TYPE cpu_total gauge\n\
             cpu_total 10\n"
        );
    }

    #[test]
    fn empty_help_has_no_trailing_space() {
        let mut out = String::new();
        write_gauge(&mut out, "up", "", 1.0);
        assert!(out.starts_with("# HELP up\n"));
    }
}
